use sift_database::*;

async fn seeded() -> Database {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.query(
        "CREATE restaurant:1 SET name = 'Biscotte';
         CREATE restaurant:2 SET name = 'Chez Nous';
         CREATE restaurant:3 SET name = 'Le Coq';",
    )
    .await
    .expect("seed restaurants");

    db
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn counts_records_of_a_collection() {
    let db = seeded().await;
    let restaurants = CollectionName::try_from("restaurant").unwrap();

    assert_eq!(db.count_records(&restaurants).await.unwrap(), 3);
}

#[tokio::test]
async fn windows_partition_the_collection() {
    let db = seeded().await;
    let restaurants = CollectionName::try_from("restaurant").unwrap();

    let first = db.select_records(&restaurants, 0, Some(2)).await.unwrap();
    let second = db.select_records(&restaurants, 2, Some(2)).await.unwrap();
    let all = db.select_records(&restaurants, 0, None).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert_eq!(all.len(), 3);
    assert_eq!(all[..2], first[..]);
    assert_eq!(all[2..], second[..]);
}
