use sift_indexer::Indexer;
use sift_kernel::domain::config::SiftConfig;
use sift_kernel::domain::content_type::{ContentTypeDescriptor, ContentTypeUid};
use tokio::sync::watch;

async fn indexer() -> Indexer {
    let mut cfg = SiftConfig::default();
    cfg.database.namespace = "sift_test".to_owned();
    cfg.batch.page_size = 2;
    cfg.content_types = vec![
        ContentTypeDescriptor::new("api::about.about", "about"),
        ContentTypeDescriptor::new("api::restaurant.restaurant", "restaurant"),
        ContentTypeDescriptor::new("plugin::upload.file", "file").with_collection("files"),
    ];

    let indexer = Indexer::builder().config(cfg).build().await.expect("indexer");
    indexer
        .database()
        .query(
            "CREATE restaurant:1 SET name = 'Biscotte';
             CREATE restaurant:2 SET name = 'Chez Nous';
             CREATE restaurant:3 SET name = 'Le Coq';
             CREATE files:1 SET url = '/uploads/menu.pdf';",
        )
        .await
        .expect("seed records");
    indexer
}

#[tokio::test]
async fn lists_all_or_api_content_types() {
    let indexer = indexer().await;

    let all: Vec<String> = indexer.list(false).into_iter().map(|c| c.name).collect();
    let api: Vec<String> = indexer.list(true).into_iter().map(|c| c.name).collect();

    assert_eq!(all, ["about", "restaurant", "file"]);
    assert_eq!(api, ["about", "restaurant"]);
}

#[tokio::test]
async fn counts_requested_names_and_uids() {
    let indexer = indexer().await;

    let report = indexer
        .count(&["restaurant".to_owned(), "plugin::upload.file".to_owned(), "missing".to_owned()])
        .await
        .unwrap();

    assert_eq!(
        report.per_type,
        [
            ("restaurant".to_owned(), Some(3)),
            ("plugin::upload.file".to_owned(), Some(1)),
            ("missing".to_owned(), None),
        ]
    );
    assert_eq!(report.total, 4);
    assert_eq!(indexer.count(&[]).await.unwrap().total, 4);
}

#[tokio::test]
async fn sync_reports_documents_and_batches() {
    let indexer = indexer().await;
    let (_cancel, cancelled) = watch::channel(false);

    let reports = indexer.sync(&["restaurant".to_owned()], cancelled).await.unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].uid, ContentTypeUid::from("api::restaurant.restaurant"));
    assert_eq!(reports[0].documents, 3);
    assert_eq!(reports[0].batches, 2);
    assert!(!reports[0].cancelled);
}

#[tokio::test]
async fn cancelled_sync_stops_early() {
    let indexer = indexer().await;
    let (_cancel, cancelled) = watch::channel(true);

    let reports = indexer.sync(&[], cancelled).await.unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].documents, 0);
    assert!(reports[0].cancelled);
}
