#![cfg(feature = "surrealdb")]

use sift_content_types::*;
use sift_database::Database;
use sift_domain::content_type::ContentTypeDescriptor;

const RESTAURANT: &str = "api::restaurant.restaurant";
const UPLOAD: &str = "plugin::upload.file";

fn registry() -> StaticRegistry {
    StaticRegistry::new([
        ContentTypeDescriptor::new(RESTAURANT, "restaurant"),
        ContentTypeDescriptor::new(UPLOAD, "file").with_collection("files"),
    ])
}

async fn database() -> Database {
    let db = Database::builder()
        .url("mem://")
        .session("sift_test", "content")
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
async fn counts_and_batches_table_records() {
    let registry = registry();
    let store = SurrealStore::new(database().await, &registry).unwrap();
    let content_types = ContentTypes::new(registry, store);

    assert_eq!(content_types.total_count([RESTAURANT, "not existent"]).await.unwrap(), 3);

    let pages = content_types
        .map_in_batches(RESTAURANT, BatchOptions::new().page_size(2), |batch| {
            Some(batch.entries.len())
        })
        .await
        .unwrap();
    assert_eq!(pages, [2, 1]);

    let fetched = content_types.fetch_all(RESTAURANT).await.unwrap();
    let batched = content_types
        .map_in_batches(RESTAURANT, BatchOptions::new().page_size(2), |batch| batch.entries)
        .await
        .unwrap();
    assert_eq!(fetched, batched);
}

#[tokio::test]
async fn registered_but_unwritten_tables_read_as_empty() {
    let registry = registry();
    let store = SurrealStore::new(database().await, &registry).unwrap();
    let content_types = ContentTypes::new(registry, store);

    assert_eq!(content_types.count(UPLOAD).await.unwrap(), 0);
    assert!(content_types.fetch_all(UPLOAD).await.unwrap().is_empty());
    assert!(content_types.fetch_page(UPLOAD, 0, 10).await.unwrap().is_empty());

    let pages = content_types
        .map_in_batches(UPLOAD, BatchOptions::new(), |batch| Some(batch.entries.len()))
        .await
        .unwrap();
    assert!(pages.is_empty());
}

#[tokio::test]
async fn unmapped_uids_read_as_empty() {
    let store = SurrealStore::new(database().await, &registry()).unwrap();
    let movies = StaticRegistry::new([ContentTypeDescriptor::new("api::movie.movie", "movie")]);
    let content_types = ContentTypes::new(movies, store);

    assert_eq!(content_types.count("api::movie.movie").await.unwrap(), 0);
    assert!(content_types.fetch_all("api::movie.movie").await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_collection_names_are_rejected() {
    let registry = StaticRegistry::new([
        ContentTypeDescriptor::new(RESTAURANT, "restaurant").with_collection("drop table")
    ]);

    let err = SurrealStore::new(database().await, &registry).unwrap_err();

    assert!(matches!(err, ContentTypesError::Validation { .. }));
}
