use std::sync::Arc;

use explorecali::{
    DuckdbTourRatingRepository, DuckdbTourRepository, PageRequest, TourRating,
    TourRatingRepository, UnitOfWork,
};
use tempfile::tempdir;

async fn rating_store(db_path: &std::path::Path) -> DuckdbTourRatingRepository {
    let tours = DuckdbTourRepository::new(db_path).expect("duckdb init");
    DuckdbTourRatingRepository::with_connection(tours.shared_connection())
        .await
        .expect("ratings init")
}

#[tokio::test]
async fn duckdb_rating_insert_find_and_duplicate() {
    let dir = tempdir().expect("tempdir");
    let store = rating_store(&dir.path().join("explorecali.duckdb")).await;

    let rating = TourRating::new(1, 456, 2, Some("it was fair".to_string()));
    store.insert(&rating).await.expect("insert");

    let found = store
        .find_by_key(1, 456)
        .await
        .expect("find_by_key")
        .expect("rating exists");
    assert_eq!(found, rating);
    assert!(store.find_by_key(1, 457).await.expect("find_by_key").is_none());

    let err = store
        .insert(&TourRating::new(1, 456, 5, None))
        .await
        .unwrap_err();
    assert!(err.is_duplicate_key(), "unexpected error: {}", err);
}

#[tokio::test]
async fn duckdb_rating_save_upserts_and_keeps_null_comment() {
    let dir = tempdir().expect("tempdir");
    let store = rating_store(&dir.path().join("explorecali.duckdb")).await;

    store
        .save(&TourRating::new(3, 9, 4, Some("good".to_string())))
        .await
        .expect("save");
    store
        .save(&TourRating::new(3, 9, 1, None))
        .await
        .expect("save again");

    let all = store.find_all().await.expect("find_all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].score(), 1);
    assert_eq!(all[0].comment(), None);
}

#[tokio::test]
async fn duckdb_rating_listing_order_paging_and_delete() {
    let dir = tempdir().expect("tempdir");
    let store = rating_store(&dir.path().join("explorecali.duckdb")).await;

    for (tour, customer) in [(2, 1), (1, 3), (1, 1), (1, 2)] {
        store
            .insert(&TourRating::with_default_comment(tour, customer, 3))
            .await
            .expect("insert");
    }

    let keys: Vec<_> = store
        .find_all()
        .await
        .expect("find_all")
        .iter()
        .map(|r| r.key())
        .collect();
    assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (2, 1)]);

    let page = store
        .find_page_by_tour_id(1, PageRequest::new(1, 2))
        .await
        .expect("page");
    assert_eq!(page.total(), 3);
    assert_eq!(page.items().len(), 1);
    assert_eq!(page.items()[0].customer_id(), 3);

    store
        .delete(&TourRating::new(1, 2, 0, None))
        .await
        .expect("delete");
    assert_eq!(store.count().await.expect("count"), 3);
    assert_eq!(store.find_by_tour_id(1).await.expect("by tour").len(), 2);
}

#[tokio::test]
async fn duckdb_transaction_rollback_and_abandon() {
    let dir = tempdir().expect("tempdir");
    let store = Arc::new(rating_store(&dir.path().join("explorecali.duckdb")).await);

    let mut tx = store.begin().await.expect("begin");
    tx.insert(&TourRating::new(1, 1, 5, None)).await.expect("insert");
    tx.rollback().await.expect("rollback");
    assert_eq!(store.count().await.expect("count"), 0);

    {
        let mut tx = store.begin().await.expect("begin");
        tx.insert(&TourRating::new(1, 2, 5, None)).await.expect("insert");
    }
    assert_eq!(store.count().await.expect("count"), 0);

    let mut tx = store.begin().await.expect("begin");
    tx.insert(&TourRating::new(1, 3, 5, None)).await.expect("insert");
    tx.commit().await.expect("commit");
    assert_eq!(store.count().await.expect("count"), 1);
}

#[tokio::test]
async fn duckdb_ratings_survive_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("explorecali.duckdb");

    {
        let store = rating_store(&db_path).await;
        store
            .insert(&TourRating::new(7, 70, 4, Some("Good".to_string())))
            .await
            .expect("insert");
    }

    let store = rating_store(&db_path).await;
    let found = store
        .find_by_key(7, 70)
        .await
        .expect("find_by_key")
        .expect("rating persisted");
    assert_eq!(found.comment(), Some("Good"));
}
