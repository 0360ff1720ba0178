use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use article_backend::{ArticleDraft, ArticleStore, ArticleUpdate, StoreError};

fn draft(title: &str, description: &str, content: &str) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        description: description.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn create_assigns_strictly_increasing_ids() {
    let store = ArticleStore::new();

    let mut last = 0;
    for i in 0..10 {
        let article = store
            .create(draft(&format!("title {i}"), "d", "c"))
            .await
            .unwrap();
        assert!(article.id > last);
        last = article.id;
    }
}

#[tokio::test]
async fn create_rejects_empty_fields() {
    let store = ArticleStore::new();

    for bad in [draft("", "d", "c"), draft("t", "", "c"), draft("t", "d", "")] {
        let err = store.create(bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let store = ArticleStore::new();
    assert_eq!(store.get(42).await.unwrap_err(), StoreError::NotFound(42));
}

#[tokio::test]
async fn update_with_title_only_keeps_other_fields() {
    let store = ArticleStore::new();
    let created = store.create(draft("old title", "desc", "body")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = store
        .update(
            created.id,
            ArticleUpdate {
                title: Some("new title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "new title");
    assert_eq!(updated.description, "desc");
    assert_eq!(updated.content, "body");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn empty_patch_still_refreshes_updated_at() {
    let store = ArticleStore::new();
    let created = store.create(draft("title", "desc", "body")).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let patch = ArticleUpdate::default();
    assert!(!patch.has_changes());

    let updated = store.update(created.id, patch).await.unwrap();
    assert_eq!(updated.title, created.title);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn update_rejects_empty_replacement_values() {
    let store = ArticleStore::new();
    let created = store.create(draft("title", "desc", "body")).await.unwrap();

    let err = store
        .update(
            created.id,
            ArticleUpdate {
                content: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get(created.id).await.unwrap().content, "body");
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let store = ArticleStore::new();
    let err = store
        .update(
            7,
            ArticleUpdate {
                title: Some("anything".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(7));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let store = ArticleStore::new();
    let created = store.create(draft("title", "desc", "body")).await.unwrap();

    assert!(store.delete(created.id).await);
    assert_eq!(
        store.get(created.id).await.unwrap_err(),
        StoreError::NotFound(created.id)
    );
}

#[tokio::test]
async fn delete_missing_id_leaves_collection_unchanged() {
    let store = ArticleStore::new();
    store.create(draft("a", "d", "c")).await.unwrap();
    let before = store.list().await;

    assert!(!store.delete(99).await);
    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn ids_are_never_reused_and_order_is_preserved() {
    let store = ArticleStore::new();

    let a = store.create(draft("A", "d", "c")).await.unwrap();
    let b = store.create(draft("B", "d", "c")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);

    assert!(store.delete(1).await);

    let c = store.create(draft("C", "d", "c")).await.unwrap();
    assert_eq!(c.id, 3);

    let titles: Vec<(u64, String)> = store
        .list()
        .await
        .into_iter()
        .map(|article| (article.id, article.title))
        .collect();
    assert_eq!(
        titles,
        vec![(2, "B".to_string()), (3, "C".to_string())]
    );
}

#[tokio::test]
async fn concurrent_creates_produce_distinct_ids() {
    let store = Arc::new(ArticleStore::new());

    let mut handles = Vec::new();
    for task in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..25 {
                let article = store
                    .create(draft(&format!("task {task} article {i}"), "d", "c"))
                    .await
                    .unwrap();
                ids.push(article.id);
            }
            ids
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(seen.insert(id), "id {id} handed out twice");
        }
    }

    assert_eq!(seen.len(), 200);
    assert_eq!(store.count().await, 200);
}
