//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tempfile::TempDir;

use combs_of_honey::config::DatabaseConfig;
use combs_of_honey::errors::CombError;
use combs_of_honey::storage::backend::{SeaOrmStorage, infer_backend_from_url};
use combs_of_honey::storage::{NewHoney, StorageFactory};
use migration::entities::{comb, honey};

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

fn new_honey(honey_type: &str, visits: Option<i32>) -> NewHoney {
    NewHoney {
        honey_type: honey_type.to_string(),
        visits,
        comb_id: None,
    }
}

#[tokio::test]
async fn test_factory_creates_sqlite_storage() {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", temp_dir.path().join("f.db").display()),
        ..DatabaseConfig::default()
    };

    let storage = StorageFactory::create(&config).await.unwrap();
    assert_eq!(storage.get_backend_config().storage_type, "sqlite");
    storage.ping().await.unwrap();
}

#[tokio::test]
async fn test_factory_rejects_unknown_url() {
    let config = DatabaseConfig {
        database_url: "redis://localhost:6379".to_string(),
        ..DatabaseConfig::default()
    };
    let err = StorageFactory::create(&config).await.err().unwrap();
    assert!(matches!(err, CombError::DatabaseConfig(_)));
    assert!(infer_backend_from_url(&config.database_url).is_err());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}?mode=rwc", temp_dir.path().join("m.db").display());

    let first = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .unwrap();
    let comb = first.insert_comb().await.unwrap();
    first.close().await.unwrap();

    // reopening runs the migrator again over existing tables
    let second = SeaOrmStorage::new(&db_url, "sqlite", &DatabaseConfig::default())
        .await
        .unwrap();
    assert!(second.find_comb(comb.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_insert_and_find_comb() {
    let (storage, _dir) = create_temp_storage().await;

    let created = storage.insert_comb().await.unwrap();
    assert!(created.id > 0);
    assert!(created.honey.is_empty());
    assert!(created.deleted_at.is_none());

    let found = storage.find_comb(created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(storage.find_comb(created.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_combs_skips_soft_deleted() {
    let (storage, _dir) = create_temp_storage().await;
    let a = storage.insert_comb().await.unwrap();
    let b = storage.insert_comb().await.unwrap();
    let c = storage.insert_comb().await.unwrap();

    comb::Entity::update_many()
        .col_expr(comb::Column::DeletedAt, Expr::value(Some(Utc::now())))
        .filter(comb::Column::Id.eq(b.id))
        .exec(storage.get_db())
        .await
        .unwrap();

    let ids: Vec<i32> = storage
        .list_combs()
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![a.id, c.id]);
    assert!(storage.find_comb(b.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_honey_defaults_and_overrides() {
    let (storage, _dir) = create_temp_storage().await;
    let comb = storage.insert_comb().await.unwrap();

    let body = NewHoney {
        comb_id: Some(i64::from(comb.id) + 50),
        ..new_honey("clover", None)
    };
    let honey = storage.insert_honey(comb.id, &body).await.unwrap();
    assert_eq!(honey.comb_id, comb.id);
    assert_eq!(honey.visits, 0);

    let seeded = storage
        .insert_honey(comb.id, &new_honey("heather", Some(9)))
        .await
        .unwrap();
    assert_eq!(seeded.visits, 9);
}

#[tokio::test]
async fn test_duplicate_honey_is_database_error() {
    let (storage, _dir) = create_temp_storage().await;
    let comb = storage.insert_comb().await.unwrap();

    storage
        .insert_honey(comb.id, &new_honey("clover", None))
        .await
        .unwrap();
    let err = storage
        .insert_honey(comb.id, &new_honey("clover", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CombError::DatabaseOperation(_)));

    // same type under another comb is a different key
    let other = storage.insert_comb().await.unwrap();
    assert!(
        storage
            .insert_honey(other.id, &new_honey("clover", None))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_foreign_key_is_enforced() {
    let (storage, _dir) = create_temp_storage().await;

    let err = storage
        .insert_honey(404, &new_honey("orphan", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CombError::DatabaseOperation(_)));
}

#[tokio::test]
async fn test_list_honey_filters_by_comb() {
    let (storage, _dir) = create_temp_storage().await;
    let first = storage.insert_comb().await.unwrap();
    let second = storage.insert_comb().await.unwrap();

    for t in ["clover", "heather", "acacia"] {
        storage.insert_honey(first.id, &new_honey(t, None)).await.unwrap();
    }
    storage
        .insert_honey(second.id, &new_honey("sage", None))
        .await
        .unwrap();

    let records = storage.list_honey(first.id).await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|h| h.comb_id == first.id));
    let types: Vec<&str> = records.iter().map(|h| h.honey_type.as_str()).collect();
    assert_eq!(types, ["acacia", "clover", "heather"]);

    let records = storage.list_honey(second.id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].honey_type, "sage");

    assert!(storage.list_honey(9999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_and_increment_visits() {
    let (storage, _dir) = create_temp_storage().await;
    let comb = storage.insert_comb().await.unwrap();
    storage
        .insert_honey(comb.id, &new_honey("manuka", Some(2)))
        .await
        .unwrap();

    let now = Utc::now();
    assert_eq!(
        storage.set_honey_visits(comb.id, "manuka", 10, now).await.unwrap(),
        1
    );
    assert_eq!(
        storage.increment_honey_visits(comb.id, "manuka", now).await.unwrap(),
        1
    );
    let honey = storage.find_honey(comb.id, "manuka").await.unwrap().unwrap();
    assert_eq!(honey.visits, 11);

    // missing keys touch nothing
    assert_eq!(
        storage.increment_honey_visits(comb.id, "nope", now).await.unwrap(),
        0
    );
    assert_eq!(
        storage.set_honey_visits(comb.id, "nope", 3, now).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_concurrent_atomic_increments_are_not_lost() {
    let (storage, _dir) = create_temp_storage().await;
    let storage = std::sync::Arc::new(storage);
    let comb = storage.insert_comb().await.unwrap();
    storage
        .insert_honey(comb.id, &new_honey("rush", None))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .increment_honey_visits(comb.id, "rush", Utc::now())
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), 1);
    }

    let honey = storage.find_honey(comb.id, "rush").await.unwrap().unwrap();
    assert_eq!(honey.visits, 20);
}

#[tokio::test]
async fn test_soft_deleted_honey_is_hidden() {
    let (storage, _dir) = create_temp_storage().await;
    let comb = storage.insert_comb().await.unwrap();
    storage
        .insert_honey(comb.id, &new_honey("clover", None))
        .await
        .unwrap();

    honey::Entity::update_many()
        .col_expr(honey::Column::DeletedAt, Expr::value(Some(Utc::now())))
        .filter(honey::Column::CombId.eq(comb.id))
        .exec(storage.get_db())
        .await
        .unwrap();

    assert!(storage.find_honey(comb.id, "clover").await.unwrap().is_none());
    assert!(storage.list_honey(comb.id).await.unwrap().is_empty());
    assert_eq!(
        storage
            .increment_honey_visits(comb.id, "clover", Utc::now())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_delete_honey() {
    let (storage, _dir) = create_temp_storage().await;
    let comb = storage.insert_comb().await.unwrap();
    storage
        .insert_honey(comb.id, &new_honey("clover", None))
        .await
        .unwrap();

    assert_eq!(storage.delete_honey(comb.id, "clover").await.unwrap(), 1);
    assert_eq!(storage.delete_honey(comb.id, "clover").await.unwrap(), 0);
    assert!(storage.find_honey(comb.id, "clover").await.unwrap().is_none());
}

#[tokio::test]
async fn test_close_then_ping_fails() {
    let (storage, _dir) = create_temp_storage().await;
    storage.ping().await.unwrap();
    storage.close().await.unwrap();
    assert!(storage.ping().await.is_err());
}
