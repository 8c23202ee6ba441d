//! Read-only operations for SeaOrmStorage

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};
use tracing::{Instrument, trace};

use super::converters::{model_to_comb, model_to_honey};
use super::{SeaOrmStorage, retry};
use crate::errors::{CombError, Result};
use crate::storage::{Comb, Honey};

use migration::entities::{comb, honey};

impl SeaOrmStorage {
    /// All live combs in insertion order, each with an empty `honey` list
    pub async fn list_combs(&self) -> Result<Vec<Comb>> {
        let db = &self.db;
        let query = comb::Entity::find()
            .filter(comb::Column::DeletedAt.is_null())
            .order_by_asc(comb::Column::Id);
        let span = self.db_span("list_combs", &query.build(db.get_database_backend()));

        let models = retry::with_retry("list_combs", self.retry_config, || {
            let query = query.clone();
            async move { query.all(db).await }
        })
        .instrument(span)
        .await
        .map_err(|e| CombError::database_operation(format!("Failed to list combs: {}", e)))?;

        trace!("Loaded {} combs", models.len());
        Ok(models.into_iter().map(model_to_comb).collect())
    }

    pub async fn find_comb(&self, id: i32) -> Result<Option<Comb>> {
        let db = &self.db;
        let query = comb::Entity::find_by_id(id).filter(comb::Column::DeletedAt.is_null());
        let span = self.db_span("find_comb", &query.build(db.get_database_backend()));

        let model = retry::with_retry(&format!("find_comb({})", id), self.retry_config, || {
            let query = query.clone();
            async move { query.one(db).await }
        })
        .instrument(span)
        .await
        .map_err(|e| CombError::database_operation(format!("Failed to load comb {}: {}", id, e)))?;

        Ok(model.map(model_to_comb))
    }

    /// Live honey rows whose `comb_id` equals `comb_id`, ordered by type
    pub async fn list_honey(&self, comb_id: i32) -> Result<Vec<Honey>> {
        let db = &self.db;
        let query = honey::Entity::find()
            .filter(honey::Column::CombId.eq(comb_id))
            .filter(honey::Column::DeletedAt.is_null())
            .order_by_asc(honey::Column::HoneyType);
        let span = self.db_span("list_honey", &query.build(db.get_database_backend()));

        let models = retry::with_retry(
            &format!("list_honey({})", comb_id),
            self.retry_config,
            || {
                let query = query.clone();
                async move { query.all(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to list honey for comb {}: {}",
                comb_id, e
            ))
        })?;

        Ok(models.into_iter().map(model_to_honey).collect())
    }

    pub async fn find_honey(&self, comb_id: i32, honey_type: &str) -> Result<Option<Honey>> {
        let db = &self.db;
        let query = honey::Entity::find()
            .filter(honey::Column::CombId.eq(comb_id))
            .filter(honey::Column::HoneyType.eq(honey_type))
            .filter(honey::Column::DeletedAt.is_null())
            .limit(1);
        let span = self.db_span("find_honey", &query.build(db.get_database_backend()));

        let model = retry::with_retry(
            &format!("find_honey({}, {})", comb_id, honey_type),
            self.retry_config,
            || {
                let query = query.clone();
                async move { query.one(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to load honey ({}, {}): {}",
                comb_id, honey_type, e
            ))
        })?;

        Ok(model.map(model_to_honey))
    }
}
