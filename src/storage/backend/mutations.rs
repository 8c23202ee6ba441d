//! Write operations for SeaOrmStorage

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryTrait};
use tracing::{Instrument, info};

use super::converters::{model_to_comb, model_to_honey, new_comb_active_model, new_honey_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{CombError, Result};
use crate::storage::{Comb, Honey, NewHoney};

use migration::entities::{comb, honey};

impl SeaOrmStorage {
    /// Insert an empty comb; id and timestamps are assigned here and by the store
    pub async fn insert_comb(&self) -> Result<Comb> {
        let db = &self.db;
        let now = Utc::now();
        let active = new_comb_active_model(now);
        let span = self.db_span(
            "insert_comb",
            &comb::Entity::insert(active.clone()).build(db.get_database_backend()),
        );

        let model = retry::with_retry("insert_comb", self.retry_config, || {
            let active = active.clone();
            async move { comb::Entity::insert(active).exec_with_returning(db).await }
        })
        .instrument(span)
        .await
        .map_err(|e| CombError::database_operation(format!("Failed to create comb: {}", e)))?;

        info!("Comb created: {}", model.id);
        Ok(model_to_comb(model))
    }

    /// Insert a honey row under `comb_id`; duplicate keys surface as a database error
    pub async fn insert_honey(&self, comb_id: i32, new_honey: &NewHoney) -> Result<Honey> {
        let db = &self.db;
        let active = new_honey_active_model(comb_id, new_honey, Utc::now());
        let span = self.db_span(
            "insert_honey",
            &honey::Entity::insert(active.clone()).build(db.get_database_backend()),
        );

        let model = retry::with_retry(
            &format!("insert_honey({}, {})", comb_id, new_honey.honey_type),
            self.retry_config,
            || {
                let active = active.clone();
                async move { honey::Entity::insert(active).exec_with_returning(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to create honey ({}, {}): {}",
                comb_id, new_honey.honey_type, e
            ))
        })?;

        info!("Honey created: ({}, {})", model.comb_id, model.honey_type);
        Ok(model_to_honey(model))
    }

    /// Write a precomputed visit count. Returns the number of rows touched.
    pub async fn set_honey_visits(
        &self,
        comb_id: i32,
        honey_type: &str,
        visits: i32,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let db = &self.db;
        let update = honey::Entity::update_many()
            .col_expr(honey::Column::Visits, Expr::value(visits))
            .col_expr(honey::Column::UpdatedAt, Expr::value(now))
            .filter(honey::Column::CombId.eq(comb_id))
            .filter(honey::Column::HoneyType.eq(honey_type));
        let span = self.db_span("set_honey_visits", &update.build(db.get_database_backend()));

        let result = retry::with_retry(
            &format!("set_honey_visits({}, {})", comb_id, honey_type),
            self.retry_config,
            || {
                let update = update.clone();
                async move { update.exec(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to update visits for ({}, {}): {}",
                comb_id, honey_type, e
            ))
        })?;

        Ok(result.rows_affected)
    }

    /// `visits = visits + 1` in a single statement. Returns the number of rows touched.
    pub async fn increment_honey_visits(
        &self,
        comb_id: i32,
        honey_type: &str,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let db = &self.db;
        let update = honey::Entity::update_many()
            .col_expr(
                honey::Column::Visits,
                Expr::col(honey::Column::Visits).add(1),
            )
            .col_expr(honey::Column::UpdatedAt, Expr::value(now))
            .filter(honey::Column::CombId.eq(comb_id))
            .filter(honey::Column::HoneyType.eq(honey_type))
            .filter(honey::Column::DeletedAt.is_null());
        let span = self.db_span(
            "increment_honey_visits",
            &update.build(db.get_database_backend()),
        );

        let result = retry::with_retry(
            &format!("increment_honey_visits({}, {})", comb_id, honey_type),
            self.retry_config,
            || {
                let update = update.clone();
                async move { update.exec(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to increment visits for ({}, {}): {}",
                comb_id, honey_type, e
            ))
        })?;

        Ok(result.rows_affected)
    }

    /// Physically delete by composite key. Zero rows is not an error.
    pub async fn delete_honey(&self, comb_id: i32, honey_type: &str) -> Result<u64> {
        let db = &self.db;
        let delete = honey::Entity::delete_many()
            .filter(honey::Column::CombId.eq(comb_id))
            .filter(honey::Column::HoneyType.eq(honey_type));
        let span = self.db_span("delete_honey", &delete.build(db.get_database_backend()));

        let result = retry::with_retry(
            &format!("delete_honey({}, {})", comb_id, honey_type),
            self.retry_config,
            || {
                let delete = delete.clone();
                async move { delete.exec(db).await }
            },
        )
        .instrument(span)
        .await
        .map_err(|e| {
            CombError::database_operation(format!(
                "Failed to delete honey ({}, {}): {}",
                comb_id, honey_type, e
            ))
        })?;

        info!(
            "Honey deleted: ({}, {}), rows affected: {}",
            comb_id, honey_type, result.rows_affected
        );
        Ok(result.rows_affected)
    }
}
