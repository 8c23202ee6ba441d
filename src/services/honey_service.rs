//! Honey service
//!
//! Every successful read bumps the visit counter of each returned record
//! before the response is built. How the bump is written depends on
//! [`VisitsConfig::atomic_increment`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::VisitsConfig;
use crate::errors::{CombError, Result};
use crate::storage::{Honey, NewHoney, SeaOrmStorage};

#[derive(Clone)]
pub struct HoneyService {
    storage: Arc<SeaOrmStorage>,
    visits: VisitsConfig,
}

impl HoneyService {
    pub fn new(storage: Arc<SeaOrmStorage>, visits: VisitsConfig) -> Self {
        Self { storage, visits }
    }

    /// Create a honey record under `comb_id`
    ///
    /// Any `combId` in the body is ignored. Duplicate keys and unknown combs
    /// are persistence errors, not validation errors.
    pub async fn create_honey(&self, comb_id: i32, new_honey: NewHoney) -> Result<Honey> {
        if new_honey.honey_type.trim().is_empty() {
            return Err(CombError::bad_request("Honey type must not be empty"));
        }
        if new_honey.visits.is_some_and(|v| v < 0) {
            return Err(CombError::bad_request("Visits must not be negative"));
        }
        if let Some(body_comb_id) = new_honey.comb_id
            && body_comb_id != i64::from(comb_id)
        {
            debug!(
                "Ignoring body combId {} in favour of path value {}",
                body_comb_id, comb_id
            );
        }

        self.storage.insert_honey(comb_id, &new_honey).await
    }

    /// List the live honey of a comb, counting one visit per returned record
    ///
    /// The loop stops at the first failed update; earlier increments stay.
    /// Records deleted between the list read and their increment are left out.
    pub async fn list_honey(&self, comb_id: i32) -> Result<Vec<Honey>> {
        let records = self.storage.list_honey(comb_id).await?;
        if records.is_empty() {
            return Err(no_honey_for_comb(comb_id));
        }

        let mut visited = Vec::with_capacity(records.len());
        for honey in records {
            match self.record_visit(honey).await {
                Ok(honey) => visited.push(honey),
                Err(e) if e.is_not_found() => {
                    debug!("Skipping honey that disappeared mid-list: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        if visited.is_empty() {
            return Err(no_honey_for_comb(comb_id));
        }
        Ok(visited)
    }

    /// Fetch one honey record and count the visit
    pub async fn get_honey(&self, comb_id: i32, honey_type: &str) -> Result<Honey> {
        let honey = self
            .storage
            .find_honey(comb_id, honey_type)
            .await?
            .ok_or_else(|| honey_not_found(comb_id, honey_type))?;

        self.record_visit(honey).await
    }

    /// Delete by composite key; deleting a missing record still succeeds
    pub async fn delete_honey(&self, comb_id: i32, honey_type: &str) -> Result<()> {
        let affected = self.storage.delete_honey(comb_id, honey_type).await?;
        if affected == 0 {
            info!("Delete honey ({}, {}): nothing to delete", comb_id, honey_type);
        }
        Ok(())
    }

    async fn record_visit(&self, honey: Honey) -> Result<Honey> {
        let now = Utc::now();

        if self.visits.atomic_increment {
            let affected = self
                .storage
                .increment_honey_visits(honey.comb_id, &honey.honey_type, now)
                .await?;
            if affected == 0 {
                return Err(honey_not_found(honey.comb_id, &honey.honey_type));
            }
            // 重新读取，拿到数据库里的最新计数
            return self
                .storage
                .find_honey(honey.comb_id, &honey.honey_type)
                .await?
                .ok_or_else(|| honey_not_found(honey.comb_id, &honey.honey_type));
        }

        // read-then-write: concurrent readers of the same key may lose increments
        let visits = honey.visits.saturating_add(1);
        let affected = self
            .storage
            .set_honey_visits(honey.comb_id, &honey.honey_type, visits, now)
            .await?;
        if affected == 0 {
            return Err(honey_not_found(honey.comb_id, &honey.honey_type));
        }

        Ok(Honey {
            visits,
            updated_at: now,
            ..honey
        })
    }
}

fn no_honey_for_comb(comb_id: i32) -> CombError {
    CombError::not_found(format!("No honey found for comb {}", comb_id))
}

fn honey_not_found(comb_id: i32, honey_type: &str) -> CombError {
    CombError::not_found(format!(
        "Honey '{}' not found for comb {}",
        honey_type, comb_id
    ))
}
