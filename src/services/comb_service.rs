//! Comb service
//!
//! Combs are created empty and only read afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{CombError, Result};
use crate::storage::{Comb, SeaOrmStorage};

#[derive(Clone)]
pub struct CombService {
    storage: Arc<SeaOrmStorage>,
}

impl CombService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Create a new comb with store-assigned id and timestamps
    pub async fn create_comb(&self) -> Result<Comb> {
        self.storage.insert_comb().await
    }

    /// All live combs; an empty table is reported as `NotFound`
    pub async fn list_combs(&self) -> Result<Vec<Comb>> {
        let combs = self.storage.list_combs().await?;
        if combs.is_empty() {
            return Err(CombError::not_found("No combs found"));
        }
        debug!("Listing {} combs", combs.len());
        Ok(combs)
    }

    pub async fn get_comb(&self, comb_id: i32) -> Result<Comb> {
        self.storage
            .find_comb(comb_id)
            .await?
            .ok_or_else(|| CombError::not_found(format!("Comb {} not found", comb_id)))
    }
}
