use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::{Comb, Honey, NewHoney};
use migration::entities::{comb, honey};

/// 将 comb Model 转换为 Comb（honey 为空集合）
pub fn model_to_comb(model: comb::Model) -> Comb {
    Comb {
        id: model.id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
        honey: Vec::new(),
    }
}

pub fn model_to_honey(model: honey::Model) -> Honey {
    Honey {
        comb_id: model.comb_id,
        honey_type: model.honey_type,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
        visits: model.visits,
    }
}

/// A fresh comb row; the id is left to the store
pub fn new_comb_active_model(now: DateTime<Utc>) -> comb::ActiveModel {
    comb::ActiveModel {
        id: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
}

/// `comb_id` always comes from the caller, never from the body
pub fn new_honey_active_model(
    comb_id: i32,
    new_honey: &NewHoney,
    now: DateTime<Utc>,
) -> honey::ActiveModel {
    honey::ActiveModel {
        comb_id: Set(comb_id),
        honey_type: Set(new_honey.honey_type.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        visits: Set(new_honey.visits.unwrap_or(0)),
    }
}
