//! Honey handlers
//!
//! Reads count as visits, so GET here is not side-effect free.

use actix_web::{HttpResponse, web};
use tracing::trace;

use super::{parse_comb_id, record_honey_type};
use crate::errors::CombError;
use crate::services::HoneyService;
use crate::storage::NewHoney;

/// POST /combs/{comb_id}/honey
pub async fn create_honey(
    path: web::Path<String>,
    body: web::Json<NewHoney>,
    service: web::Data<HoneyService>,
) -> Result<HttpResponse, CombError> {
    let comb_id = parse_comb_id(&path)?;
    let new_honey = body.into_inner();
    record_honey_type(&new_honey.honey_type);

    let honey = service.create_honey(comb_id, new_honey).await?;
    Ok(HttpResponse::Created().json(honey))
}

/// GET /combs/{comb_id}/honey
pub async fn list_honey(
    path: web::Path<String>,
    service: web::Data<HoneyService>,
) -> Result<HttpResponse, CombError> {
    let comb_id = parse_comb_id(&path)?;
    let records = service.list_honey(comb_id).await?;
    trace!("Returning {} honey records for comb {}", records.len(), comb_id);
    Ok(HttpResponse::Ok().json(records))
}

/// GET /combs/{comb_id}/honey/{honey_type}
pub async fn get_honey(
    path: web::Path<(String, String)>,
    service: web::Data<HoneyService>,
) -> Result<HttpResponse, CombError> {
    let (raw_comb_id, honey_type) = path.into_inner();
    let comb_id = parse_comb_id(&raw_comb_id)?;
    record_honey_type(&honey_type);

    let honey = service.get_honey(comb_id, &honey_type).await?;
    Ok(HttpResponse::Ok().json(honey))
}

/// DELETE /combs/{comb_id}/honey/{honey_type}，不存在也返回 200
pub async fn delete_honey(
    path: web::Path<(String, String)>,
    service: web::Data<HoneyService>,
) -> Result<HttpResponse, CombError> {
    let (raw_comb_id, honey_type) = path.into_inner();
    let comb_id = parse_comb_id(&raw_comb_id)?;
    record_honey_type(&honey_type);

    service.delete_honey(comb_id, &honey_type).await?;
    Ok(HttpResponse::Ok().finish())
}
