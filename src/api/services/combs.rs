//! Comb handlers

use actix_web::{HttpResponse, web};
use tracing::trace;

use super::parse_comb_id;
use crate::errors::CombError;
use crate::services::CombService;

/// POST /combs，请求体忽略
pub async fn create_comb(service: web::Data<CombService>) -> Result<HttpResponse, CombError> {
    let comb = service.create_comb().await?;
    Ok(HttpResponse::Created().json(comb))
}

/// GET /combs
pub async fn list_combs(service: web::Data<CombService>) -> Result<HttpResponse, CombError> {
    let combs = service.list_combs().await?;
    trace!("Returning {} combs", combs.len());
    Ok(HttpResponse::Ok().json(combs))
}

/// GET /combs/{comb_id}
pub async fn get_comb(
    path: web::Path<String>,
    service: web::Data<CombService>,
) -> Result<HttpResponse, CombError> {
    let comb_id = parse_comb_id(&path)?;
    let comb = service.get_comb(comb_id).await?;
    Ok(HttpResponse::Ok().json(comb))
}
