//! 路由配置

use actix_web::web;

use super::combs::{create_comb, get_comb, list_combs};
use super::honey::{create_honey, delete_honey, get_honey, list_honey};
use crate::errors::CombError;

/// JSON body 解析失败统一返回 400 + 错误体
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| CombError::bad_request(err.to_string()).into())
}

/// 路由 `/combs`
///
/// 包含：
/// - POST/GET /combs
/// - GET /combs/{comb_id}
/// - POST/GET /combs/{comb_id}/honey
/// - GET/DELETE /combs/{comb_id}/honey/{honey_type}
pub fn combs_routes() -> actix_web::Scope {
    web::scope("/combs")
        .app_data(json_config())
        .route("", web::post().to(create_comb))
        .route("", web::get().to(list_combs))
        .route("/{comb_id}", web::get().to(get_comb))
        .route("/{comb_id}/honey", web::post().to(create_honey))
        .route("/{comb_id}/honey", web::get().to(list_honey))
        .route("/{comb_id}/honey/{honey_type}", web::get().to(get_honey))
        .route("/{comb_id}/honey/{honey_type}", web::delete().to(delete_honey))
}
