use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::error;

#[derive(Debug, Clone)]
pub enum CombError {
    NotFound(String),
    BadRequest(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Configuration(String),
    FileOperation(String),
    Serialization(String),
}

/// Numeric code carried in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    BadRequest = 1000,
    NotFound = 1004,
    InternalError = 1005,
}

/// Body written for every failed request
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl CombError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CombError::NotFound(_) => "E001",
            CombError::BadRequest(_) => "E002",
            CombError::DatabaseConfig(_) => "E003",
            CombError::DatabaseConnection(_) => "E004",
            CombError::DatabaseOperation(_) => "E005",
            CombError::Configuration(_) => "E006",
            CombError::FileOperation(_) => "E007",
            CombError::Serialization(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            CombError::NotFound(_) => "Resource Not Found",
            CombError::BadRequest(_) => "Bad Request",
            CombError::DatabaseConfig(_) => "Database Configuration Error",
            CombError::DatabaseConnection(_) => "Database Connection Error",
            CombError::DatabaseOperation(_) => "Database Operation Error",
            CombError::Configuration(_) => "Configuration Error",
            CombError::FileOperation(_) => "File Operation Error",
            CombError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CombError::NotFound(msg)
            | CombError::BadRequest(msg)
            | CombError::DatabaseConfig(msg)
            | CombError::DatabaseConnection(msg)
            | CombError::DatabaseOperation(msg)
            | CombError::Configuration(msg)
            | CombError::FileOperation(msg)
            | CombError::Serialization(msg) => msg,
        }
    }

    /// Code reported to HTTP clients; everything but absence and bad input is internal
    pub fn api_code(&self) -> ErrorCode {
        match self {
            CombError::NotFound(_) => ErrorCode::NotFound,
            CombError::BadRequest(_) => ErrorCode::BadRequest,
            _ => ErrorCode::InternalError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CombError::NotFound(_))
    }

    /// 彩色输出（启动失败时打印到 stderr）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CombError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CombError {}

impl ResponseError for CombError {
    fn status_code(&self) -> StatusCode {
        match self.api_code() {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.api_code();
        // internal details stay in the log
        let message = if code == ErrorCode::InternalError {
            error!("{}", self.format_simple());
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { code, message })
    }
}

// 便捷的构造函数
impl CombError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CombError::NotFound(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        CombError::BadRequest(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CombError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CombError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CombError::DatabaseOperation(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        CombError::Configuration(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CombError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CombError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for CombError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(msg) => CombError::NotFound(msg),
            other => CombError::DatabaseOperation(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CombError {
    fn from(err: std::io::Error) -> Self {
        CombError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CombError {
    fn from(err: serde_json::Error) -> Self {
        CombError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for CombError {
    fn from(err: toml::ser::Error) -> Self {
        CombError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for CombError {
    fn from(err: config::ConfigError) -> Self {
        CombError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CombError>;
