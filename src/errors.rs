use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkmeterError {
    InvalidRequest(String),
    NotFound(String),
    ResourceExhausted(String),
    PayloadTooLarge(String),
    InvalidTarget(String),
    Config(String),
    Metrics(String),
    FileOperation(String),
    Serialization(String),
}

/// 对外返回的错误体，字段名属于 HTTP 契约
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub erro: &'a str,
}

impl LinkmeterError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkmeterError::InvalidRequest(_) => "E001",
            LinkmeterError::NotFound(_) => "E002",
            LinkmeterError::ResourceExhausted(_) => "E003",
            LinkmeterError::PayloadTooLarge(_) => "E008",
            LinkmeterError::InvalidTarget(_) => "E009",
            LinkmeterError::Config(_) => "E004",
            LinkmeterError::Metrics(_) => "E005",
            LinkmeterError::FileOperation(_) => "E006",
            LinkmeterError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkmeterError::InvalidRequest(_) => "Invalid Request",
            LinkmeterError::NotFound(_) => "Resource Not Found",
            LinkmeterError::ResourceExhausted(_) => "Resource Exhausted",
            LinkmeterError::PayloadTooLarge(_) => "Payload Too Large",
            LinkmeterError::InvalidTarget(_) => "Invalid Redirect Target",
            LinkmeterError::Config(_) => "Configuration Error",
            LinkmeterError::Metrics(_) => "Metrics Error",
            LinkmeterError::FileOperation(_) => "File Operation Error",
            LinkmeterError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkmeterError::InvalidRequest(msg) => msg,
            LinkmeterError::NotFound(msg) => msg,
            LinkmeterError::ResourceExhausted(msg) => msg,
            LinkmeterError::PayloadTooLarge(msg) => msg,
            LinkmeterError::InvalidTarget(msg) => msg,
            LinkmeterError::Config(msg) => msg,
            LinkmeterError::Metrics(msg) => msg,
            LinkmeterError::FileOperation(msg) => msg,
            LinkmeterError::Serialization(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkmeterError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            LinkmeterError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkmeterError::ResourceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            LinkmeterError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            LinkmeterError::InvalidTarget(_)
            | LinkmeterError::Config(_)
            | LinkmeterError::Metrics(_)
            | LinkmeterError::FileOperation(_)
            | LinkmeterError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败）
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

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkmeterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkmeterError {}

impl ResponseError for LinkmeterError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.http_status()).json(ErrorBody {
            erro: self.message(),
        })
    }
}

// 便捷的构造函数
impl LinkmeterError {
    pub fn invalid_request<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::InvalidRequest(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::NotFound(msg.into())
    }

    pub fn resource_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::ResourceExhausted(msg.into())
    }

    pub fn payload_too_large<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::PayloadTooLarge(msg.into())
    }

    pub fn invalid_target<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::InvalidTarget(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::Config(msg.into())
    }

    pub fn metrics<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::Metrics(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkmeterError::Serialization(msg.into())
    }
}

impl From<std::io::Error> for LinkmeterError {
    fn from(err: std::io::Error) -> Self {
        LinkmeterError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkmeterError {
    fn from(err: serde_json::Error) -> Self {
        LinkmeterError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkmeterError {
    fn from(err: config::ConfigError) -> Self {
        LinkmeterError::Config(err.to_string())
    }
}

#[cfg(feature = "metrics")]
impl From<prometheus::Error> for LinkmeterError {
    fn from(err: prometheus::Error) -> Self {
        LinkmeterError::Metrics(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkmeterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            LinkmeterError::invalid_request("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LinkmeterError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LinkmeterError::resource_exhausted("x").http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LinkmeterError::payload_too_large("x").http_status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            LinkmeterError::invalid_target("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            LinkmeterError::config("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            LinkmeterError::invalid_request(""),
            LinkmeterError::not_found(""),
            LinkmeterError::resource_exhausted(""),
            LinkmeterError::payload_too_large(""),
            LinkmeterError::invalid_target(""),
            LinkmeterError::config(""),
            LinkmeterError::metrics(""),
            LinkmeterError::file_operation(""),
            LinkmeterError::serialization(""),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = LinkmeterError::not_found("URL curta não encontrada");
        assert_eq!(
            err.to_string(),
            "Resource Not Found: URL curta não encontrada"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LinkmeterError = io.into();
        assert!(matches!(err, LinkmeterError::FileOperation(_)));
    }
}
