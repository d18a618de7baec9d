//! 静态配置验证

use super::StaticConfig;
use crate::errors::{LinkmeterError, Result};

const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// 启动前验证配置值是否合法
pub fn validate_static_config(config: &StaticConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(LinkmeterError::config("server.port must be non-zero"));
    }

    if config.server.workers == 0 {
        return Err(LinkmeterError::config("server.workers must be at least 1"));
    }

    if config.shortener.code_length == 0 {
        return Err(LinkmeterError::config(
            "shortener.code_length must be at least 1",
        ));
    }

    if config.shortener.max_attempts == 0 {
        return Err(LinkmeterError::config(
            "shortener.max_attempts must be at least 1",
        ));
    }

    if let Some(ref base) = config.shortener.public_base_url
        && !(base.starts_with("http://") || base.starts_with("https://"))
    {
        return Err(LinkmeterError::config(format!(
            "shortener.public_base_url must start with http:// or https://, got '{}'",
            base
        )));
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(LinkmeterError::config(format!(
            "Invalid logging.format: '{}'. Valid: {:?}",
            config.logging.format, LOG_FORMATS
        )));
    }

    Ok(())
}
