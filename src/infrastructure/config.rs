//! 配置基础设施
//!
//! 启动时从环境变量读取一次：
//! - `HOST`：监听地址，默认 `0.0.0.0`
//! - `PORT`：监听端口，默认 `3000`
//! - `API_KEY`：设置后，写操作需要携带 `x-api-key` 请求头

use std::env;

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置解析错误: {key} = {value:?}: {details}")]
    Parse {
        key: String,
        value: String,
        details: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match non_empty_var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::Parse {
                    key: "PORT".to_string(),
                    value: raw.clone(),
                    details: e.to_string(),
                }
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port,
            api_key: non_empty_var("API_KEY"),
        })
    }

    /// "host:port" 形式的监听地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
