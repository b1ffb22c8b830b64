use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    /// 运维额外指定的前端地址，追加到CORS来源列表
    pub app_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            cors_origins: default_cors_origins(),
            app_url: None,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_address.is_empty() {
            return Err(anyhow::anyhow!("绑定地址不能为空"));
        }
        if !self.bind_address.contains(':') {
            return Err(anyhow::anyhow!("绑定地址格式无效，应为 host:port"));
        }
        // 包括 app_url，通配符会让 CORS 层构造失败
        if self.allowed_origins().iter().any(|origin| origin == "*") {
            return Err(anyhow::anyhow!("允许携带凭证时CORS来源不能为 *"));
        }

        Ok(())
    }

    /// 最终允许的CORS来源：固定列表加上可选的 `app_url`
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = self.cors_origins.clone();
        if let Some(url) = self.app_url.as_deref().map(str::trim) {
            if !url.is_empty() && !origins.iter().any(|o| o == url) {
                origins.push(url.to_string());
            }
        }
        origins
    }
}

/// 前端静态资源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub enabled: bool,
    pub static_dir: PathBuf,
    pub index_file: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            static_dir: PathBuf::from("./static"),
            index_file: "index.html".to_string(),
        }
    }
}

impl FrontendConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.enabled && self.index_file.is_empty() {
            return Err(anyhow::anyhow!("前端入口文件不能为空"));
        }
        Ok(())
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!(
                "无效的日志级别: {}，支持的级别: {:?}",
                self.log_level,
                valid_log_levels
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            return Err(anyhow::anyhow!(
                "无效的日志格式: {}，支持的格式: {:?}",
                self.log_format,
                valid_formats
            ));
        }

        Ok(())
    }
}
