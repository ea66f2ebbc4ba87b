use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. ./config.toml
    /// 2. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TERMHUB_").split("__").global());

        figment.extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("TERMHUB_").split("__").global());

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.backend.base_url.is_empty() {
            return Err(ConfigValidationError::MissingBaseUrl);
        }

        if !config.backend.base_url.starts_with("http://")
            && !config.backend.base_url.starts_with("https://")
        {
            return Err(ConfigValidationError::InvalidBaseUrl(
                config.backend.base_url.clone(),
            ));
        }

        if config.backend.request_timeout == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if config.search.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("后端基础 URL 未配置")]
    MissingBaseUrl,

    #[error("后端基础 URL 无效，必须以 http:// 或 https:// 开头: {0}")]
    InvalidBaseUrl(String),

    #[error("请求超时无效，必须大于 0")]
    InvalidTimeout,

    #[error("搜索候选数量无效，必须大于 0")]
    InvalidTopK,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = AppConfig::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.backend.base_url.clear();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::MissingBaseUrl)
        ));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.backend.base_url = "localhost:8000".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let mut config = AppConfig::default();
        config.search.top_k = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidTopK)
        ));
    }

    #[test]
    fn load_from_reads_toml_file() {
        let path = std::env::temp_dir().join(format!("termhub-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://catalog.internal:9000"

[search]
top_k = 4
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from(path.clone()).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(config.backend.base_url, "http://catalog.internal:9000");
        assert_eq!(config.search.top_k, 4);
        // 未指定的字段保持默认值
        assert_eq!(config.backend.request_timeout, 30);
        assert!(config.search.skip_blank_queries);
    }
}
