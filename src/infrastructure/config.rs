use crate::core::constants::{adoptium, env, layout, version};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 配置文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 发行版 API 地址（不含 `/v3` 路径）
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_vendor")]
    pub vendor: String,
    #[serde(default = "default_image_type")]
    pub image_type: String,
    #[serde(default = "default_jvm_impl")]
    pub jvm_impl: String,
    /// 要查找的可执行文件名（不含平台扩展名）
    #[serde(default = "default_executable")]
    pub executable: String,
    /// 发行版信息带有校验和时是否校验下载的压缩包
    #[serde(default = "default_verify_checksum")]
    pub verify_checksum: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base_url() -> String {
    adoptium::DEFAULT_API_BASE_URL.to_string()
}

fn default_vendor() -> String {
    adoptium::DEFAULT_VENDOR.to_string()
}

fn default_image_type() -> String {
    adoptium::DEFAULT_IMAGE_TYPE.to_string()
}

fn default_jvm_impl() -> String {
    adoptium::DEFAULT_JVM_IMPL.to_string()
}

fn default_executable() -> String {
    layout::DEFAULT_EXECUTABLE.to_string()
}

fn default_verify_checksum() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("{}/{}", version::APP_NAME, version::VERSION)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            vendor: default_vendor(),
            image_type: default_image_type(),
            jvm_impl: default_jvm_impl(),
            executable: default_executable(),
            verify_checksum: default_verify_checksum(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// 加载配置：指定文件时读取文件，否则使用默认值；之后应用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 从 TOML 文件加载配置
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config_load_failed(&display, &e.to_string()))?;

        toml::from_str(&content).map_err(|e| AppError::config_load_failed(&display, &e.to_string()))
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides<F>(&mut self, env_fn: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env_fn(env::API_URL_OVERRIDE).filter(|u| !u.trim().is_empty()) {
            tracing::debug!("使用环境变量 {} 覆盖 API 地址: {}", env::API_URL_OVERRIDE, url);
            self.api_base_url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.adoptium.net");
        assert_eq!(config.vendor, "eclipse");
        assert_eq!(config.image_type, "jdk");
        assert_eq!(config.jvm_impl, "hotspot");
        assert_eq!(config.executable, "java");
        assert!(config.verify_checksum);
        assert!(config.user_agent.starts_with("findjava/"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("findjava.toml");
        fs::write(&path, "executable = \"javaw\"\nverify_checksum = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.executable, "javaw");
        assert!(!config.verify_checksum);
        assert_eq!(config.api_base_url, "https://api.adoptium.net");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "executable = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load_from(Path::new("/nonexistent/findjava.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_env_override() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| {
            (key == "FINDJAVA_API_URL").then(|| "http://127.0.0.1:9000".to_string())
        });
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");

        let mut untouched = Config::default();
        untouched.apply_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(untouched.api_base_url, "https://api.adoptium.net");
    }
}
