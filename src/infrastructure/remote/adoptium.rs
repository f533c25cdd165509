use super::http_client::HttpClient;
use super::platform::Platform;
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Adoptium `assets/latest` 接口返回的单个条目（只解析用到的字段）
#[derive(Debug, Deserialize)]
pub struct AdoptiumAsset {
    pub binary: AdoptiumBinary,
    pub release_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdoptiumBinary {
    pub package: AdoptiumPackage,
}

#[derive(Debug, Deserialize)]
pub struct AdoptiumPackage {
    pub name: String,
    pub link: String,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// 一次下载所需的发行版信息，每次安装都重新获取，不做缓存
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeDescriptor {
    pub download_url: String,
    /// 压缩包内顶层目录名
    pub release_name: String,
    pub checksum: Option<String>,
    /// 压缩包大小，服务器不返回 content-length 时作为进度的分母
    pub size: Option<u64>,
}

/// 发行版信息来源
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// 查询指定主版本在给定平台上的最新发行版
    async fn latest_release(&self, major: u32, platform: &Platform) -> AppResult<RuntimeDescriptor>;
}

/// Adoptium API 客户端
pub struct AdoptiumClient {
    http: HttpClient,
    api_base_url: String,
    jvm_impl: String,
    image_type: String,
    vendor: String,
}

impl AdoptiumClient {
    /// 按配置创建客户端
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self {
            http: HttpClient::new(&config.user_agent)?,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            jvm_impl: config.jvm_impl.clone(),
            image_type: config.image_type.clone(),
            vendor: config.vendor.clone(),
        })
    }

    /// 构造 `assets/latest` 查询地址
    pub fn latest_assets_url(&self, major: u32, platform: &Platform) -> AppResult<String> {
        let base = format!(
            "{}/v3/assets/latest/{}/{}",
            self.api_base_url, major, self.jvm_impl
        );
        let mut url = Url::parse(&base).map_err(|e| AppError::Config {
            message: format!("无效的 API 地址 {}: {}", self.api_base_url, e),
        })?;
        url.query_pairs_mut()
            .append_pair("architecture", &platform.arch)
            .append_pair("image_type", &self.image_type)
            .append_pair("os", &platform.os)
            .append_pair("vendor", &self.vendor);
        Ok(url.to_string())
    }
}

#[async_trait]
impl ReleaseSource for AdoptiumClient {
    async fn latest_release(&self, major: u32, platform: &Platform) -> AppResult<RuntimeDescriptor> {
        let url = self.latest_assets_url(major, platform)?;
        tracing::debug!("查询 Adoptium 发行版信息: {url}");

        let not_found = || AppError::MetadataNotFound {
            version: major,
            platform: platform.to_string(),
        };

        let response = self.http.send(&url).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }
        if !status.is_success() {
            return Err(HttpClient::from_status(status, &url));
        }

        let assets: Vec<AdoptiumAsset> = HttpClient::read_json(response).await?;
        let asset = assets.into_iter().next().ok_or_else(not_found)?;

        tracing::debug!(
            "找到发行版 {} ({})",
            asset.release_name,
            asset.binary.package.name
        );

        Ok(RuntimeDescriptor {
            download_url: asset.binary.package.link,
            release_name: asset.release_name,
            checksum: asset.binary.package.checksum,
            size: asset.binary.package.size,
        })
    }
}
