use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::installer::extract_archive;
use crate::infrastructure::remote::download::{archive_path, download_to_file, verify_file_sha256};
use crate::infrastructure::remote::{ArchiveFormat, HttpClient, Platform, ProgressFn, ReleaseSource};
use crate::utils::{FileSystemUtils, PathUtils};
use std::path::{Path, PathBuf};

/// Java 运行时安装器
///
/// 下载指定主版本的最新 JDK 并解压到 `<install_dir>/java-<major>`。
/// 任何一步失败立即返回，不重试。
pub struct JavaInstaller<R: ReleaseSource> {
    source: R,
    http: HttpClient,
    verify_checksum: bool,
    platform: Option<Platform>,
}

impl<R: ReleaseSource> JavaInstaller<R> {
    pub fn new(source: R, http: HttpClient) -> Self {
        Self {
            source,
            http,
            verify_checksum: true,
            platform: None,
        }
    }

    /// 按配置创建安装器
    pub fn from_config(source: R, config: &Config) -> AppResult<Self> {
        Ok(Self::new(source, HttpClient::new(&config.user_agent)?)
            .with_checksum_verification(config.verify_checksum))
    }

    pub fn with_checksum_verification(mut self, enabled: bool) -> Self {
        self.verify_checksum = enabled;
        self
    }

    /// 固定目标平台，不再检测当前系统
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// 安装 Java 并返回可执行文件路径
    ///
    /// `install_dir` 已存在时会被整个删除后重建。
    pub async fn install(
        &self,
        major: u32,
        temp_dir: &Path,
        install_dir: &Path,
        executable: &str,
        progress: Option<&ProgressFn>,
    ) -> AppResult<PathBuf> {
        tracing::info!("安装 Java {} 到 {}", major, install_dir.display());

        FileSystemUtils::ensure_dir(temp_dir)?;
        FileSystemUtils::clean_dir(install_dir)?;

        let platform = match &self.platform {
            Some(platform) => platform.clone(),
            None => Platform::current()?,
        };
        tracing::debug!("目标平台: {}", platform);

        let release = self.source.latest_release(major, &platform).await?;
        let format = ArchiveFormat::from_url(&release.download_url)?;
        let archive = archive_path(temp_dir, format);

        download_to_file(&self.http, &release.download_url, &archive, release.size, progress).await?;

        if let Some(expected) = release.checksum.as_deref().filter(|_| self.verify_checksum) {
            if let Err(e) = verify_file_sha256(&archive, expected).await {
                remove_archive(&archive);
                return Err(e);
            }
            tracing::debug!("校验和验证通过");
        }

        let extract_result = {
            let archive = archive.clone();
            let install_dir = install_dir.to_path_buf();
            tokio::task::spawn_blocking(move || extract_archive(&archive, format, &install_dir))
                .await
                .map_err(|e| AppError::extraction(format!("解压任务异常结束: {e}")))
                .and_then(|result| result)
        };
        remove_archive(&archive);
        if let Err(e) = extract_result {
            discard_partial_install(install_dir);
            return Err(e);
        }

        let extracted = install_dir.join(&release.release_name);
        if !extracted.exists() {
            discard_partial_install(install_dir);
            return Err(AppError::ExtractionMismatch {
                expected: release.release_name,
                install_dir: install_dir.display().to_string(),
            });
        }

        let runtime_home = PathUtils::runtime_home(install_dir, major);
        tokio::fs::rename(&extracted, &runtime_home).await?;
        tracing::info!("Java {} 已安装到 {}", major, runtime_home.display());

        Ok(PathUtils::runtime_bin(install_dir, major).join(PathUtils::executable_file_name(executable)))
    }
}

/// 删除下载的压缩包，失败只记录警告
fn remove_archive(archive: &Path) {
    if let Err(e) = FileSystemUtils::remove_file(archive) {
        tracing::warn!("删除压缩包 {} 失败: {}", archive.display(), e);
    }
}

/// 安装失败时删除已解压的内容，失败只记录警告
fn discard_partial_install(install_dir: &Path) {
    if let Err(e) = FileSystemUtils::clean_dir(install_dir) {
        tracing::warn!("清理安装目录 {} 失败: {}", install_dir.display(), e);
    }
}
