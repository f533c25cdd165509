use super::installer::JavaInstaller;
use super::probe::{CommandRunner, SystemCommandRunner};
use super::scanner::JavaScanner;
use super::version_manager::VersionConstraint;
use crate::core::constants::layout;
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::remote::{AdoptiumClient, ProgressCallback, ProgressFn, ReleaseSource};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 查找或安装 Java
///
/// 先在本机查找，找不到时才下载 `constraint.optimal` 对应的版本。
/// 不在两次调用之间缓存任何状态。
pub struct JavaResolver<R: ReleaseSource, C: CommandRunner = SystemCommandRunner> {
    scanner: Arc<JavaScanner<C>>,
    installer: JavaInstaller<R>,
}

impl JavaResolver<AdoptiumClient, SystemCommandRunner> {
    /// 使用 Adoptium 和系统进程的默认组合
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let source = AdoptiumClient::from_config(config)?;
        Ok(Self::new(
            JavaScanner::new(),
            JavaInstaller::from_config(source, config)?,
        ))
    }
}

impl<R: ReleaseSource, C: CommandRunner + 'static> JavaResolver<R, C> {
    pub fn new(scanner: JavaScanner<C>, installer: JavaInstaller<R>) -> Self {
        Self {
            scanner: Arc::new(scanner),
            installer,
        }
    }

    pub fn scanner(&self) -> &JavaScanner<C> {
        &self.scanner
    }

    pub fn installer(&self) -> &JavaInstaller<R> {
        &self.installer
    }

    /// 返回满足约束的 Java 可执行文件路径
    pub async fn find_java(
        &self,
        constraint: &VersionConstraint,
        temp_dir: &Path,
        install_dir: &Path,
        executable: Option<&str>,
        progress: Option<&ProgressFn>,
    ) -> AppResult<PathBuf> {
        let executable = executable.unwrap_or(layout::DEFAULT_EXECUTABLE);

        if let Some(found) = self.locate(constraint, executable, install_dir).await? {
            tracing::info!("使用已有的 Java: {}", found.display());
            return Ok(found);
        }

        tracing::info!("未找到可用的 Java，开始下载 Java {}", constraint.optimal);
        self.installer
            .install(constraint.optimal, temp_dir, install_dir, executable, progress)
            .await
    }

    /// 在阻塞线程池中查找本机 Java，探测版本会同步等待子进程
    async fn locate(
        &self,
        constraint: &VersionConstraint,
        executable: &str,
        install_dir: &Path,
    ) -> AppResult<Option<PathBuf>> {
        let scanner = Arc::clone(&self.scanner);
        let constraint = constraint.clone();
        let executable = executable.to_string();
        let install_dir = install_dir.to_path_buf();

        tokio::task::spawn_blocking(move || scanner.locate(&constraint, &executable, &install_dir))
            .await
            .map_err(|e| AppError::Io(io::Error::new(io::ErrorKind::Other, format!("查找任务异常结束: {e}"))))
    }
}

/// 使用默认配置查找或安装 Java
pub async fn find_java(
    constraint: &VersionConstraint,
    temp_dir: &Path,
    install_dir: &Path,
    executable: Option<&str>,
    progress: Option<ProgressCallback>,
) -> AppResult<PathBuf> {
    let config = Config::load(None)?;
    JavaResolver::from_config(&config)?
        .find_java(constraint, temp_dir, install_dir, executable, progress.as_deref())
        .await
}
