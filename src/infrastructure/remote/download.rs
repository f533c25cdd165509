use super::http_client::HttpClient;
use crate::core::constants::layout;
use crate::error::{AppError, AppResult};
use futures_util::{Stream, StreamExt};
use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;

/// 下载进度回调，参数为 已下载字节数 / 总字节数
///
/// 服务器未返回 content-length 时总字节数按 0 处理，比值可能为无穷大，
/// 调用方只能把它当作参考值。
pub type ProgressFn = dyn Fn(f64) + Send + Sync;
pub type ProgressCallback = Box<ProgressFn>;

/// 支持的压缩包格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// 根据下载地址的路径后缀判断格式
    pub fn from_url(download_url: &str) -> AppResult<Self> {
        let unsupported = || AppError::UnsupportedArchiveFormat {
            url: download_url.to_string(),
        };
        let path = Url::parse(download_url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| download_url.to_string());

        if path.ends_with(".zip") {
            Ok(Self::Zip)
        } else if path.ends_with(".tar.gz") {
            Ok(Self::TarGz)
        } else {
            Err(unsupported())
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

/// 临时目录下固定名称的压缩包路径，例如 `<temp>/jdk-latest.tar.gz`
pub fn archive_path(temp_dir: &Path, format: ArchiveFormat) -> PathBuf {
    temp_dir.join(format!("{}.{}", layout::ARCHIVE_STEM, format.extension()))
}

/// 下载文件到指定路径
///
/// 数据先写入 `<file>.downloading`，全部写完并关闭后才重命名为目标文件；
/// 任何错误都会删除未完成的文件。服务器没有返回 content-length 时用
/// `expected_size` 计算进度。
pub async fn download_to_file(
    client: &HttpClient,
    url: &str,
    file_path: &Path,
    expected_size: Option<u64>,
    progress: Option<&ProgressFn>,
) -> AppResult<u64> {
    tracing::info!("开始下载: {url}");
    let response = client.get(url).await?;
    let total_size = response.content_length().or(expected_size);
    if total_size.is_none() {
        tracing::debug!("服务器未返回 content-length，进度值不可靠");
    }

    let stream = response.bytes_stream();
    write_stream_to_file(stream, total_size, file_path, progress).await
}

/// 将字节流写入文件并回调进度，返回写入的总字节数
pub async fn write_stream_to_file<S, B, E>(
    mut stream: S,
    total_size: Option<u64>,
    file_path: &Path,
    progress: Option<&ProgressFn>,
) -> AppResult<u64>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let temp_path = partial_path(file_path);

    match write_chunks(&mut stream, total_size, &temp_path, progress).await {
        Ok(downloaded) => {
            tokio::fs::rename(&temp_path, file_path).await?;
            tracing::debug!("下载完成: {} ({} 字节)", file_path.display(), downloaded);
            Ok(downloaded)
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&temp_path).await;
            Err(e)
        }
    }
}

async fn write_chunks<S, B, E>(
    stream: &mut S,
    total_size: Option<u64>,
    temp_path: &Path,
    progress: Option<&ProgressFn>,
) -> AppResult<u64>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let total = total_size.unwrap_or(0) as f64;
    let mut downloaded = 0u64;
    let mut file = tokio::fs::File::create(temp_path).await?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::network(format!("读取数据失败: {}", e)))?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        downloaded += bytes.len() as u64;

        if let Some(callback) = progress {
            callback(downloaded as f64 / total);
        }
    }

    file.flush().await?;
    drop(file); // 关闭文件

    Ok(downloaded)
}

fn partial_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.as_os_str().to_os_string();
    name.push(".");
    name.push(layout::PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// 验证文件哈希
pub async fn verify_file_sha256(path: &Path, expected: &str) -> AppResult<()> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[0..n]);
    }

    let actual = hex::encode(hasher.finalize());

    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(AppError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}
