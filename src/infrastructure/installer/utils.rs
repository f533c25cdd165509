use crate::error::{AppError, AppResult};
use crate::infrastructure::remote::ArchiveFormat;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

/// 进度条刻度：回调给出的是比例，这里按千分比显示
pub const PROGRESS_SCALE: u64 = 1000;

pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(PROGRESS_SCALE);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {percent}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// 按格式解压压缩包到目标目录，保留压缩包内的顶层目录
pub fn extract_archive(archive_path: &Path, format: ArchiveFormat, dest_dir: &Path) -> AppResult<()> {
    tracing::debug!(
        "解压 {} 到 {}",
        archive_path.display(),
        dest_dir.display()
    );
    fs::create_dir_all(dest_dir)?;

    match format {
        ArchiveFormat::Zip => extract_zip(archive_path, dest_dir),
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, dest_dir),
    }
}

pub fn extract_zip(zip_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let file = fs::File::open(zip_path)
        .map_err(|e| AppError::extraction(format!("打开 ZIP 文件失败: {}", e)))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::extraction(format!("读取 ZIP 文件失败: {}", e)))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| AppError::extraction(format!("读取 ZIP 文件项失败: {}", e)))?;
        // 跳过试图写到目标目录之外的条目
        let Some(relative) = file.enclosed_name().map(|p| p.to_path_buf()) else {
            tracing::warn!("跳过不安全的 ZIP 条目: {}", file.name());
            continue;
        };
        let outpath = dest_dir.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                fs::create_dir_all(p)?;
            }
            let mut outfile = fs::File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;

            #[cfg(unix)]
            if let Some(mode) = file.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }
    Ok(())
}

pub fn extract_tar_gz(tar_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let file = fs::File::open(tar_path)
        .map_err(|e| AppError::extraction(format!("打开压缩包失败: {}", e)))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    archive.set_preserve_permissions(true);
    archive
        .unpack(dest_dir)
        .map_err(|e| AppError::extraction(format!("解压失败: {}", e)))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::path::Path;

    /// 构造一个顶层目录为 `root` 的 JDK 风格 tar.gz
    pub fn jdk_tar_gz(root: &str) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let java = b"#!/bin/sh\necho 'openjdk version \"21\" 2023-09-19' >&2\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(java.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, Path::new(root).join("bin").join("java"), &java[..])
            .unwrap();

        let release = b"JAVA_VERSION=\"21\"\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(release.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, Path::new(root).join("release"), &release[..])
            .unwrap();

        builder.into_inner().unwrap().finish().unwrap()
    }

    /// 构造一个顶层目录为 `root` 的 JDK 风格 zip
    pub fn jdk_zip(root: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::FileOptions::default().unix_permissions(0o755);
        writer.add_directory(format!("{root}/bin/"), options).unwrap();
        writer.start_file(format!("{root}/bin/java.exe"), options).unwrap();
        writer.write_all(b"MZ fake").unwrap();
        writer.start_file(format!("{root}/release"), options).unwrap();
        writer.write_all(b"JAVA_VERSION=\"17\"\n").unwrap();
        writer.finish().unwrap().into_inner()
    }
}
