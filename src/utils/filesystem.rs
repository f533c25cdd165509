use std::fs;
use std::io;
use std::path::Path;

/// 文件系统工具
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// 确保目录存在，不存在时递归创建
    pub fn ensure_dir(path: &Path) -> Result<(), io::Error> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// 删除目录及其内容（目录不存在时不做任何事）
    pub fn clean_dir(path: &Path) -> Result<(), io::Error> {
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        Ok(())
    }

    /// 安全地删除文件
    pub fn remove_file(path: &Path) -> Result<(), io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
