use crate::core::constants::layout;
use std::path::{Component, Path, PathBuf};

/// 路径工具
pub struct PathUtils;

impl PathUtils {
    /// 带平台扩展名的可执行文件名，例如 Windows 上的 `java.exe`
    pub fn executable_file_name(base: &str) -> String {
        format!("{}{}", base, std::env::consts::EXE_SUFFIX)
    }

    /// 判断路径是否只是一个需要通过 PATH 查找的命令名
    pub fn is_bare_command(path: &Path) -> bool {
        let mut components = path.components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    /// 版本化安装目录 `<install_root>/java-<major>`
    pub fn runtime_home(install_root: &Path, major: u32) -> PathBuf {
        install_root.join(format!("{}{}", layout::INSTALL_DIR_PREFIX, major))
    }

    /// 版本化安装目录中的 `bin` 子目录
    pub fn runtime_bin(install_root: &Path, major: u32) -> PathBuf {
        Self::runtime_home(install_root, major).join(layout::BIN_DIR)
    }
}
