use crate::error::{AppError, AppResult};
use std::fmt;

/// Adoptium API 使用的平台标识（OS / Arch）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// 检测当前运行平台。无法映射到 Adoptium 标识时返回错误，不做回退。
    pub fn current() -> AppResult<Self> {
        Self::from_parts(
            std::env::consts::OS,
            std::env::consts::ARCH,
            cfg!(target_endian = "little"),
            &kernel_release(),
        )
    }

    /// 由 Rust 平台名称推导 Adoptium 标识。
    pub fn from_parts(
        os: &str,
        arch: &str,
        little_endian: bool,
        kernel_release: &str,
    ) -> AppResult<Self> {
        let adoptium_os = match os {
            // Alpine 使用 musl，需要单独的构建
            "linux" if kernel_release.to_lowercase().contains("alpine") => "alpine-linux",
            "linux" => "linux",
            "windows" => "windows",
            "macos" => "mac",
            "solaris" | "illumos" => "solaris",
            "aix" => "aix",
            _ => return Err(AppError::unsupported_platform(os, arch)),
        };

        let adoptium_arch = match arch {
            "x86_64" => "x64",
            "x86" => "x86",
            "aarch64" => "aarch64",
            "arm" => "arm",
            "powerpc64" if little_endian => "ppc64le",
            "powerpc64" => "ppc64",
            "s390x" => "s390x",
            "riscv64" => "riscv64",
            "sparc64" => "sparcv9",
            _ => return Err(AppError::unsupported_platform(os, arch)),
        };

        Ok(Platform {
            os: adoptium_os.to_string(),
            arch: adoptium_arch.to_string(),
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// 读取内核版本字符串，非 Linux 或读取失败时返回空串
fn kernel_release() -> String {
    if cfg!(target_os = "linux") {
        std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    } else {
        String::new()
    }
}
