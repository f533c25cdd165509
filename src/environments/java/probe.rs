use crate::core::constants::patterns;
use crate::utils::PathUtils;
use regex::Regex;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

/// 执行 `java -version` 的抽象，便于测试时替换
pub trait CommandRunner: Send + Sync {
    /// 运行 `<executable> -version`，返回合并后的 stdout + stderr
    ///
    /// 进程无法启动或退出码非零时返回错误。
    fn capture_version_output(&self, executable: &Path) -> io::Result<String>;
}

/// 直接启动系统进程的实现
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn capture_version_output(&self, executable: &Path) -> io::Result<String> {
        // 纯命令名先在 PATH 中查找，找不到时不启动进程
        let program = if PathUtils::is_bare_command(executable) {
            which::which(executable)
                .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?
        } else {
            executable.to_path_buf()
        };

        let output = Command::new(&program).arg("-version").output()?;
        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} -version 退出码: {}", program.display(), output.status),
            ));
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(combined)
    }
}

/// 从 `-version` 输出中解析主版本号
///
/// 只取 `version "` 之后的第一段数字，所以 Java 8 的 `"1.8.0_392"` 得到 1。
pub fn parse_major_version(output: &str) -> Option<u32> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(patterns::JAVA_VERSION_PATTERN).ok())
        .as_ref()?;

    pattern
        .captures(output)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Java 版本探测器，任何失败都视为版本未知
#[derive(Debug, Default, Clone)]
pub struct VersionProbe<C: CommandRunner = SystemCommandRunner> {
    runner: C,
}

impl VersionProbe<SystemCommandRunner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CommandRunner> VersionProbe<C> {
    pub fn with_runner(runner: C) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &C {
        &self.runner
    }

    /// 探测可执行文件的主版本号
    pub fn probe(&self, executable: &Path) -> Option<u32> {
        if !PathUtils::is_bare_command(executable) && !executable.exists() {
            tracing::trace!("{} 不存在，跳过", executable.display());
            return None;
        }

        match self.runner.capture_version_output(executable) {
            Ok(output) => {
                let version = parse_major_version(&output);
                tracing::debug!("{} 的版本: {:?}", executable.display(), version);
                version
            }
            Err(e) => {
                tracing::debug!("无法执行 {}: {}", executable.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::CommandRunner;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// 按路径返回预设输出的假执行器，并记录被调用的路径
    #[derive(Default)]
    pub struct FakeRunner {
        outputs: HashMap<PathBuf, String>,
        pub calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeRunner {
        pub fn with_version(mut self, executable: impl Into<PathBuf>, major: &str) -> Self {
            self.outputs.insert(
                executable.into(),
                format!("openjdk version \"{major}\" 2024-01-16\nOpenJDK Runtime Environment\n"),
            );
            self
        }

        pub fn with_output(mut self, executable: impl Into<PathBuf>, output: &str) -> Self {
            self.outputs.insert(executable.into(), output.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CommandRunner for FakeRunner {
        fn capture_version_output(&self, executable: &Path) -> io::Result<String> {
            self.calls.lock().unwrap().push(executable.to_path_buf());
            self.outputs
                .get(executable)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }
    }
}
