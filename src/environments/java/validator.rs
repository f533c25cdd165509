use super::probe::{CommandRunner, SystemCommandRunner, VersionProbe};
use super::version_manager::{VersionConstraint, VersionRule};
use crate::utils::PathUtils;
use std::path::Path;

/// Java 安装验证器
#[derive(Debug, Default, Clone)]
pub struct JavaValidator<C: CommandRunner = SystemCommandRunner> {
    probe: VersionProbe<C>,
}

impl JavaValidator<SystemCommandRunner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: CommandRunner> JavaValidator<C> {
    pub fn with_runner(runner: C) -> Self {
        Self {
            probe: VersionProbe::with_runner(runner),
        }
    }

    /// 判断目录中的可执行文件是否满足约束
    ///
    /// `dir` 为空路径时探测的是 PATH 中的命令。
    pub fn is_valid(&self, dir: &Path, constraint: &VersionConstraint, executable_base: &str) -> bool {
        let file_name = PathUtils::executable_file_name(executable_base);

        if let VersionRule::Custom(predicate) = &constraint.rule {
            return predicate(dir, &file_name);
        }

        let Some(version) = self.probe.probe(&dir.join(&file_name)) else {
            return false;
        };

        constraint.accepts_version(version).unwrap_or(false)
    }

    pub fn probe(&self) -> &VersionProbe<C> {
        &self.probe
    }
}
