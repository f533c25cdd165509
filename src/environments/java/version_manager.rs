use crate::error::{AppError, AppResult};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// 自定义校验函数，参数为 (可执行文件所在目录, 带平台扩展名的文件名)
pub type ValidityPredicate = Arc<dyn Fn(&Path, &str) -> bool + Send + Sync>;

/// 判断 Java 安装是否可用的规则
#[derive(Clone)]
pub enum VersionRule {
    /// 闭区间上下界；都不设置时只接受与 `optimal` 完全相同的版本
    Bounds { min: Option<u32>, max: Option<u32> },
    /// 完全自定义的判断，不再解析版本号
    Custom(ValidityPredicate),
}

impl fmt::Debug for VersionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRule::Bounds { min, max } => f
                .debug_struct("Bounds")
                .field("min", min)
                .field("max", max)
                .finish(),
            VersionRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Java 版本约束
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    /// 最佳版本：找不到可用安装时下载该主版本
    pub optimal: u32,
    pub rule: VersionRule,
}

impl VersionConstraint {
    /// 只接受 `optimal` 本身
    pub fn exact(optimal: u32) -> Self {
        Self::bounded(optimal, None, None)
    }

    /// 上下界约束，值为 0 的界视为未设置
    pub fn bounded(optimal: u32, min: Option<u32>, max: Option<u32>) -> Self {
        Self {
            optimal,
            rule: VersionRule::Bounds {
                min: min.filter(|v| *v > 0),
                max: max.filter(|v| *v > 0),
            },
        }
    }

    /// 自定义校验
    pub fn custom<F>(optimal: u32, predicate: F) -> Self
    where
        F: Fn(&Path, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            optimal,
            rule: VersionRule::Custom(Arc::new(predicate)),
        }
    }

    /// 探测到的主版本是否满足上下界规则；自定义规则不适用，返回 `None`
    pub fn accepts_version(&self, version: u32) -> Option<bool> {
        match &self.rule {
            VersionRule::Custom(_) => None,
            VersionRule::Bounds { min, max } => {
                if matches!(min, Some(min) if version < *min) {
                    return Some(false);
                }
                if matches!(max, Some(max) if version > *max) {
                    return Some(false);
                }
                if min.is_none() && max.is_none() {
                    return Some(version == self.optimal);
                }
                Some(true)
            }
        }
    }
}

/// 解析版本规格字符串
///
/// 支持 `17`（精确）、`17+`（下界）、`8-11`（区间），可带 `v`/`java`/`jdk` 前缀。
pub fn parse_constraint(spec: &str, optimal: Option<u32>) -> AppResult<VersionConstraint> {
    let cleaned = spec
        .trim()
        .to_lowercase()
        .replace("openjdk", "")
        .replace("java", "")
        .replace("jdk", "")
        .replace('v', "");
    // `jdk-17` 去掉前缀后剩下 `-17`
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('-').unwrap_or(cleaned).trim();

    let parse_major = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| AppError::version_parse_failed(spec))
    };

    if let Some((start, end)) = cleaned.split_once('-') {
        let start = parse_major(start)?;
        let end = parse_major(end)?;
        if start > end {
            return Err(AppError::version_parse_failed(spec));
        }
        let optimal = optimal.unwrap_or(end);
        Ok(VersionConstraint::bounded(optimal, Some(start), Some(end)))
    } else if let Some(base) = cleaned.strip_suffix('+') {
        let min = parse_major(base)?;
        Ok(VersionConstraint::bounded(optimal.unwrap_or(min), Some(min), None))
    } else {
        let major = parse_major(cleaned)?;
        Ok(VersionConstraint::exact(optimal.unwrap_or(major)))
    }
}
