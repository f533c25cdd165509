use crate::environments::java::VersionConstraint;
use crate::environments::java::VersionRule;
use crate::error::ContextualError;
use std::path::Path;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// 输出格式化器
pub struct OutputFormatter;

impl OutputFormatter {
    /// 格式化查找结果
    pub fn format_resolved(
        &self,
        java_path: &Path,
        constraint: &VersionConstraint,
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Text => format!("{}\n", java_path.display()),
            OutputFormat::Json => {
                let (min, max) = match &constraint.rule {
                    VersionRule::Bounds { min, max } => (*min, *max),
                    VersionRule::Custom(_) => (None, None),
                };
                let json_output = serde_json::json!({
                    "success": true,
                    "path": java_path.to_string_lossy(),
                    "optimal": constraint.optimal,
                    "min": min,
                    "max": max,
                });
                format!("{json_output:#}\n")
            }
        }
    }

    /// 格式化错误信息
    pub fn format_error(&self, error: &str, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!("Error: {}\n", error),
            OutputFormat::Json => {
                let json_output = serde_json::json!({
                    "error": error,
                    "success": false
                });
                format!("{json_output:#}\n")
            }
        }
    }

    /// 格式化命令失败信息，文本格式带建议，JSON 格式与 `format_error` 一致
    pub fn format_failure(&self, error: &ContextualError, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => error.user_message(),
            OutputFormat::Json => self.format_error(&error.to_string(), format),
        }
    }
}

/// 全局格式化器实例
pub static FORMATTER: OutputFormatter = OutputFormatter;
