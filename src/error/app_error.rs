use std::io;
use thiserror::Error;

/// 应用程序错误类型
///
/// 版本探测失败不在此列：探测结果用 `Option` 表示，只会让候选被拒绝，
/// 不会中断查找流程。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),

    #[error("不支持的平台: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("不支持的压缩包格式: {url}")]
    UnsupportedArchiveFormat { url: String },

    #[error("未找到 Java {version} 的发行版 ({platform})")]
    MetadataNotFound { version: u32, platform: String },

    #[error("网络错误: {message}")]
    Network { message: String },

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("解压失败: {message}")]
    Extraction { message: String },

    #[error("解压结果与发行版信息不一致: 在 {install_dir} 中未找到 {expected}")]
    ExtractionMismatch { expected: String, install_dir: String },

    #[error("SHA256 校验失败: 期望 {expected}, 实际 {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("配置错误: {message}")]
    Config { message: String },

    #[error("版本解析错误: {version}")]
    VersionParse { version: String },
}

/// 用于提供错误上下文和用户友好建议
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub operation: String,
    pub suggestions: Vec<String>,
    pub help_url: Option<String>,
}

impl AppError {
    /// 为错误添加上下文信息，并附带该错误类型的默认建议
    pub fn with_context(self, operation: &str) -> ContextualError {
        let suggestions = self.default_suggestions();
        let help_url = match &self {
            AppError::UnsupportedPlatform { .. } | AppError::MetadataNotFound { .. } => {
                Some("https://adoptium.net/supported-platforms/".to_string())
            }
            _ => None,
        };

        ContextualError {
            error: self,
            context: ErrorContext {
                operation: operation.to_string(),
                suggestions,
                help_url,
            },
        }
    }

    fn default_suggestions(&self) -> Vec<String> {
        let suggestions: &[&str] = match self {
            AppError::Network { .. } => &["检查网络连接或代理设置", "稍后重试"],
            AppError::MetadataNotFound { .. } => &["确认该主版本号存在 Temurin 构建", "尝试其他 Java 版本"],
            AppError::UnsupportedPlatform { .. } => &["手动安装 Java 并设置 JAVA_HOME"],
            AppError::ChecksumMismatch { .. } => &["删除临时目录后重试下载"],
            AppError::ExtractionMismatch { .. } => &["上游压缩包结构可能已变化，请反馈问题"],
            AppError::Config { .. } => &["检查配置文件格式是否为合法的 TOML"],
            _ => &[],
        };
        suggestions.iter().map(|s| s.to_string()).collect()
    }
}

/// 带有上下文的错误
#[derive(Error, Debug)]
pub struct ContextualError {
    #[source]
    pub error: AppError,
    pub context: ErrorContext,
}

impl std::fmt::Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "操作失败: {}\n错误: {}", self.context.operation, self.error)
    }
}

impl ContextualError {
    /// 获取用户友好的错误消息
    pub fn user_message(&self) -> String {
        let mut msg = format!("❌ {}\n", self.context.operation);
        msg.push_str(&format!("原因: {}\n", self.error));

        if !self.context.suggestions.is_empty() {
            msg.push_str("💡 建议:\n");
            for suggestion in &self.context.suggestions {
                msg.push_str(&format!("  • {}\n", suggestion));
            }
        }

        if let Some(help_url) = &self.context.help_url {
            msg.push_str(&format!("📖 更多帮助: {}\n", help_url));
        }

        msg
    }
}

/// 应用程序 Result 类型
pub type AppResult<T> = Result<T, AppError>;
pub type ContextualResult<T> = Result<T, ContextualError>;

/// 便捷的错误创建函数
impl AppError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn config_load_failed(path: &str, reason: &str) -> Self {
        Self::Config {
            message: format!("无法加载配置文件 {}: {}", path, reason),
        }
    }

    pub fn version_parse_failed(version: &str) -> Self {
        Self::VersionParse {
            version: version.to_string(),
        }
    }

    pub fn unsupported_platform(os: &str, arch: &str) -> Self {
        Self::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        }
    }
}
