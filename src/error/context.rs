use crate::error::{AppError, ContextualError};

/// 为Result添加上下文信息的辅助函数
pub fn with_context<T, E: Into<AppError>>(
    result: Result<T, E>,
    operation: &str,
) -> Result<T, ContextualError> {
    result.map_err(|e| e.into().with_context(operation))
}

/// 为Option添加上下文信息的辅助函数
pub fn option_with_context<T>(
    option: Option<T>,
    error: impl FnOnce() -> AppError,
    operation: &str,
) -> Result<T, ContextualError> {
    option.ok_or_else(|| error().with_context(operation))
}
