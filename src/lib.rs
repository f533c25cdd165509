// 核心模块
pub mod cli;
pub mod core;
pub mod environments;
pub mod error;
pub mod infrastructure;
pub mod utils;

// 重新导出常用类型
pub use environments::java::{
    find_java, parse_constraint, CommandRunner, JavaResolver, VersionConstraint, VersionRule,
};
pub use error::{AppError, AppResult, ContextualError};
pub use infrastructure::config::Config;
pub use infrastructure::remote::{
    AdoptiumClient, Platform, ProgressCallback, ReleaseSource, RuntimeDescriptor,
};
// 使用命名空间导入常量，避免冲突
pub use self::core::constants as app_constants;
