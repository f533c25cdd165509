//! 应用程序常量定义
//!
//! 本模块包含全局使用的常量，避免魔数并提供统一的配置值。

/// Adoptium 发行版 API 相关常量
pub mod adoptium {
    /// 默认 API 地址
    pub const DEFAULT_API_BASE_URL: &str = "https://api.adoptium.net";
    /// 默认供应商
    pub const DEFAULT_VENDOR: &str = "eclipse";
    /// 默认镜像类型
    pub const DEFAULT_IMAGE_TYPE: &str = "jdk";
    /// 默认 JVM 实现
    pub const DEFAULT_JVM_IMPL: &str = "hotspot";
}

/// 安装目录布局相关常量
pub mod layout {
    /// 下载的压缩包文件名（不含扩展名）
    pub const ARCHIVE_STEM: &str = "jdk-latest";
    /// 下载过程中使用的临时扩展名
    pub const PARTIAL_SUFFIX: &str = "downloading";
    /// 安装目录前缀，完整名称为 `java-<major>`
    pub const INSTALL_DIR_PREFIX: &str = "java-";
    /// 可执行文件所在子目录
    pub const BIN_DIR: &str = "bin";
    /// 默认可执行文件名（不含平台扩展名）
    pub const DEFAULT_EXECUTABLE: &str = "java";
    /// CLI 默认安装目录在本地数据目录下的子路径
    pub const RUNTIMES_DIR: &str = "runtimes";
    /// CLI 默认的主版本
    pub const DEFAULT_OPTIMAL: u32 = 17;
}

/// 启动器自带运行时相关常量（仅 Windows）
pub mod launcher {
    /// 启动器默认安装目录
    pub const PROGRAM_FILES_ROOT: &str = r"C:\Program Files (x86)\Minecraft Launcher";
    /// 应用商店版启动器相对 LOCALAPPDATA 的缓存目录
    pub const PACKAGE_CACHE_SUBPATH: &[&str] = &[
        "Packages",
        "Microsoft.4297127D64EC6_8wekyb3d8bbwe",
        "LocalCache",
        "Local",
    ];

    /// 启动器运行时目录布局，按优先级排列
    pub const RUNTIME_LAYOUTS: &[&[&str]] = &[
        &["runtime", "java-runtime-beta", "windows-x64", "java-runtime-beta", "bin"],
        &["runtime", "java-runtime-beta", "windows-x86", "java-runtime-beta", "bin"],
        &["runtime", "java-runtime-alpha", "windows-x64", "java-runtime-alpha", "bin"],
        &["runtime", "java-runtime-alpha", "windows-x86", "java-runtime-alpha", "bin"],
        &["runtime", "jre-legacy", "windows-x64", "jre-legacy", "bin"],
        &["runtime", "jre-legacy", "windows-x86", "jre-legacy", "bin"],
        &["runtime", "jre-x64", "bin"],
        &["runtime", "jre-x86", "bin"],
        &["runtime", "java-runtime-gamma", "windows-x64", "java-runtime-gamma", "bin"],
        &["runtime", "java-runtime-gamma", "windows-x86", "java-runtime-gamma", "bin"],
    ];
}

/// 环境变量相关常量
pub mod env {
    /// Java 安装根目录
    pub const JAVA_HOME: &str = "JAVA_HOME";
    /// Windows 用户本地应用数据目录
    pub const LOCAL_APP_DATA: &str = "LOCALAPPDATA";
    /// 覆盖发行版 API 地址
    pub const API_URL_OVERRIDE: &str = "FINDJAVA_API_URL";
}

/// 日志相关常量
pub mod log {
    /// 默认日志过滤规则
    pub const DEFAULT_FILTER: &str = "findjava=info";
    /// 调试模式日志过滤规则
    pub const DEBUG_FILTER: &str = "findjava=debug";
}

/// 版本信息常量
pub mod version {
    /// 应用程序名称
    pub const APP_NAME: &str = "findjava";
    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 正则表达式模式
pub mod patterns {
    /// `java -version` 输出中的主版本号
    pub const JAVA_VERSION_PATTERN: &str = r#"version "(\d+)"#;
}
