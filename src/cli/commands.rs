use clap::Parser;
use std::path::PathBuf;

/// findjava CLI 应用程序
#[derive(Debug, Parser)]
#[command(name = "findjava")]
#[command(
    about = "查找满足版本要求的 Java，找不到时自动下载 Adoptium JDK",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// 最佳主版本：没有设置上下界时只接受该版本，需要下载时下载该版本
    ///
    /// 未指定时取 --spec 推导出的版本，否则为 17
    #[arg(short, long)]
    pub optimal: Option<u32>,

    /// 可接受的最低主版本
    #[arg(long)]
    pub min: Option<u32>,

    /// 可接受的最高主版本
    #[arg(long)]
    pub max: Option<u32>,

    /// 版本规格，例如 17、17+、8-11（设置后忽略 --min/--max）
    #[arg(short, long, conflicts_with_all = ["min", "max"])]
    pub spec: Option<String>,

    /// 下载压缩包使用的临时目录
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// 运行时安装目录（会被整个替换）
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// 可执行文件名（不含扩展名），默认读取配置
    #[arg(short, long)]
    pub executable: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON 格式输出
    #[arg(long)]
    pub json: bool,

    /// 输出调试日志
    #[arg(long)]
    pub debug: bool,

    /// 不显示下载进度条
    #[arg(short, long)]
    pub quiet: bool,
}
