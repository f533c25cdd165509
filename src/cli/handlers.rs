use crate::cli::commands::Cli;
use crate::cli::output::{OutputFormat, FORMATTER};
use crate::core::constants::{layout, version};
use crate::environments::java::{parse_constraint, JavaResolver, VersionConstraint};
use crate::error::{option_with_context, with_context, AppError, ContextualResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::installer::{create_progress_bar, PROGRESS_SCALE};
use crate::infrastructure::remote::ProgressCallback;
use std::path::{Path, PathBuf};

/// 命令处理器
pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    /// 创建新的命令处理器
    pub fn new(config_path: Option<&Path>) -> ContextualResult<Self> {
        let config = with_context(Config::load(config_path), "加载配置")?;
        Ok(Self { config })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 处理命令，返回要输出到 stdout 的内容
    pub async fn handle_command(&self, cli: &Cli) -> ContextualResult<String> {
        let constraint = Self::build_constraint(cli)?;
        let temp_dir = Self::temp_dir(cli);
        let install_dir = Self::install_dir(cli)?;
        let executable = cli.executable.as_deref().unwrap_or(&self.config.executable);

        tracing::debug!(
            "约束: {:?}，临时目录: {}，安装目录: {}",
            constraint,
            temp_dir.display(),
            install_dir.display()
        );

        let resolver = with_context(JavaResolver::from_config(&self.config), "初始化下载客户端")?;

        let bar = (!cli.quiet).then(|| {
            let pb = create_progress_bar();
            pb.set_message(format!("下载 Java {}", constraint.optimal));
            pb
        });
        let callback: Option<ProgressCallback> = bar.clone().map(|pb| {
            Box::new(move |ratio: f64| {
                // 没有 content-length 时比值没有意义，只让进度条转动
                if ratio.is_finite() {
                    pb.set_position((ratio.clamp(0.0, 1.0) * PROGRESS_SCALE as f64) as u64);
                } else {
                    pb.tick();
                }
            }) as ProgressCallback
        });

        let result = resolver
            .find_java(
                &constraint,
                &temp_dir,
                &install_dir,
                Some(executable),
                callback.as_deref(),
            )
            .await;

        if let Some(pb) = &bar {
            pb.finish_and_clear();
        }

        let java_path = with_context(result, "查找 Java")?;
        Ok(FORMATTER.format_resolved(&java_path, &constraint, OutputFormat::from_flag(cli.json)))
    }

    /// 根据命令行参数构造版本约束
    pub fn build_constraint(cli: &Cli) -> ContextualResult<VersionConstraint> {
        match &cli.spec {
            Some(spec) => with_context(parse_constraint(spec, cli.optimal), "解析版本规格"),
            None => Ok(VersionConstraint::bounded(
                cli.optimal.unwrap_or(layout::DEFAULT_OPTIMAL),
                cli.min,
                cli.max,
            )),
        }
    }

    /// 临时目录，默认为系统临时目录下的 `findjava`
    pub fn temp_dir(cli: &Cli) -> PathBuf {
        cli.temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(version::APP_NAME))
    }

    /// 安装目录，默认为本地数据目录下的 `findjava/runtimes`
    pub fn install_dir(cli: &Cli) -> ContextualResult<PathBuf> {
        if let Some(dir) = &cli.install_dir {
            return Ok(dir.clone());
        }
        let data_dir = option_with_context(
            dirs::data_local_dir(),
            || AppError::Config {
                message: "无法确定本地数据目录，请使用 --install-dir 指定".to_string(),
            },
            "确定安装目录",
        )?;
        Ok(data_dir.join(version::APP_NAME).join(layout::RUNTIMES_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::java::VersionRule;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("findjava").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_build_constraint_from_bounds() {
        let constraint = CommandHandler::build_constraint(&parse(&["--optimal", "18", "--min", "17"])).unwrap();
        assert_eq!(constraint.optimal, 18);
        assert!(matches!(constraint.rule, VersionRule::Bounds { min: Some(17), max: None }));

        let default = CommandHandler::build_constraint(&parse(&[])).unwrap();
        assert_eq!(default.optimal, layout::DEFAULT_OPTIMAL);
        assert!(matches!(default.rule, VersionRule::Bounds { min: None, max: None }));
    }

    #[test]
    fn test_build_constraint_from_spec() {
        let range = CommandHandler::build_constraint(&parse(&["--spec", "8-11"])).unwrap();
        assert_eq!(range.optimal, 11);

        let with_optimal = CommandHandler::build_constraint(&parse(&["--spec", "17+", "--optimal", "21"])).unwrap();
        assert_eq!(with_optimal.optimal, 21);

        let err = CommandHandler::build_constraint(&parse(&["--spec", "latest"])).unwrap_err();
        assert!(matches!(err.error, AppError::VersionParse { .. }));
        assert_eq!(err.context.operation, "解析版本规格");
    }

    #[test]
    fn test_directories() {
        let cli = parse(&["--temp-dir", "tmp", "--install-dir", "java"]);
        assert_eq!(CommandHandler::temp_dir(&cli), PathBuf::from("tmp"));
        assert_eq!(CommandHandler::install_dir(&cli).unwrap(), PathBuf::from("java"));

        let defaults = parse(&[]);
        assert!(CommandHandler::temp_dir(&defaults).ends_with("findjava"));
        if let Ok(dir) = CommandHandler::install_dir(&defaults) {
            assert!(dir.ends_with(Path::new("findjava").join("runtimes")));
        }
    }

    #[test]
    fn test_missing_config_file_is_contextual_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = CommandHandler::new(Some(&temp.path().join("missing.toml"))).err().unwrap();
        assert!(matches!(err.error, AppError::Config { .. }));
        assert!(err.user_message().contains("加载配置"));
    }

    #[test]
    fn test_uses_configured_executable() {
        let handler = CommandHandler::with_config(Config {
            executable: "javaw".to_string(),
            ..Config::default()
        });
        assert_eq!(handler.config().executable, "javaw");
    }
}
