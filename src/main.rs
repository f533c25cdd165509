use clap::Parser;
use findjava::app_constants::log;
use findjava::cli::{Cli, CommandHandler, OutputFormat, FORMATTER};
use findjava::error::ContextualError;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(log::DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log::DEFAULT_FILTER))
    };

    // stdout 只输出结果路径，日志写到 stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// 按输出格式报告错误并退出，JSON 写到 stdout，文本写到 stderr
fn exit_with_error(e: &ContextualError, format: OutputFormat) -> ! {
    let message = FORMATTER.format_failure(e, format);
    if format == OutputFormat::Json {
        print!("{message}");
    } else {
        eprint!("{message}");
    }
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::debug!("findjava 启动参数: {:?}", cli);

    let format = OutputFormat::from_flag(cli.json);

    let handler = match CommandHandler::new(cli.config.as_deref()) {
        Ok(handler) => handler,
        Err(e) => exit_with_error(&e, format),
    };

    match handler.handle_command(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => exit_with_error(&e, format),
    }
}
