//! WiFi Monitor CLI
//!
//! 监控当前连接的无线网络，只输出稳定后的变化

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use wifi_monitor::{
    cli::{AddArgs, StatusArgs, WatchArgs},
    MonitorConfig,
};

#[derive(Parser)]
#[command(name = "wifimon")]
#[command(about = "WiFi Monitor - 监控当前无线网络并输出稳定后的变化")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 持续监控当前网络
    Watch(WatchArgs),
    /// 查询一次当前网络（不做防抖）
    Status(StatusArgs),
    /// 保存一个无线网络
    Add(AddArgs),
    /// 列出已保存的无线网络
    List {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 打印生效的配置
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug wifimon watch
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wifi_monitor=info,wifimon=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch(args) => {
            let config = MonitorConfig::load()?;
            wifi_monitor::cli::handle_watch(args, config).await?;
        }
        Commands::Status(args) => {
            let config = MonitorConfig::load()?;
            wifi_monitor::cli::handle_status(args.or_interface(config.interface)).await?;
        }
        Commands::Add(args) => {
            let config = MonitorConfig::load()?;
            wifi_monitor::cli::handle_add(args.or_interface(config.interface)).await?;
        }
        Commands::List { json } => {
            wifi_monitor::cli::handle_list(json).await?;
        }
        Commands::Config => {
            let config = MonitorConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
