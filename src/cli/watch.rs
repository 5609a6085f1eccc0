// src/cli/watch.rs
//! Watch 命令 - 持续监控当前网络并输出稳定后的状态

use anyhow::Result;
use chrono::Local;
use clap::Args;
use tracing::{info, warn};

use super::output::format_publication;
use crate::config::{parse_secs, MonitorConfig, NoDataPolicy};
use crate::infra::Nmcli;
use crate::provider::NmcliStatusProvider;
use crate::watcher::{Publication, WifiMonitor};

/// Watch 命令参数
#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// 轮询间隔（秒，最小值由配置决定）
    #[arg(long, short)]
    pub interval: Option<String>,

    /// 稳定窗口（秒）
    #[arg(long, short)]
    pub window: Option<String>,

    /// 无数据时结束输出流
    #[arg(long)]
    pub terminate_on_no_data: bool,

    /// 无线网卡名
    #[arg(long)]
    pub interface: Option<String>,

    /// Only print when the BSSID differs from the last printed report
    #[arg(long)]
    pub changes_only: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

impl WatchArgs {
    /// Layer flags over the loaded configuration
    pub fn apply(&self, mut config: MonitorConfig) -> Result<MonitorConfig> {
        if let Some(interval) = &self.interval {
            config.poll_interval_secs = parse_secs(interval)?.as_secs_f64();
        }
        if let Some(window) = &self.window {
            config.stabilization_window_secs = parse_secs(window)?.as_secs_f64();
        }
        if self.terminate_on_no_data {
            config.no_data_policy = NoDataPolicy::Terminate;
        }
        if self.interface.is_some() {
            config.interface = self.interface.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Tracks the last printed BSSID for `--changes-only`
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last_bssid: Option<String>,
}

impl ChangeFilter {
    pub fn should_print(&mut self, publication: &Publication) -> bool {
        match publication {
            Publication::Report(sample) => {
                if self.last_bssid.as_deref() == Some(sample.bssid()) {
                    return false;
                }
                self.last_bssid = Some(sample.bssid().to_string());
                true
            }
            Publication::Error(_) => true,
        }
    }
}

/// 处理 watch 命令
pub async fn handle_watch(args: WatchArgs, base: MonitorConfig) -> Result<()> {
    let config = args.apply(base)?;
    let poll = config.poll_config()?;

    if !Nmcli::new().is_installed() {
        warn!("nmcli not found in PATH; every poll will report no data");
    }

    let provider = NmcliStatusProvider::new().interface(config.interface.clone());
    let monitor = WifiMonitor::spawn(provider, poll);
    let mut subscription = monitor.subscribe();
    let mut filter = ChangeFilter::default();

    info!(
        interval_ms = monitor.poll_interval().as_millis() as u64,
        window_ms = monitor.stabilization_window().as_millis() as u64,
        "Watching WiFi status, Ctrl+C to stop"
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
            next = subscription.next() => {
                let Some(publication) = next else {
                    break;
                };
                if args.changes_only && !filter.should_print(&publication) {
                    continue;
                }
                println!("{}", format_publication(&publication, Local::now(), args.json));
            }
        }
    }

    Ok(())
}
