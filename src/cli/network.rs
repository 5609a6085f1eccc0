// src/cli/network.rs
//! 网络命令 - status / add / list

use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;

use super::output::{describe_sample, format_output};
use crate::provider::{NmcliStatusProvider, StatusProvider};
use crate::registration::{NetworkRegistrar, NmcliRegistrar};
use crate::wifi::{NetworkCredentials, StatusSample};

/// Status 命令参数
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// 无线网卡名
    #[arg(long)]
    pub interface: Option<String>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Fall back to the configured interface when none was given
    pub fn or_interface(mut self, interface: Option<String>) -> Self {
        self.interface = self.interface.or(interface);
        self
    }
}

/// Add 命令参数
#[derive(Args, Debug)]
pub struct AddArgs {
    /// 网络名称 (SSID)
    pub ssid: String,

    /// 密码；省略则添加开放网络
    #[arg(long, short)]
    pub passphrase: Option<String>,

    /// 使用旧式 WEP 加密
    #[arg(long, requires = "passphrase")]
    pub wep: bool,

    /// 绑定到指定网卡
    #[arg(long)]
    pub interface: Option<String>,
}

impl AddArgs {
    /// Fall back to the configured interface when none was given
    pub fn or_interface(mut self, interface: Option<String>) -> Self {
        self.interface = self.interface.or(interface);
        self
    }

    pub fn credentials(&self) -> NetworkCredentials {
        match &self.passphrase {
            Some(passphrase) => NetworkCredentials::with_passphrase(&self.ssid, passphrase, self.wep),
            None => NetworkCredentials::open(&self.ssid),
        }
    }
}

/// List 命令输出
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub count: usize,
    pub networks: Vec<String>,
}

/// 处理 status 命令 - 单次查询，不经过稳定窗口
pub async fn handle_status(args: StatusArgs) -> Result<()> {
    let provider = NmcliStatusProvider::new().interface(args.interface);
    let raw = provider
        .fetch_current()
        .await?
        .ok_or_else(|| anyhow!("Not associated with any wireless network"))?;
    let sample = StatusSample::try_from(raw)?;

    if args.json {
        println!("{}", format_output(&sample));
    } else {
        println!("{}", describe_sample(&sample));
    }
    Ok(())
}

/// 处理 add 命令
pub async fn handle_add(args: AddArgs) -> Result<()> {
    let credentials = args.credentials();
    let registrar = NmcliRegistrar::new().interface(args.interface.clone());
    registrar.add_network(&credentials).await?;
    println!("已添加网络: {}", credentials.ssid);
    Ok(())
}

/// 处理 list 命令
pub async fn handle_list(json: bool) -> Result<()> {
    let networks = NmcliRegistrar::new().configured_ssids().await?;

    if json {
        let output = ListOutput {
            count: networks.len(),
            networks,
        };
        println!("{}", format_output(&output));
    } else if networks.is_empty() {
        println!("没有已保存的无线网络");
    } else {
        println!("已保存 {} 个无线网络:\n", networks.len());
        for name in networks {
            println!("  {}", name);
        }
    }
    Ok(())
}
