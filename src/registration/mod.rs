//! 网络注册 - 保存网络凭据、列出已配置网络
//!
//! Stateless pass-through to the host. Nothing here touches the polling core.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::infra::{split_terse, Nmcli};
use crate::wifi::{NetworkCredentials, NetworkSecurity};

/// Host capability for saved networks
#[async_trait]
pub trait NetworkRegistrar: Send + Sync {
    /// Save a network so the host can join it
    async fn add_network(&self, credentials: &NetworkCredentials) -> Result<()>;

    /// Names of the saved wireless networks
    async fn configured_ssids(&self) -> Result<Vec<String>>;
}

/// NetworkManager connection profiles via `nmcli connection`
pub struct NmcliRegistrar {
    nmcli: Nmcli,
    interface: Option<String>,
}

impl NmcliRegistrar {
    pub fn new() -> Self {
        Self {
            nmcli: Nmcli::new(),
            interface: None,
        }
    }

    pub fn with_nmcli(nmcli: Nmcli) -> Self {
        Self {
            nmcli,
            interface: None,
        }
    }

    /// Bind new profiles to one wireless interface
    pub fn interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }
}

impl Default for NmcliRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `nmcli connection add` argument list for a profile
pub fn add_connection_args<'a>(credentials: &'a NetworkCredentials, interface: Option<&'a str>) -> Vec<&'a str> {
    let ssid = credentials.ssid.as_str();
    let mut args = vec!["connection", "add", "type", "wifi", "con-name", ssid, "ssid", ssid];
    if let Some(iface) = interface {
        args.extend(["ifname", iface]);
    }

    match &credentials.security {
        NetworkSecurity::Open => {}
        NetworkSecurity::Wpa { passphrase } => {
            args.extend(["wifi-sec.key-mgmt", "wpa-psk", "wifi-sec.psk", passphrase.as_str()]);
        }
        NetworkSecurity::Wep { key } => {
            args.extend([
                "wifi-sec.key-mgmt",
                "none",
                "wifi-sec.wep-key-type",
                "key",
                "wifi-sec.wep-key0",
                key.as_str(),
            ]);
        }
    }
    args
}

/// Keep the wireless profile names from `NAME,TYPE` terse output
pub fn parse_wifi_connections(output: &str) -> Vec<String> {
    output
        .lines()
        .map(split_terse)
        .filter(|fields| fields.len() == 2 && fields[1] == "802-11-wireless")
        .map(|mut fields| fields.swap_remove(0))
        .filter(|name| !name.is_empty())
        .collect()
}

#[async_trait]
impl NetworkRegistrar for NmcliRegistrar {
    async fn add_network(&self, credentials: &NetworkCredentials) -> Result<()> {
        credentials.validate()?;

        let args = add_connection_args(credentials, self.interface.as_deref());
        self.nmcli.run(&args).await?;

        info!(ssid = %credentials.ssid, wep = credentials.is_wep(), "Network profile added");
        Ok(())
    }

    async fn configured_ssids(&self) -> Result<Vec<String>> {
        let stdout = self
            .nmcli
            .run(&["-t", "-f", "NAME,TYPE", "connection", "show"])
            .await?;
        Ok(parse_wifi_connections(&stdout))
    }
}
