//! NetworkManager-backed provider (`nmcli device wifi list`)

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::StatusProvider;
use crate::infra::{split_terse, Nmcli};
use crate::wifi::RawStatus;

static BSSID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$").unwrap());

/// Reads the active access point from NetworkManager's cached scan list
pub struct NmcliStatusProvider {
    nmcli: Nmcli,
    interface: Option<String>,
}

impl NmcliStatusProvider {
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

    /// Restrict the lookup to one wireless interface
    pub fn interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }
}

impl Default for NmcliStatusProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusProvider for NmcliStatusProvider {
    async fn fetch_current(&self) -> Result<Option<RawStatus>> {
        let mut args = vec!["-t", "-f", "ACTIVE,BSSID,SSID,SIGNAL", "device", "wifi", "list"];
        if let Some(iface) = &self.interface {
            args.push("ifname");
            args.push(iface.as_str());
        }
        // cached scan list only
        args.extend(["--rescan", "no"]);

        let stdout = self.nmcli.run(&args).await?;
        let status = parse_active_network(&stdout);
        debug!(found = status.is_some(), "nmcli wifi list parsed");
        Ok(status)
    }
}

/// Pick the active row out of `ACTIVE,BSSID,SSID,SIGNAL` terse output
///
/// Malformed columns are left as `None` so validation downstream can
/// reject the sample instead of the whole call failing.
pub fn parse_active_network(output: &str) -> Option<RawStatus> {
    output
        .lines()
        .map(split_terse)
        .filter(|fields| fields.len() == 4)
        .find(|fields| matches!(fields[0].as_str(), "yes" | "*"))
        .map(|fields| {
            let bssid = Some(fields[1].to_lowercase()).filter(|b| BSSID_PATTERN.is_match(b));
            let ssid = Some(fields[2].clone()).filter(|s| !s.is_empty() && s != "--");
            let signal_strength = fields[3]
                .trim()
                .parse::<u8>()
                .ok()
                .map(|percent| f64::from(percent.min(100)) / 100.0);

            RawStatus {
                bssid,
                ssid,
                signal_strength,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "no:11\\:22\\:33\\:44\\:55\\:66:neighbor:40\n\
                        yes:AA\\:BB\\:CC\\:DD\\:EE\\:FF:home\\:5G:72\n\
                        no:12\\:34\\:56\\:78\\:9A\\:BC::20\n";

    #[test]
    fn test_parse_picks_active_row() {
        let status = parse_active_network(LIST).unwrap();
        assert_eq!(status.bssid.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert_eq!(status.ssid.as_deref(), Some("home:5G"));
        assert_eq!(status.signal_strength, Some(0.72));
    }

    #[test]
    fn test_parse_no_active_row() {
        assert!(parse_active_network("no:11\\:22\\:33\\:44\\:55\\:66:neighbor:40\n").is_none());
        assert!(parse_active_network("").is_none());
    }

    #[test]
    fn test_parse_hidden_ssid_left_empty() {
        let status = parse_active_network("yes:AA\\:BB\\:CC\\:DD\\:EE\\:FF::55\n").unwrap();
        assert!(status.ssid.is_none());
        assert!(status.bssid.is_some());
    }

    #[test]
    fn test_parse_bad_bssid_and_signal() {
        let status = parse_active_network("yes:not-a-mac:home:??\n").unwrap();
        assert!(status.bssid.is_none());
        assert!(status.signal_strength.is_none());
        assert_eq!(status.ssid.as_deref(), Some("home"));
    }
}
