//! Saved-network credentials

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::MonitorError;

static HEX_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]+$").unwrap());

/// Security scheme of a network being registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NetworkSecurity {
    /// No passphrase
    Open,
    /// WPA/WPA2 personal
    Wpa { passphrase: String },
    /// Legacy WEP key
    Wep { key: String },
}

/// A network to hand to the registration capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkCredentials {
    pub ssid: String,
    pub security: NetworkSecurity,
}

impl NetworkCredentials {
    /// Open network
    pub fn open(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            security: NetworkSecurity::Open,
        }
    }

    /// Passphrase-protected network; `is_wep` selects legacy encryption
    pub fn with_passphrase(ssid: impl Into<String>, passphrase: impl Into<String>, is_wep: bool) -> Self {
        let secret = passphrase.into();
        let security = if is_wep {
            NetworkSecurity::Wep { key: secret }
        } else {
            NetworkSecurity::Wpa { passphrase: secret }
        };
        Self {
            ssid: ssid.into(),
            security,
        }
    }

    pub fn is_wep(&self) -> bool {
        matches!(self.security, NetworkSecurity::Wep { .. })
    }

    /// Check the credentials against what 802.11 accepts
    pub fn validate(&self) -> Result<(), MonitorError> {
        let ssid_len = self.ssid.len();
        if ssid_len == 0 || ssid_len > 32 {
            return Err(invalid(format!("ssid must be 1-32 bytes, got {}", ssid_len)));
        }

        match &self.security {
            NetworkSecurity::Open => Ok(()),
            NetworkSecurity::Wpa { passphrase } => {
                let len = passphrase.chars().count();
                if (8..=63).contains(&len) {
                    Ok(())
                } else {
                    Err(invalid(format!("WPA passphrase must be 8-63 characters, got {}", len)))
                }
            }
            NetworkSecurity::Wep { key } => {
                let ascii_ok = key.is_ascii() && matches!(key.len(), 5 | 13);
                let hex_ok = HEX_KEY.is_match(key) && matches!(key.len(), 10 | 26);
                if ascii_ok || hex_ok {
                    Ok(())
                } else {
                    Err(invalid("WEP key must be 5/13 ASCII characters or 10/26 hex digits".to_string()))
                }
            }
        }
    }
}

fn invalid(reason: String) -> MonitorError {
    MonitorError::InvalidCredentials { reason }
}
