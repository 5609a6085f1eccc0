//! Output formatting for CLI commands

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::watcher::Publication;
use crate::wifi::StatusSample;

/// Format output as pretty JSON
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// One line of `watch` output
#[derive(Debug, Serialize)]
pub struct PublicationLine<'a> {
    pub observed_at: DateTime<Local>,
    #[serde(flatten)]
    pub publication: &'a Publication,
}

/// Render a publication as a single line
pub fn format_publication(publication: &Publication, observed_at: DateTime<Local>, json: bool) -> String {
    if json {
        let line = PublicationLine {
            observed_at,
            publication,
        };
        return serde_json::to_string(&line).unwrap_or_else(|_| "{}".to_string());
    }

    let stamp = observed_at.format("%H:%M:%S");
    match publication {
        Publication::Report(sample) => format!("[{}] {}", stamp, describe_sample(sample)),
        Publication::Error(e) => format!("[{}] {} (stream closed)", stamp, e),
    }
}

/// `home (aa:bb:cc:dd:ee:ff) signal 72%`
pub fn describe_sample(sample: &StatusSample) -> String {
    format!(
        "{} ({}) signal {:.0}%",
        sample.ssid(),
        sample.bssid(),
        sample.signal_strength() * 100.0
    )
}
