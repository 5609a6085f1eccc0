//! WiFi domain types

mod credentials;
mod sample;

pub use credentials::{NetworkCredentials, NetworkSecurity};
pub use sample::{RawStatus, StatusSample};
