//! CLI command handling

pub mod network;
pub mod output;
pub mod watch;

pub use network::*;
pub use output::*;
pub use watch::*;
