//! 基础设施层 - 主机命令封装

pub mod nmcli;

pub use nmcli::{split_terse, Nmcli};
