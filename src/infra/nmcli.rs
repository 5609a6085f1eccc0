//! nmcli 封装 - NetworkManager 命令行调用与 terse 输出解析

use anyhow::{anyhow, Result};
use tokio::process::Command;
use tracing::{debug, error};

/// Thin wrapper around the `nmcli` binary
#[derive(Debug, Clone)]
pub struct Nmcli {
    program: String,
}

impl Nmcli {
    pub fn new() -> Self {
        Self {
            program: "nmcli".to_string(),
        }
    }

    /// Use a different binary (tests point this at a stub script)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 检测 nmcli 是否已安装
    pub fn is_installed(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Run nmcli and return stdout, failing on a non-zero exit
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, args = ?redact(args), "Running nmcli");

        let output = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow!("failed to run `{}`: {}", self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = %output.status, stderr = %stderr.trim(), "nmcli failed");
            return Err(anyhow!("nmcli exited with {}: {}", output.status, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for Nmcli {
    fn default() -> Self {
        Self::new()
    }
}

/// Hide secrets that follow a key argument before logging
fn redact<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        if hide_next {
            out.push("***");
            hide_next = false;
            continue;
        }
        hide_next = matches!(*arg, "wifi-sec.psk" | "wifi-sec.wep-key0");
        out.push(*arg);
    }
    out
}

/// Split one line of `nmcli -t` output into fields
///
/// Terse mode escapes `:` as `\:` and `\` as `\\` inside values.
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
