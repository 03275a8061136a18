//! # Runtime Configuration Module
//!
//! Environment-driven settings for the `may` coroutine runtime and the
//! listener.
//!
//! ## Environment Variables
//!
//! ### `BRRTCORE_STACK_SIZE`
//!
//! Stack size of every coroutine, request handlers included. Accepts decimal
//! (`32768`) or hexadecimal (`0x8000`). Default: `0x8000` (32 KB).
//!
//! Memory use is roughly `stack_size × concurrent requests`. Handlers that
//! build large JSON documents on the stack need more.
//!
//! ### `BRRTCORE_ADDR`
//!
//! Listen address. Default: `0.0.0.0:8080`.
//!
//! ## Usage
//!
//! ```rust
//! use brrtcore::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;

pub const DEFAULT_STACK_SIZE: usize = 0x8000;
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    pub addr: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack_size = lookup("BRRTCORE_STACK_SIZE")
            .and_then(|v| parse_size(&v))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let addr = lookup("BRRTCORE_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        RuntimeConfig { stack_size, addr }
    }

    /// Apply the stack size to the global `may` configuration.
    ///
    /// Must run before the first coroutine is spawned to affect all of them.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

/// Decimal or `0x`-prefixed hexadecimal byte count.
#[must_use]
pub fn parse_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("0x4000"), Some(0x4000));
        assert_eq!(parse_size("16384"), Some(16384));
        assert_eq!(parse_size(" 0X10 "), Some(16));
        assert_eq!(parse_size("lots"), None);
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.stack_size, 0x8000);
        assert_eq!(config.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_stack_size_falls_back() {
        let config = RuntimeConfig::from_lookup(|key| {
            (key == "BRRTCORE_STACK_SIZE").then(|| "0xZZ".to_string())
        });
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            "BRRTCORE_STACK_SIZE" => Some("65536".to_string()),
            "BRRTCORE_ADDR" => Some("127.0.0.1:9000".to_string()),
            _ => None,
        });
        assert_eq!(config.stack_size, 65536);
        assert_eq!(config.addr, "127.0.0.1:9000");
    }
}
