//! Host registration and dispatch
//!
//! Hosts are selected with a string of the form `name` or
//! `name:key1=value1,key2=value2`. Which hosts exist depends on the features
//! enabled at compile time.

use sdio_core::host::SdioHost;
use std::collections::HashMap;

/// Information about a host
pub struct HostInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available hosts (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_hosts() -> Vec<HostInfo> {
    let mut hosts = Vec::new();

    #[cfg(feature = "dummy")]
    hosts.push(HostInfo {
        name: "dummy",
        aliases: &["emulator"],
        description: "In-memory SDIO card emulator (spi=<0|1>,functions=<0-7>,\
                      ready_after=<n>,ocr=<mask>,window=<size>,memory=<0|1>)",
    });

    hosts
}

/// Generate help text listing all available hosts
pub fn host_help() -> String {
    let hosts = available_hosts();

    if hosts.is_empty() {
        return "No hosts available (recompile with host features enabled)".to_string();
    }

    let mut help = String::from("Available hosts:\n");
    for h in &hosts {
        help.push_str(&format!("  {:12} - {}\n", h.name, h.description));
        if !h.aliases.is_empty() {
            help.push_str(&format!("  {:12}   aliases: {}\n", "", h.aliases.join(", ")));
        }
    }

    help
}

/// Generate a short list of host names for CLI help
pub fn host_names_short() -> String {
    let hosts = available_hosts();
    let names: Vec<&str> = hosts.iter().map(|h| h.name).collect();
    names.join(", ")
}

/// Parsed host parameters
pub struct HostParams {
    /// Host name as given
    pub name: String,
    /// Key-value parameters
    pub params: HashMap<String, String>,
}

/// Parse a host string into name and parameters
///
/// Format: "name" or "name:key1=value1,key2=value2"
pub fn parse_host_params(s: &str) -> Result<HostParams, Box<dyn std::error::Error>> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));

    let mut params = HashMap::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.insert(key.trim().to_string(), value.trim().to_string());
            } else {
                return Err(
                    format!("Invalid parameter format: '{}' (expected key=value)", opt).into(),
                );
            }
        }
    }

    Ok(HostParams {
        name: name.to_string(),
        params,
    })
}

/// Open an SDIO host from its specification string
///
/// # Example
/// ```ignore
/// let mut host = open_host("dummy:functions=7,spi=1")?;
/// let ocr = sdio_core::protocol::io_init(host.as_mut(), 0x00FF_8000)?;
/// ```
pub fn open_host(host: &str) -> Result<Box<dyn SdioHost>, Box<dyn std::error::Error>> {
    let params = parse_host_params(host)?;

    match params.name.as_str() {
        #[cfg(feature = "dummy")]
        "dummy" | "emulator" => open_dummy(&params),

        _ => Err(format!(
            "Unknown host: {} (available: {})",
            params.name,
            host_names_short()
        )
        .into()),
    }
}

#[cfg(feature = "dummy")]
fn open_dummy(params: &HostParams) -> Result<Box<dyn SdioHost>, Box<dyn std::error::Error>> {
    use sdio_dummy::{DummyConfig, DummySdio};

    let config = DummyConfig::from_params(&params.params)?;
    log::info!(
        "Opening dummy SDIO card: {:?} bus, {} function(s), window 0x{:X}",
        config.bus_mode,
        config.num_functions,
        config.window
    );
    Ok(Box::new(DummySdio::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_params() {
        let p = parse_host_params("dummy").unwrap();
        assert_eq!(p.name, "dummy");
        assert!(p.params.is_empty());

        let p = parse_host_params("dummy:spi=1, functions=7").unwrap();
        assert_eq!(p.params.get("spi").map(String::as_str), Some("1"));
        assert_eq!(p.params.get("functions").map(String::as_str), Some("7"));

        assert!(parse_host_params("dummy:spi").is_err());
    }

    #[test]
    fn test_unknown_host() {
        assert!(open_host("nonexistent").is_err());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_open_dummy() {
        let mut host = open_host("dummy:spi=1,functions=3").unwrap();
        assert!(host.bus_mode().is_spi());
        let ocr = sdio_core::protocol::io_init(host.as_mut(), 0x00FF_8000).unwrap();
        assert_eq!(ocr.num_functions(), 3);

        assert!(open_host("dummy:bogus=1").is_err());
    }
}
