//! Command-line argument structures.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Serve an emulated switch over SNMP v1/v2c.
#[derive(Debug, Parser)]
#[command(name = "snmp-switch", version, about)]
pub struct Args {
    /// IP address to bind (use :: for dual-stack).
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// UDP port to listen on.
    #[arg(short = 'p', long, default_value_t = 161)]
    pub port: u16,

    /// Community string requests must carry.
    #[arg(short = 'c', long, default_value = "public")]
    pub community: String,

    /// Display name, overriding the one in the device file.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// JSON device file describing ports and neighbors.
    #[arg(short = 'd', long, value_name = "FILE")]
    pub device: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 => "snmp_switch=info",
            1 => "snmp_switch=debug",
            _ => "snmp_switch=trace",
        }
    }

    /// Initialize tracing based on verbosity flags and `RUST_LOG`.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["snmp-switch"]);
        assert_eq!(args.bind, "0.0.0.0");
        assert_eq!(args.port, 161);
        assert_eq!(args.community, "public");
        assert!(args.name.is_none());
        assert!(args.device.is_none());
        assert_eq!(args.default_filter(), "snmp_switch=info");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "snmp-switch",
            "--device",
            "switch.json",
            "-p",
            "10610",
            "-c",
            "private",
            "-vv",
        ]);
        assert_eq!(args.device, Some(PathBuf::from("switch.json")));
        assert_eq!(args.port, 10610);
        assert_eq!(args.community, "private");
        assert_eq!(args.default_filter(), "snmp_switch=trace");
    }
}
