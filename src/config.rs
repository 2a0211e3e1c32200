use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::discovery::protocol::DATABASE_ADDRESS_KEY;
use crate::tasks::lease::LEASE_DURATION;

pub const USAGE: &str = "Usage: task-database --advertise <host:port> --discovery <host:port> [--bind <addr:port>]
       task-database <own-address> <discovery-address>";

/// Startup configuration for the task database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Local address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Address other services use to reach us. Published in the discovery store.
    pub advertise_addr: String,
    /// `host:port` of the discovery store.
    pub discovery_addr: String,
    /// Discovery key the advertised address is stored under.
    pub registration_key: String,
    pub lease_duration: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            advertise_addr: String::new(),
            discovery_addr: String::new(),
            registration_key: DATABASE_ADDRESS_KEY.to_string(),
            lease_duration: LEASE_DURATION,
        }
    }
}

impl DatabaseConfig {
    /// Parses command-line arguments, program name excluded.
    ///
    /// Flags take precedence; the first two bare arguments fill in the
    /// advertised and discovery addresses when the flags are absent.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut config = Self::default();
        let mut advertise = None;
        let mut discovery = None;
        let mut positional = Vec::new();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                flag @ ("--bind" | "--advertise" | "--discovery") => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow!("{} needs a value", flag))?;
                    match flag {
                        "--bind" => {
                            config.bind_addr = value
                                .parse::<SocketAddr>()
                                .with_context(|| format!("invalid --bind address {}", value))?;
                        }
                        "--advertise" => advertise = Some(value.clone()),
                        _ => discovery = Some(value.clone()),
                    }
                    i += 2;
                }
                other if other.starts_with("--") => {
                    return Err(anyhow!("unknown flag {}", other));
                }
                other => {
                    positional.push(other.to_string());
                    i += 1;
                }
            }
        }

        let mut positional = positional.into_iter();
        config.advertise_addr = advertise
            .or_else(|| positional.next())
            .ok_or_else(|| anyhow!("missing advertised address"))?;
        config.discovery_addr = discovery
            .or_else(|| positional.next())
            .ok_or_else(|| anyhow!("missing discovery store address"))?;

        Ok(config)
    }
}
