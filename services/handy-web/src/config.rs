use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const ADDR_VAR: &str = "HANDY_WEB_ADDR";
pub const PORT_VAR: &str = "HANDY_WEB_PORT";
pub const DIR_VAR: &str = "HANDY_WEB_DIR";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DIR: &str = "web";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: IpAddr,
    pub port: u16,
    pub web_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let addr = match var(ADDR_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ADDR_VAR,
                value: raw,
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match var(PORT_VAR) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: PORT_VAR,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let web_dir = var(DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));

        Ok(Self {
            addr,
            port,
            web_dir,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}
