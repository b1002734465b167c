//! Configurazione del processo, letta dalle variabili d'ambiente all'avvio.
//!
//! | variabile      | default          |
//! |----------------|------------------|
//! | `BIND_ADDR`    | `127.0.0.1:3000` |
//! | `STORE`        | `memory`         |
//! | `DATABASE_URL` | `orgboard.db`    |

use std::net::SocketAddr;

use anyhow::{bail, Context};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "orgboard.db";

/// Backend di storage scelto per il repository dei messaggi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    /// Raw `DATABASE_URL`, normalised later by [`crate::build_sqlite_url`].
    Sqlite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        // converte la stringa bind in un SocketAddr (host + porta)
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("parse BIND_ADDR {:?}", bind))?;

        let store = match lookup("STORE").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite(
                lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            ),
            Some(other) => bail!("unknown STORE {:?} (expected \"memory\" or \"sqlite\")", other),
        };

        Ok(Self { bind_addr, store })
    }
}
