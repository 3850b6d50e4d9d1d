//! Application settings loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `VEGGIE_*` environment variables and an
//! optional configuration file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use veggie_patch::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VEGGIE")]
pub struct AppSettings {
    /// Interface to bind; defaults to every IPv4 interface.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without one, recipes live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppSettings {
    /// Socket address to listen on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(PoolConfig::new(url).with_max_size(self.pool_max_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "VEGGIE_HOST",
        "VEGGIE_PORT",
        "VEGGIE_DATABASE_URL",
        "VEGGIE_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("veggie-patch")]).expect("config should load")
    }

    #[rstest]
    fn defaults_serve_from_memory_on_port_8080() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));
        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(settings.pool_max_size, PoolConfig::DEFAULT_MAX_SIZE);
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("VEGGIE_HOST", Some("127.0.0.1".to_owned())),
            ("VEGGIE_PORT", Some("9090".to_owned())),
            (
                "VEGGIE_DATABASE_URL",
                Some("postgres://localhost/recipes".to_owned()),
            ),
            ("VEGGIE_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);
        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9090)));
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://localhost/recipes");
        assert_eq!(settings.pool_max_size, 4);
    }
}
