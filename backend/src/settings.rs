//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `TODO_*` environment variables, an optional configuration
//! file, and command-line flags, in increasing order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default TCP port for the HTTP listener.
pub const DEFAULT_PORT: u16 = 8080;
/// Default size of the database connection pool.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling the server listener and persistence backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO")]
pub struct AppSettings {
    /// Address the HTTP listener binds to.
    pub host: Option<IpAddr>,
    /// Port the HTTP listener binds to.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Without one, todos live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply pending schema migrations at start-up.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Socket address for the HTTP listener, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 5] = [
        "TODO_HOST",
        "TODO_PORT",
        "TODO_DATABASE_URL",
        "TODO_DB_MAX_CONNECTIONS",
        "TODO_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("todo-backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TODO_HOST", Some("127.0.0.1".to_owned())),
            ("TODO_PORT", Some("9090".to_owned())),
            (
                "TODO_DATABASE_URL",
                Some("postgres://todo@localhost/todo".to_owned()),
            ),
            ("TODO_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("TODO_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9090)));
        assert_eq!(
            settings.database_url(),
            Some("postgres://todo@localhost/todo")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let mut guard_vars = VARS.map(|name| (name, None::<String>));
        guard_vars[2].1 = Some("   ".to_owned());
        let _guard = lock_env(guard_vars);

        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
