//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Every field is optional; the
//! accessors supply defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid listen host {host:?}: expected an IP address")]
    InvalidHost {
        /// Rejected value.
        host: String,
    },
    /// `store_timeout_ms` was zero.
    #[error("store timeout must be greater than zero")]
    ZeroStoreTimeout,
}

/// Runtime settings for the user API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct ServiceSettings {
    /// IP address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Upper bound for a single user store call, in milliseconds.
    pub store_timeout_ms: Option<u64>,
    /// PostgreSQL URL of the user store. Users are kept in memory when unset.
    pub store_url: Option<String>,
}

impl ServiceSettings {
    /// Socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost {
                    host: raw.to_owned(),
                })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Timeout applied to each store call.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroStoreTimeout`] for a zero timeout.
    pub fn store_timeout(&self) -> Result<Duration, SettingsError> {
        match self.store_timeout_ms.unwrap_or(DEFAULT_STORE_TIMEOUT_MS) {
            0 => Err(SettingsError::ZeroStoreTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }

    /// Configured store URL, ignoring blank values.
    pub fn store_url(&self) -> Option<&str> {
        self.store_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("user-api")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("USER_API_HOST", None::<String>),
            ("USER_API_PORT", None::<String>),
            ("USER_API_STORE_TIMEOUT_MS", None::<String>),
            ("USER_API_STORE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT))
        );
        assert_eq!(
            settings.store_timeout(),
            Ok(Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS))
        );
        assert_eq!(settings.store_url(), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_API_HOST", Some("127.0.0.1".to_owned())),
            ("USER_API_PORT", Some("9090".to_owned())),
            ("USER_API_STORE_TIMEOUT_MS", Some("250".to_owned())),
            (
                "USER_API_STORE_URL",
                Some("postgres://users@db:5432/booking".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:9090".parse().expect("socket address"))
        );
        assert_eq!(settings.store_timeout(), Ok(Duration::from_millis(250)));
        assert_eq!(
            settings.store_url(),
            Some("postgres://users@db:5432/booking")
        );
    }

    #[rstest]
    #[case("localhost")]
    #[case("not an address")]
    fn rejects_non_ip_hosts(#[case] host: &str) {
        let settings = ServiceSettings {
            host: Some(host.to_owned()),
            port: None,
            store_timeout_ms: None,
            store_url: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }

    #[rstest]
    fn rejects_zero_timeout() {
        let settings = ServiceSettings {
            host: None,
            port: None,
            store_timeout_ms: Some(0),
            store_url: None,
        };
        assert_eq!(settings.store_timeout(), Err(SettingsError::ZeroStoreTimeout));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), None)]
    #[case(Some(" postgres://db/users "), Some("postgres://db/users"))]
    fn store_url_ignores_blank_values(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let settings = ServiceSettings {
            host: None,
            port: None,
            store_timeout_ms: None,
            store_url: raw.map(str::to_owned),
        };
        assert_eq!(settings.store_url(), expected);
    }
}
