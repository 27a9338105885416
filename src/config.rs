use std::env;
use std::str::FromStr;

use tracing::Level;

use crate::error::Error;

/// Server settings, read from the environment (and a `.env` file if there is
/// one).
#[derive(Clone, Debug)]
pub struct Config {
    /// `DB_URI`
    pub database_uri: String,
    /// `DB_NAME`
    pub database_name: String,
    /// `BIND_ADDRESS`
    pub bind_address: String,
    /// `SEED_DATABASE`: drop everything and load sample data on startup.
    pub seed_database: bool,
    /// `LOG_LEVEL`
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        // a missing .env file is fine
        dotenvy::dotenv().ok();

        Config::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Config, Error> {
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        Ok(Config {
            database_uri: or_default("DB_URI", "mongodb://localhost:27017"),
            database_name: or_default("DB_NAME", "camp"),
            bind_address: or_default("BIND_ADDRESS", "127.0.0.1:5555"),
            seed_database: parse_flag("SEED_DATABASE", var("SEED_DATABASE"))?,
            log_level: parse("LOG_LEVEL", or_default("LOG_LEVEL", "debug"))?,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| Error::InvalidConfiguration { key, value })
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, Error> {
    let normalized = value.as_deref().map(str::to_ascii_lowercase);

    match normalized.as_deref() {
        None | Some("") | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(_) => Err(Error::InvalidConfiguration {
            key,
            value: value.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();

        assert_eq!(config.database_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "camp");
        assert_eq!(config.bind_address, "127.0.0.1:5555");
        assert!(!config.seed_database);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DB_URI", "mongodb://db:27017"),
            ("DB_NAME", "summer"),
            ("BIND_ADDRESS", "0.0.0.0:8080"),
            ("SEED_DATABASE", "TRUE"),
            ("LOG_LEVEL", "warn"),
        ])
        .unwrap();

        assert_eq!(config.database_uri, "mongodb://db:27017");
        assert_eq!(config.database_name, "summer");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert!(config.seed_database);
        assert_eq!(config.log_level, Level::WARN);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config(&[("LOG_LEVEL", "loud")]).unwrap_err(),
            Error::InvalidConfiguration {
                key: "LOG_LEVEL",
                value: "loud".into()
            }
        );
        assert_eq!(
            config(&[("SEED_DATABASE", "maybe")]).unwrap_err(),
            Error::InvalidConfiguration {
                key: "SEED_DATABASE",
                value: "maybe".into()
            }
        );
    }
}
