use serde::Deserialize;
use std::env;
use tripfare_core::Currency;
use tripfare_offer::SortMode;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub results: ResultsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Defaults applied when a results request leaves a choice open.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ResultsConfig {
    #[serde(default)]
    pub default_sort: SortMode,
    #[serde(default)]
    pub default_currency: Currency,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

fn default_log_filter() -> String {
    "tripfare_api=debug,tower_http=debug".into()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment and local overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `TRIPFARE__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("TRIPFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_section_defaults() {
        let config: Config = serde_json::from_str(r#"{ "server": { "port": 8080 } }"#).unwrap();
        assert_eq!(config.results.default_sort, SortMode::Relevant);
        assert_eq!(config.results.default_currency, Currency::Usd);
        assert_eq!(config.log.filter, default_log_filter());
    }

    #[test]
    fn test_results_section_overrides() {
        let config: Config = serde_json::from_str(
            r#"{
                "server": { "port": 9000 },
                "results": { "default_sort": "price_asc", "default_currency": "EUR" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.results.default_sort, SortMode::PriceAsc);
        assert_eq!(config.results.default_currency, Currency::Eur);
    }
}
