use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // The service runs with no config files at all; the files
            // below only override the built-in defaults.
            .set_default("server.port", 8080)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SLOTWISE__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("SLOTWISE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
