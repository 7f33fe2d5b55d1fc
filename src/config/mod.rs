mod basic;

pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges, in increasing priority: defaults, `config.toml` if present,
    /// the bare `PORT` variable, and `WIKI_`-prefixed variables (`WIKI_BASIC__LISTEN_PORT`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment
            .merge(
                Env::raw()
                    .only(&["PORT"])
                    .map(|_| "basic.listen_port".into()),
            )
            .merge(Env::prefixed("WIKI_").split("__"))
    }

    /// Loads configuration from all sources.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|err| panic!("failed to extract configuration: {err}"))
});

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::net::Ipv4Addr;

    #[test]
    fn defaults_apply_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load()?;
            assert_eq!(cfg.basic.listen_port, 5000);
            assert_eq!(cfg.basic.listen_addr, Ipv4Addr::new(0, 0, 0, 0));
            assert_eq!(cfg.basic.database_path, PathBuf::from("instance/game.db"));
            assert_eq!(cfg.basic.loglevel, "info");
            Ok(())
        });
    }

    #[test]
    fn toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [basic]
                listen_port = 7000
                database_path = "data/wiki.db"
                loglevel = "debug"
                "#,
            )?;
            let cfg = Config::load()?;
            assert_eq!(cfg.basic.listen_port, 7000);
            assert_eq!(cfg.basic.database_path, PathBuf::from("data/wiki.db"));
            assert_eq!(cfg.basic.loglevel, "debug");

            jail.set_env("PORT", "8080");
            assert_eq!(Config::load()?.basic.listen_port, 8080);

            jail.set_env("WIKI_BASIC__LISTEN_PORT", "9090");
            assert_eq!(Config::load()?.basic.listen_port, 9090);
            Ok(())
        });
    }
}
