//! Runtime configuration read from the environment (and `.env`).

use std::{env, time::Duration};

use anyhow::Context as _;

use rusty_paginator::pagination::DEFAULT_TIMEOUT_SECS;

/// Bot settings resolved at startup.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    /// Idle seconds before a pagination session stops accepting input.
    pub pagination_timeout_secs: u64,
    /// Whether to publish slash commands when the gateway is ready.
    pub register_slash_commands: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("pagination_timeout_secs", &self.pagination_timeout_secs)
            .field("register_slash_commands", &self.register_slash_commands)
            .finish()
    }
}

impl Config {
    /// Load `.env` when present, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("DISCORD_TOKEN is not set")?;

        let pagination_timeout_secs = match lookup("PAGINATION_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let register_slash_commands = match lookup("REGISTER_SLASH_COMMANDS") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("REGISTER_SLASH_COMMANDS has invalid value `{raw}`"))?,
            None => true,
        };

        Ok(Self {
            token,
            pagination_timeout_secs,
            register_slash_commands,
        })
    }

    pub fn pagination_timeout(&self) -> Duration {
        Duration::from_secs(self.pagination_timeout_secs)
    }
}

fn parse_timeout(raw: &str) -> anyhow::Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("PAGINATION_TIMEOUT_SECS has invalid value `{raw}`"))?;
    anyhow::ensure!(secs > 0, "PAGINATION_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_token_is_set() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).expect("valid config");
        assert_eq!(config.token, "abc");
        assert_eq!(config.pagination_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.register_slash_commands);
    }

    #[test]
    fn missing_token_is_an_error() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PAGINATION_TIMEOUT_SECS", "300"),
            ("REGISTER_SLASH_COMMANDS", "off"),
        ])
        .expect("valid config");
        assert_eq!(config.pagination_timeout(), Duration::from_secs(300));
        assert!(!config.register_slash_commands);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("PAGINATION_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("PAGINATION_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("REGISTER_SLASH_COMMANDS", "maybe")]).is_err());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let config = config_from(&[("DISCORD_TOKEN", "secret-token")]).expect("valid config");
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
