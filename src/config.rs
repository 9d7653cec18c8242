use std::fmt;
use std::path::{Path, PathBuf};

use ::config::{Environment, File};
use serde::Deserialize;

use crate::error::BotError;
use crate::logging::LogLevel;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub twitch: TwitchConfig,
    #[serde(default)]
    pub log_level: LogLevel,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TwitchConfig {
    pub bot: TwitchBotConfig,
}

/// Connection settings for the bot account.
#[derive(Deserialize, Clone)]
pub struct TwitchBotConfig {
    pub name: String,
    pub oauth: String,
    pub channel: String,
}

impl fmt::Debug for TwitchBotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitchBotConfig")
            .field("name", &self.name)
            .field("oauth", &mask_secret(&self.oauth))
            .field("channel", &self.channel)
            .finish()
    }
}

impl Config {
    const CONFIG_PATH: &'static str = "gamerbot.toml";
    const SECRETS_PATH: &'static str = "gamerbot.local.toml";
    const ENV_PREFIX: &'static str = "GAMERBOT";

    /// Loads `gamerbot.toml`, then `gamerbot.local.toml` and `GAMERBOT__*`
    /// environment variables on top of it.
    pub fn new() -> Result<Self, BotError> {
        Self::load_from(Path::new(Self::CONFIG_PATH), Path::new(Self::SECRETS_PATH))
    }

    /// Same as [`Config::new`] but with explicit file locations. The base
    /// file is required, the secrets file is optional.
    pub fn load_from(base: &Path, secrets: &Path) -> Result<Self, BotError> {
        Self::load_layers(base, secrets, Self::ENV_PREFIX)
    }

    fn load_layers(base: &Path, secrets: &Path, env_prefix: &str) -> Result<Self, BotError> {
        let config = ::config::Config::builder()
            .add_source(File::from(base).required(true))
            .add_source(File::from(secrets).required(false))
            .add_source(Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        let config: Config = config.try_deserialize()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Directory-relative variant used when the files live next to each other.
    pub fn load_from_dir(dir: &Path) -> Result<Self, BotError> {
        let base: PathBuf = dir.join(Self::CONFIG_PATH);
        let secrets: PathBuf = dir.join(Self::SECRETS_PATH);
        Self::load_from(&base, &secrets)
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const BASE: &str = r#"
log_level = "debug"

[twitch.bot]
name = "gamerbot"
oauth = ""
channel = "somechannel"
"#;

    #[test]
    fn test_secrets_file_overrides_base() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("gamerbot.toml"), BASE).unwrap();
        fs::write(
            dir.path().join("gamerbot.local.toml"),
            "[twitch.bot]\noauth = \"oauth:abc123\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.twitch.bot.name, "gamerbot");
        assert_eq!(config.twitch.bot.oauth, "oauth:abc123");
        assert_eq!(config.twitch.bot.channel, "somechannel");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_secrets_file_is_optional() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("gamerbot.toml"), BASE).unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.twitch.bot.oauth, "");
    }

    #[test]
    fn test_missing_base_file_fails() {
        let dir = tempdir().unwrap();
        let result = Config::load_from_dir(dir.path());
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_missing_key_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("gamerbot.toml"),
            "[twitch.bot]\nname = \"gamerbot\"\noauth = \"x\"\n",
        )
        .unwrap();

        let result = Config::load_from_dir(dir.path());
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_log_level_defaults_to_info() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("gamerbot.toml"),
            "[twitch.bot]\nname = \"a\"\noauth = \"b\"\nchannel = \"c\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_environment_overrides_files() {
        // Own prefix so the other tests never see this variable.
        const PREFIX: &str = "GAMERBOT_ENVTEST";
        const VAR: &str = "GAMERBOT_ENVTEST__TWITCH__BOT__OAUTH";

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("gamerbot.toml"), BASE).unwrap();
        fs::write(
            dir.path().join("gamerbot.local.toml"),
            "[twitch.bot]\noauth = \"oauth:fromfile\"\n",
        )
        .unwrap();

        std::env::set_var(VAR, "oauth:fromenv");
        let result = Config::load_layers(
            &dir.path().join("gamerbot.toml"),
            &dir.path().join("gamerbot.local.toml"),
            PREFIX,
        );
        std::env::remove_var(VAR);

        let config = result.unwrap();
        assert_eq!(config.twitch.bot.oauth, "oauth:fromenv");
        assert_eq!(config.twitch.bot.name, "gamerbot");
        assert_eq!(config.twitch.bot.channel, "somechannel");
    }

    #[test]
    fn test_debug_output_masks_oauth() {
        let settings = TwitchBotConfig {
            name: "gamerbot".to_string(),
            oauth: "oauth:supersecret".to_string(),
            channel: "somechannel".to_string(),
        };
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("supersecret"));
        assert!(printed.contains("somechannel"));
    }
}
