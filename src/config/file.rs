//! TOML configuration file loading
//!
//! Supports `~/.config/voicebridge/config.toml` as a persistent config
//! source. All fields are optional — the file is a partial overlay beneath
//! environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Chat-completion service
    #[serde(default)]
    pub chat: ChatFileConfig,

    /// Speech-to-text service
    #[serde(default)]
    pub stt: SttFileConfig,

    /// Text-to-speech service
    #[serde(default)]
    pub tts: TtsFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// Chat-completion service configuration
#[derive(Debug, Default, Deserialize)]
pub struct ChatFileConfig {
    pub api_key: Option<String>,

    /// Model identifier (e.g. "gpt-4")
    pub model: Option<String>,

    /// Output-length bound for replies
    pub max_tokens: Option<u32>,

    /// System instruction prepended to every conversation
    pub system_prompt: Option<String>,
}

/// Speech-to-text service configuration
#[derive(Debug, Default, Deserialize)]
pub struct SttFileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

/// Text-to-speech service configuration
#[derive(Debug, Default, Deserialize)]
pub struct TtsFileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,

    /// Voice identifier (e.g. "en-US_AllisonV3Voice")
    pub voice: Option<String>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// HTTP server port
    pub port: Option<u16>,

    /// Directory of static frontend files served at `/`
    pub static_dir: Option<PathBuf>,

    /// Directory for per-request synthesis capture files
    pub capture_dir: Option<PathBuf>,
}

/// Load the TOML config file from the standard path
///
/// Returns `ConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> ConfigFile {
    let Some(path) = config_file_path() else {
        return ConfigFile::default();
    };

    if !path.exists() {
        return ConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                ConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            ConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/voicebridge/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("voicebridge").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [chat]
            api_key = "sk-test"
            model = "gpt-4"

            [tts]
            voice = "en-US_MichaelV3Voice"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(file.chat.api_key.as_deref(), Some("sk-test"));
        assert_eq!(file.chat.model.as_deref(), Some("gpt-4"));
        assert!(file.chat.max_tokens.is_none());
        assert!(file.stt.api_key.is_none());
        assert_eq!(file.tts.voice.as_deref(), Some("en-US_MichaelV3Voice"));
        assert_eq!(file.server.port, Some(8080));
        assert!(file.server.capture_dir.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.chat.api_key.is_none());
        assert!(file.stt.base_url.is_none());
        assert!(file.tts.base_url.is_none());
        assert!(file.server.port.is_none());
    }
}
