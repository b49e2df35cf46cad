//! Configuration management for voicebridge
//!
//! All configuration is collected into one [`Config`] built at process
//! start and passed by reference to the components that need it. A missing
//! credential never prevents startup — it only disables the corresponding
//! capability at request time.

pub mod file;

use std::path::PathBuf;

/// Default HTTP port (matches the original frontend's expectation)
pub const DEFAULT_PORT: u16 = 5000;

/// System instruction prepended to every chat conversation
pub const DEFAULT_SYSTEM_PROMPT: &str = "Act as a personal assistant. You can respond to \
    questions, translate sentences, summarize news, and give recommendations.";

/// Default chat-completion model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";

/// Default output-length bound for chat replies
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default synthesis voice
pub const DEFAULT_TTS_VOICE: &str = "en-US_AllisonV3Voice";

/// Voicebridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completion service
    pub chat: ChatConfig,

    /// Speech-to-text service
    pub stt: SttConfig,

    /// Text-to-speech service
    pub tts: TtsConfig,

    /// HTTP server port
    pub port: u16,

    /// Directory of static frontend files served at `/`
    pub static_dir: Option<PathBuf>,

    /// Directory for per-request synthesis capture files (disabled when unset)
    pub capture_dir: Option<PathBuf>,
}

/// Chat-completion service configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key; requests fail with `not_configured` when absent
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Output-length bound for replies
    pub max_tokens: u32,

    /// System instruction prepended to every conversation
    pub system_prompt: String,
}

/// Speech-to-text service configuration
#[derive(Debug, Clone)]
pub struct SttConfig {
    /// API key; requests fail with `not_configured` when absent
    pub api_key: Option<String>,

    /// Service base URL (the `/v1/recognize` path is appended)
    pub base_url: Option<String>,
}

/// Text-to-speech service configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key; requests fail with `not_configured` when absent
    pub api_key: Option<String>,

    /// Service base URL (the `/v1/synthesize` path is appended)
    pub base_url: Option<String>,

    /// Voice identifier
    pub voice: String,
}

impl Config {
    /// Load configuration with env > TOML file > default precedence
    ///
    /// Never fails: absent credentials degrade the matching capability at
    /// request time instead of aborting startup.
    #[must_use]
    pub fn load() -> Self {
        Self::from_file(file::load_config_file())
    }

    /// Overlay process environment variables on a parsed config file
    #[must_use]
    pub fn from_file(fc: file::ConfigFile) -> Self {
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Overlay an environment lookup on a parsed config file
    ///
    /// The lookup is injected so precedence can be tested without mutating
    /// process-wide environment state.
    fn from_sources(fc: file::ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let chat = ChatConfig {
            api_key: env("OPENAI_API_KEY").or(fc.chat.api_key),
            model: env("VOICEBRIDGE_CHAT_MODEL")
                .or(fc.chat.model)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            max_tokens: env("VOICEBRIDGE_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .or(fc.chat.max_tokens)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            system_prompt: fc
                .chat
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        };

        let stt = SttConfig {
            api_key: env("STT_API_KEY").or(fc.stt.api_key),
            base_url: env("STT_URL").or(fc.stt.base_url),
        };

        let tts = TtsConfig {
            api_key: env("TTS_API_KEY").or(fc.tts.api_key),
            base_url: env("TTS_URL").or(fc.tts.base_url),
            voice: env("VOICEBRIDGE_TTS_VOICE")
                .or(fc.tts.voice)
                .unwrap_or_else(|| DEFAULT_TTS_VOICE.to_string()),
        };

        let port = env("VOICEBRIDGE_PORT")
            .or_else(|| env("PORT"))
            .and_then(|s| s.parse().ok())
            .or(fc.server.port)
            .unwrap_or(DEFAULT_PORT);

        let static_dir = env("VOICEBRIDGE_STATIC_DIR")
            .map(PathBuf::from)
            .or(fc.server.static_dir);

        let capture_dir = env("VOICEBRIDGE_CAPTURE_DIR")
            .map(PathBuf::from)
            .or(fc.server.capture_dir);

        Self {
            chat,
            stt,
            tts,
            port,
            static_dir,
            capture_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_file_and_env_are_empty() {
        let config = Config::from_sources(file::ConfigFile::default(), no_env);

        assert!(config.chat.api_key.is_none());
        assert_eq!(config.chat.model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.chat.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.chat.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert!(config.stt.api_key.is_none());
        assert!(config.tts.base_url.is_none());
        assert_eq!(config.tts.voice, DEFAULT_TTS_VOICE);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.static_dir.is_none());
        assert!(config.capture_dir.is_none());
    }

    #[test]
    fn file_values_beat_defaults() {
        let fc: file::ConfigFile = toml::from_str(
            r#"
            [chat]
            api_key = "sk-file"
            model = "gpt-3.5-turbo"
            max_tokens = 256

            [stt]
            api_key = "stt-file"
            base_url = "https://stt.example"

            [tts]
            voice = "en-US_MichaelV3Voice"

            [server]
            port = 8080
            capture_dir = "/tmp/captures"
            "#,
        )
        .unwrap();

        let config = Config::from_sources(fc, no_env);

        assert_eq!(config.chat.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.chat.model, "gpt-3.5-turbo");
        assert_eq!(config.chat.max_tokens, 256);
        assert_eq!(config.stt.api_key.as_deref(), Some("stt-file"));
        assert_eq!(config.stt.base_url.as_deref(), Some("https://stt.example"));
        assert_eq!(config.tts.voice, "en-US_MichaelV3Voice");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.capture_dir.as_deref(),
            Some(std::path::Path::new("/tmp/captures"))
        );
    }

    #[test]
    fn env_values_beat_file_values() {
        let fc: file::ConfigFile = toml::from_str(
            r#"
            [chat]
            api_key = "sk-file"
            model = "gpt-3.5-turbo"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        let config = Config::from_sources(fc, |key| match key {
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            "VOICEBRIDGE_CHAT_MODEL" => Some("gpt-4".to_string()),
            "VOICEBRIDGE_PORT" => Some("9090".to_string()),
            _ => None,
        });

        assert_eq!(config.chat.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.chat.model, "gpt-4");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn port_falls_back_from_voicebridge_port_to_port() {
        let config = Config::from_sources(file::ConfigFile::default(), |key| match key {
            "PORT" => Some("7070".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 7070);

        let config = Config::from_sources(file::ConfigFile::default(), |key| match key {
            "VOICEBRIDGE_PORT" => Some("6060".to_string()),
            "PORT" => Some("7070".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 6060);
    }

    #[test]
    fn unparseable_port_falls_through_to_file() {
        let fc: file::ConfigFile = toml::from_str("[server]\nport = 8080").unwrap();

        let config = Config::from_sources(fc, |key| match key {
            "VOICEBRIDGE_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 8080);
    }
}
