use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub interview: InterviewConfig,
    pub audio: AudioConfig,
}

/// Interview server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server issuing session tokens and running analysis
    pub url: String,
    /// Base URL of the realtime speech API
    pub realtime_url: String,
    /// Realtime conversation model
    pub realtime_model: String,
}

/// Interview session configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterviewConfig {
    pub topic: String,
    pub language: String,
    /// Model used to transcribe candidate speech
    pub transcription_model: String,
    /// Server VAD silence threshold in milliseconds
    pub silence_duration_ms: u32,
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub device: Option<String>,
    pub sample_rate: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: defaults::SERVER_URL.to_string(),
            realtime_url: defaults::REALTIME_URL.to_string(),
            realtime_model: defaults::REALTIME_MODEL.to_string(),
        }
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            topic: defaults::DEFAULT_TOPIC.to_string(),
            language: defaults::LANGUAGE.to_string(),
            transcription_model: defaults::TRANSCRIPTION_MODEL.to_string(),
            silence_duration_ms: defaults::SILENCE_DURATION_MS,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VIVA_SERVER_URL → server.url
    /// - VIVA_TOPIC → interview.topic
    /// - VIVA_AUDIO_DEVICE → audio.device
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("VIVA_SERVER_URL")
            && !url.is_empty()
        {
            self.server.url = url;
        }

        if let Ok(topic) = std::env::var("VIVA_TOPIC")
            && !topic.is_empty()
        {
            self.interview.topic = topic;
        }

        if let Ok(device) = std::env::var("VIVA_AUDIO_DEVICE")
            && !device.is_empty()
        {
            self.audio.device = Some(device);
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/viva/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("viva")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_viva_env() {
        remove_env("VIVA_SERVER_URL");
        remove_env("VIVA_TOPIC");
        remove_env("VIVA_AUDIO_DEVICE");
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.server.url, "http://127.0.0.1:8006");
        assert_eq!(config.server.realtime_url, "wss://api.openai.com/v1/realtime");
        assert_eq!(config.server.realtime_model, "gpt-4o-realtime-preview");

        assert_eq!(config.interview.topic, "Product Designer");
        assert_eq!(config.interview.language, "en");
        assert_eq!(config.interview.transcription_model, "whisper-1");
        assert_eq!(config.interview.silence_duration_ms, 800);

        assert_eq!(config.audio.device, None);
        assert_eq!(config.audio.sample_rate, 16000);
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            [server]
            url = "https://interviews.example.com"
            realtime_model = "gpt-realtime"

            [interview]
            topic = "PCB Designer"
            silence_duration_ms = 1200

            [audio]
            device = "hw:0,0"
            sample_rate = 48000
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.server.url, "https://interviews.example.com");
        assert_eq!(config.server.realtime_model, "gpt-realtime");
        assert_eq!(config.interview.topic, "PCB Designer");
        assert_eq!(config.interview.silence_duration_ms, 1200);
        assert_eq!(config.audio.device, Some("hw:0,0".to_string()));
        assert_eq!(config.audio.sample_rate, 48000);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let toml_content = r#"
            [interview]
            topic = "Integration Engineer"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        // Only topic should be overridden
        assert_eq!(config.interview.topic, "Integration Engineer");

        // Everything else should be defaults
        assert_eq!(config.server.url, "http://127.0.0.1:8006");
        assert_eq!(config.interview.language, "en");
        assert_eq!(config.interview.silence_duration_ms, 800);
        assert_eq!(config.audio.sample_rate, 16000);
    }

    #[test]
    fn test_env_override_topic() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_viva_env();

        set_env("VIVA_TOPIC", "Mechanical Designer");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.interview.topic, "Mechanical Designer");
        assert_eq!(config.server.url, "http://127.0.0.1:8006"); // Not overridden

        clear_viva_env();
    }

    #[test]
    fn test_env_override_all() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_viva_env();

        set_env("VIVA_SERVER_URL", "http://10.0.0.2:9000");
        set_env("VIVA_TOPIC", "Procurement Specialist");
        set_env("VIVA_AUDIO_DEVICE", "pulse");

        let config = Config::default().with_env_overrides();

        assert_eq!(config.server.url, "http://10.0.0.2:9000");
        assert_eq!(config.interview.topic, "Procurement Specialist");
        assert_eq!(config.audio.device, Some("pulse".to_string()));

        clear_viva_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_viva_env();

        set_env("VIVA_TOPIC", "");
        let config = Config::default().with_env_overrides();

        // Empty string should not override default
        assert_eq!(config.interview.topic, "Product Designer");

        clear_viva_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [server
            url = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());

        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_viva_config_12345.toml");
        let config = Config::load_or_default(missing_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_errors_on_invalid_toml() {
        let invalid_toml = r#"
            [server
            url = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        // Invalid TOML is an error, not silently defaults
        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_default_path_is_xdg_compliant() {
        let path = Config::default_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("viva"));
        assert!(path_str.ends_with("config.toml"));
    }
}
