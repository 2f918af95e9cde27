//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend service endpoints.
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Audio artifact storage settings.
    #[serde(default)]
    pub audio: AudioConfig,

    /// Dialogue settings.
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL used to build artifact links and gather callbacks.
    /// Telephony providers fetch audio from here, so it must be reachable
    /// from outside.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Endpoints of the backend services reached over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendsConfig {
    /// Speech-synthesis service base URL.
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Speech-recognition service base URL.
    #[serde(default = "default_asr_url")]
    pub asr_url: String,

    /// Direct language-model completion endpoint base URL.
    #[serde(default = "default_llm_url")]
    pub llm_url: String,

    /// Workflow-execution engine base URL.
    #[serde(default = "default_workflow_url")]
    pub workflow_url: String,

    /// Workflow flow id. Non-empty selects the workflow responder instead of
    /// the direct completion endpoint. Static per process.
    #[serde(default)]
    pub workflow_flow_id: String,
}

/// Audio artifact storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Directory where synthesized artifacts are written.
    #[serde(default = "default_audio_dir")]
    pub dir: String,

    /// Artifact time-to-live in seconds for the background sweep.
    /// 0 disables eviction.
    #[serde(default = "default_audio_ttl_seconds")]
    pub ttl_seconds: u64,
}

/// Dialogue configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Persona / system-instruction text constraining responder replies.
    #[serde(default = "default_persona")]
    pub persona: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hotline_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    format!("http://localhost:{}", default_port())
}

fn default_tts_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_asr_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_llm_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_workflow_url() -> String {
    "http://localhost:7860".to_string()
}

fn default_audio_dir() -> String {
    "./audio_cache".to_string()
}

fn default_audio_ttl_seconds() -> u64 {
    3600
}

fn default_persona() -> String {
    "You are a helpful AI voice assistant. \
     Keep your responses brief and conversational - aim for 1-2 sentences. \
     You're speaking on a phone call, so be natural and friendly."
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            tts_url: default_tts_url(),
            asr_url: default_asr_url(),
            llm_url: default_llm_url(),
            workflow_url: default_workflow_url(),
            workflow_flow_id: String::new(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            dir: default_audio_dir(),
            ttl_seconds: default_audio_ttl_seconds(),
        }
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `HOTLINE_HOST` overrides `server.host`
/// - `HOTLINE_PORT` overrides `server.port`
/// - `HOTLINE_PUBLIC_URL` overrides `server.public_url`
/// - `HOTLINE_TTS_URL` / `HOTLINE_ASR_URL` / `HOTLINE_LLM_URL` override the
///   matching backend URLs
/// - `HOTLINE_WORKFLOW_URL` / `HOTLINE_WORKFLOW_FLOW_ID` override the
///   workflow endpoint selection
/// - `HOTLINE_AUDIO_DIR` overrides `audio.dir`
/// - `HOTLINE_AUDIO_TTL_SECONDS` overrides `audio.ttl_seconds`
/// - `HOTLINE_PERSONA` overrides `dialogue.persona`
/// - `HOTLINE_LOG_LEVEL` overrides `logging.level`
/// - `HOTLINE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("HOTLINE_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("HOTLINE_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(url) = std::env::var("HOTLINE_PUBLIC_URL") {
        config.server.public_url = url;
    }
    if let Ok(url) = std::env::var("HOTLINE_TTS_URL") {
        config.backends.tts_url = url;
    }
    if let Ok(url) = std::env::var("HOTLINE_ASR_URL") {
        config.backends.asr_url = url;
    }
    if let Ok(url) = std::env::var("HOTLINE_LLM_URL") {
        config.backends.llm_url = url;
    }
    if let Ok(url) = std::env::var("HOTLINE_WORKFLOW_URL") {
        config.backends.workflow_url = url;
    }
    if let Ok(flow_id) = std::env::var("HOTLINE_WORKFLOW_FLOW_ID") {
        config.backends.workflow_flow_id = flow_id;
    }
    if let Ok(dir) = std::env::var("HOTLINE_AUDIO_DIR") {
        config.audio.dir = dir;
    }
    if let Ok(ttl) = std::env::var("HOTLINE_AUDIO_TTL_SECONDS") {
        if let Ok(parsed) = ttl.parse() {
            config.audio.ttl_seconds = parsed;
        }
    }
    if let Ok(persona) = std::env::var("HOTLINE_PERSONA") {
        config.dialogue.persona = persona;
    }
    if let Ok(level) = std::env::var("HOTLINE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("HOTLINE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}
