//! Environment-driven configuration.
//!
//! Required resources (model, class indices, recommendations) have sensible
//! file-path defaults; credentials for the optional reporting channels have
//! no defaults at all and stay `None` until provided.

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Leafsense";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Classifier input edge length — uploads are stretched to this square.
pub const IMG_TARGET_SIZE: u32 = 224;

/// Predictions below this confidence are reported as `Unknown`.
/// Single global threshold, not per-class.
pub const CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Default `RUST_LOG`-style filter when the env var is unset.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// ONNX model file.
    pub model_path: PathBuf,
    /// JSON mapping of model output index → disease label.
    pub class_indices_path: PathBuf,
    /// JSON mapping of disease label → recommendation record.
    pub recommendations_path: PathBuf,
    /// Firebase Realtime Database base URL. Logging is disabled when unset.
    pub firebase_database_url: Option<String>,
    /// Firebase database secret appended as `?auth=`. Optional even when
    /// the database URL is set (public-write rules).
    pub firebase_database_secret: Option<String>,
    /// Telegram bot token. Notifications are disabled when unset.
    pub telegram_bot_token: Option<String>,
    /// Telegram chat to post scan alerts into.
    pub telegram_chat_id: Option<String>,
    /// Translation provider base URL (override for tests).
    pub translate_api_base: String,
    /// Telegram API base URL (override for tests).
    pub telegram_api_base: String,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("LEAFSENSE_BIND_ADDR", "0.0.0.0:8080"),
            model_path: env_or("LEAFSENSE_MODEL_PATH", "data/leafsense_model.onnx").into(),
            class_indices_path: env_or("LEAFSENSE_CLASS_INDICES_PATH", "data/class_indices.json")
                .into(),
            recommendations_path: env_or(
                "LEAFSENSE_RECOMMENDATIONS_PATH",
                "data/recommendations.json",
            )
            .into(),
            firebase_database_url: env_opt("FIREBASE_DATABASE_URL"),
            firebase_database_secret: env_opt("FIREBASE_DATABASE_SECRET"),
            telegram_bot_token: env_opt("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: env_opt("TELEGRAM_CHAT_ID"),
            translate_api_base: env_or(
                "TRANSLATE_API_BASE",
                crate::translate::DEFAULT_TRANSLATE_API_BASE,
            ),
            telegram_api_base: env_or(
                "TELEGRAM_API_BASE",
                crate::notify::DEFAULT_TELEGRAM_API_BASE,
            ),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Empty and whitespace-only values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
