//! Best-effort side-channel reporting — Firebase log + Telegram photo post.
//!
//! Both channels are optional: availability is decided once at construction
//! from configuration, and an unconfigured channel is skipped with a debug
//! log. Neither channel can ever fail the request that triggered it.

use serde::Serialize;

use crate::config::Config;
use crate::translate::{ui_caption, LocalizedRecommendation};

mod firebase;
mod telegram;

pub use firebase::FirebaseClient;
pub use telegram::TelegramClient;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Upper bound on each outbound notification call. One attempt, no retries.
const NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Documentation placeholder values — configs that still carry these are
/// treated as unconfigured rather than sent to the provider.
const TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN";
const CHAT_ID_PLACEHOLDER: &str = "YOUR_CHAT_ID";

/// What one prediction event looks like in the append-only store.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    /// RFC 3339 event timestamp.
    pub timestamp: String,
    pub predicted_class: String,
    pub confidence: f32,
    pub recommendations: LocalizedRecommendation,
}

/// Both reporting channels, each enabled only when fully configured.
pub struct Notifier {
    firebase: Option<FirebaseClient>,
    telegram: Option<TelegramClient>,
}

impl Notifier {
    /// Decide channel availability from configuration, once.
    pub fn from_config(config: &Config) -> Self {
        let firebase = match &config.firebase_database_url {
            Some(url) => {
                tracing::info!("Firebase prediction logging enabled");
                Some(FirebaseClient::new(
                    url,
                    config.firebase_database_secret.clone(),
                ))
            }
            None => {
                tracing::warn!("Firebase database URL not set; prediction logging disabled");
                None
            }
        };

        let telegram = match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id))
                if token != TOKEN_PLACEHOLDER && chat_id != CHAT_ID_PLACEHOLDER =>
            {
                tracing::info!("Telegram notifications enabled");
                Some(TelegramClient::new(&config.telegram_api_base, token, chat_id))
            }
            (Some(_), Some(_)) => {
                tracing::warn!(
                    "Telegram credentials look like placeholders; notifications disabled"
                );
                None
            }
            _ => {
                tracing::warn!("Telegram credentials not set; notifications disabled");
                None
            }
        };

        Self { firebase, telegram }
    }

    /// A notifier with both channels off (tests, degraded startup).
    pub fn disabled() -> Self {
        Self {
            firebase: None,
            telegram: None,
        }
    }

    /// Report one prediction on every enabled channel, serially.
    /// Each channel degrades independently; nothing propagates to the caller.
    pub async fn report(&self, record: &NotificationRecord, photo_jpeg: Vec<u8>, caption: &str) {
        match &self.firebase {
            Some(firebase) => {
                firebase.push_prediction(record).await;
            }
            None => tracing::debug!("Firebase not configured; skipping prediction log"),
        }

        match &self.telegram {
            Some(telegram) => {
                telegram.send_photo(photo_jpeg, caption).await;
            }
            None => tracing::debug!("Telegram not configured; skipping notification"),
        }
    }
}

/// Format the Telegram caption: HTML scan alert with translated UI captions
/// and bulleted treatment/prevention lists.
pub fn format_caption(
    predicted_class: &str,
    confidence: f32,
    rec: &LocalizedRecommendation,
) -> String {
    let overview_ui = ui_caption("Overview", &rec.language);
    let treatment_ui = ui_caption("Treatment", &rec.language);
    let prevention_ui = ui_caption("Prevention", &rec.language);

    let treatment_list = bullet_list(&rec.treatment);
    let prevention_list = bullet_list(&rec.prevention);

    format!(
        "🌱 <b>New Plant Health Scan Alert!</b>\n\
         ────────────────────\n\
         🚨 <b>Disease:</b> <code>{predicted_class}</code>\n\
         📊 <b>Confidence:</b> <b>{confidence_pct:.2}%</b>\n\
         🌐 <b>Translated to:</b> <i>{language_name}</i>\n\
         ────────────────────\n\
         \n\
         📋 <b>{overview_ui}</b>\n\
         {overview}\n\
         \n\
         💊 <b>{treatment_ui}</b> (Action Required)\n\
         {treatment_list}\n\
         \n\
         🛡️ <b>{prevention_ui}</b> (Long-term Strategy)\n\
         {prevention_list}",
        confidence_pct = confidence * 100.0,
        language_name = rec.language_name,
        overview = rec.overview,
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!(" • {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
