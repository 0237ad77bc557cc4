//! Telegram client — posts the scanned photo with an HTML caption.

use super::NOTIFY_TIMEOUT_SECS;

pub struct TelegramClient {
    api_base: String,
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, chat_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            client,
        }
    }

    /// Send the photo via `sendPhoto`. Returns whether Telegram accepted it;
    /// failures are logged and never propagated.
    pub async fn send_photo(&self, photo_jpeg: Vec<u8>, caption: &str) -> bool {
        let url = format!("{}/bot{}/sendPhoto", self.api_base, self.token);

        let photo = match reqwest::multipart::Part::bytes(photo_jpeg)
            .file_name("leaf_scan.jpg")
            .mime_str("image/jpeg")
        {
            Ok(part) => part,
            Err(e) => {
                tracing::warn!("failed to build Telegram photo part: {e}");
                return false;
            }
        };

        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("parse_mode", "HTML")
            .text("caption", caption.to_string())
            .part("photo", photo);

        match self.client.post(&url).multipart(form).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Telegram notification sent");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(%status, body, "Telegram rejected notification");
                false
            }
            Err(e) => {
                tracing::warn!("failed to send Telegram notification: {e}");
                false
            }
        }
    }
}
