//! Firebase Realtime Database client — append-only prediction log.
//!
//! Uses the RTDB REST surface: one `POST` per prediction under
//! `/predictions.json`, authenticated with the database secret when one is
//! configured.

use super::{NotificationRecord, NOTIFY_TIMEOUT_SECS};

pub struct FirebaseClient {
    database_url: String,
    secret: Option<String>,
    client: reqwest::Client,
}

impl FirebaseClient {
    pub fn new(database_url: &str, secret: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            database_url: database_url.trim_end_matches('/').to_string(),
            secret,
            client,
        }
    }

    /// Push one prediction record. Returns whether the write succeeded;
    /// failures are logged and never propagated.
    pub async fn push_prediction(&self, record: &NotificationRecord) -> bool {
        let url = format!("{}/predictions.json", self.database_url);

        let mut request = self.client.post(&url).json(record);
        if let Some(secret) = &self.secret {
            request = request.query(&[("auth", secret.as_str())]);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("prediction pushed to Firebase");
                true
            }
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "Firebase rejected prediction write"
                );
                false
            }
            Err(e) => {
                tracing::warn!("failed to push prediction to Firebase: {e}");
                false
            }
        }
    }
}
