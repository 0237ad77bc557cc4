//! Translation — recommendation text and UI captions in the caller's language.
//!
//! Text translation goes through the Google translate web endpoint (the same
//! provider the production deployment used), one attempt, degrade-to-English
//! on any failure. UI captions are a pure lookup against a small static map.

use serde::Serialize;

use crate::recommend::RecommendationRecord;

pub const DEFAULT_TRANSLATE_API_BASE: &str = "https://translate.googleapis.com";

/// Source language of all recommendation text and UI captions.
const SOURCE_LANGUAGE: &str = "en";

/// Upper bound on one translation call. One attempt, no retries.
const TRANSLATE_TIMEOUT_SECS: u64 = 10;

// ═══════════════════════════════════════════════════════════
// Language tables
// ═══════════════════════════════════════════════════════════

/// Display names for the languages the upload form offers.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ig", "Igbo"),
    ("ha", "Hausa"),
    ("yo", "Yoruba"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("de", "German"),
];

/// Pre-translated UI captions. Entries missing a language fall back to English.
const UI_TEXT: &[(&str, &[(&str, &str)])] = &[
    ("Overview", &[("en", "Overview"), ("ig", "Nleleanya")]),
    ("Treatment", &[("en", "Treatment"), ("ig", "Ọgwụgwọ")]),
    ("Prevention", &[("en", "Prevention"), ("ig", "Mgbochi")]),
];

/// Human-readable name for a language code; unknown codes are upper-cased.
pub fn language_name(code: &str) -> String {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// UI caption for a key in the requested language.
///
/// When the translated caption differs from English the English original is
/// kept in parentheses, e.g. `"Nleleanya (Overview)"`. Unknown keys return
/// the key itself.
pub fn ui_caption(key: &str, lang: &str) -> String {
    let entry = UI_TEXT.iter().find(|(k, _)| *k == key);
    let Some((_, translations)) = entry else {
        return key.to_string();
    };

    let english = translations
        .iter()
        .find(|(c, _)| *c == SOURCE_LANGUAGE)
        .map(|(_, text)| *text)
        .unwrap_or(key);

    let translated = translations
        .iter()
        .find(|(c, _)| *c == lang)
        .map(|(_, text)| *text)
        .unwrap_or(english);

    if translated.to_lowercase() != english.to_lowercase() {
        format!("{translated} ({english})")
    } else {
        english.to_string()
    }
}

// ═══════════════════════════════════════════════════════════
// Localized output
// ═══════════════════════════════════════════════════════════

/// A recommendation record translated for the caller, plus language metadata.
/// This is both the response body's `recommendations` object and the payload
/// handed to the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedRecommendation {
    pub overview: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub language: String,
    pub language_name: String,
}

// ═══════════════════════════════════════════════════════════
// Translation client
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
enum TranslationError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected response shape from translation provider")]
    Shape,
}

/// HTTP client for the translation provider.
///
/// Never surfaces errors to callers: every public method returns the input
/// unchanged when the provider is unreachable, slow, or returns garbage.
pub struct TranslationClient {
    base_url: String,
    client: reqwest::Client,
}

impl TranslationClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TRANSLATE_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Translate a single string. Identity for English and empty input.
    pub async fn translate_text(&self, text: &str, lang: &str) -> String {
        if lang == SOURCE_LANGUAGE || text.trim().is_empty() {
            return text.to_string();
        }

        match self.request(text, lang).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(lang, "translation failed, returning original text: {e}");
                text.to_string()
            }
        }
    }

    /// Translate a list of strings, preserving order. Identity for English.
    pub async fn translate_lines(&self, lines: &[String], lang: &str) -> Vec<String> {
        if lang == SOURCE_LANGUAGE {
            return lines.to_vec();
        }

        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            out.push(self.translate_text(line, lang).await);
        }
        out
    }

    /// Translate a whole recommendation record and attach language metadata.
    pub async fn localize(
        &self,
        record: &RecommendationRecord,
        lang: &str,
    ) -> LocalizedRecommendation {
        LocalizedRecommendation {
            overview: self.translate_text(&record.overview, lang).await,
            treatment: self.translate_lines(&record.treatment, lang).await,
            prevention: self.translate_lines(&record.prevention, lang).await,
            language: lang.to_string(),
            language_name: language_name(lang),
        }
    }

    async fn request(&self, text: &str, lang: &str) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", SOURCE_LANGUAGE),
                ("tl", lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?;

        let value: serde_json::Value = response.json().await?;
        parse_translation(&value).ok_or(TranslationError::Shape)
    }
}

/// Pull the translated text out of the provider's nested-array response:
/// `[[["translated", "original", ...], ...], ...]` — one entry per segment,
/// concatenated in order.
fn parse_translation(value: &serde_json::Value) -> Option<String> {
    let segments = value.get(0)?.as_array()?;

    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(|p| p.as_str()) {
            out.push_str(part);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    // ── Pure lookups ─────────────────────────────────────────

    #[test]
    fn language_name_known_codes() {
        assert_eq!(language_name("en"), "English");
        assert_eq!(language_name("ig"), "Igbo");
        assert_eq!(language_name("sw"), "Swahili");
    }

    #[test]
    fn language_name_unknown_code_uppercased() {
        assert_eq!(language_name("pt"), "PT");
    }

    #[test]
    fn ui_caption_english_is_bare_key() {
        assert_eq!(ui_caption("Overview", "en"), "Overview");
        assert_eq!(ui_caption("Treatment", "en"), "Treatment");
    }

    #[test]
    fn ui_caption_translated_keeps_english_in_parens() {
        assert_eq!(ui_caption("Overview", "ig"), "Nleleanya (Overview)");
        assert_eq!(ui_caption("Prevention", "ig"), "Mgbochi (Prevention)");
    }

    #[test]
    fn ui_caption_missing_language_falls_back_to_english() {
        assert_eq!(ui_caption("Overview", "fr"), "Overview");
    }

    #[test]
    fn ui_caption_unknown_key_is_identity() {
        assert_eq!(ui_caption("Diagnosis", "en"), "Diagnosis");
    }

    // ── Identity paths (no network) ──────────────────────────

    fn unreachable_client() -> TranslationClient {
        // Port 9 (discard) — never listened on in tests; any accidental
        // request fails fast with connection refused.
        TranslationClient::new("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn english_text_is_identity() {
        let client = unreachable_client();
        let out = client.translate_text("Remove infected leaves.", "en").await;
        assert_eq!(out, "Remove infected leaves.");
    }

    #[tokio::test]
    async fn english_lines_are_identity() {
        let client = unreachable_client();
        let lines = vec!["one".to_string(), "two".to_string()];
        assert_eq!(client.translate_lines(&lines, "en").await, lines);
    }

    #[tokio::test]
    async fn empty_text_is_identity() {
        let client = unreachable_client();
        assert_eq!(client.translate_text("", "fr").await, "");
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_original() {
        let client = unreachable_client();
        let out = client.translate_text("Hello", "fr").await;
        assert_eq!(out, "Hello");
    }

    // ── Against a stub provider ──────────────────────────────

    /// Bind a stub translation endpoint that prefixes every query with `XX:`.
    async fn spawn_stub_provider() -> String {
        let app = Router::new().route(
            "/translate_a/single",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let q = params.get("q").cloned().unwrap_or_default();
                Json(serde_json::json!([[[format!("XX:{q}"), q]]]))
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn translates_through_provider() {
        let base = spawn_stub_provider().await;
        let client = TranslationClient::new(&base);
        assert_eq!(client.translate_text("Hello", "fr").await, "XX:Hello");
    }

    #[tokio::test]
    async fn localize_translates_all_fields() {
        let base = spawn_stub_provider().await;
        let client = TranslationClient::new(&base);

        let record = RecommendationRecord {
            overview: "Blight.".to_string(),
            treatment: vec!["Spray.".to_string()],
            prevention: vec!["Rotate.".to_string()],
        };

        let localized = client.localize(&record, "fr").await;
        assert_eq!(localized.overview, "XX:Blight.");
        assert_eq!(localized.treatment, vec!["XX:Spray.".to_string()]);
        assert_eq!(localized.prevention, vec!["XX:Rotate.".to_string()]);
        assert_eq!(localized.language, "fr");
        assert_eq!(localized.language_name, "French");
    }

    #[tokio::test]
    async fn localize_english_is_identity() {
        let client = unreachable_client();
        let record = RecommendationRecord::fallback();
        let localized = client.localize(&record, "en").await;
        assert_eq!(localized.overview, record.overview);
        assert_eq!(localized.treatment, record.treatment);
        assert_eq!(localized.language_name, "English");
    }

    // ── Response parsing ─────────────────────────────────────

    #[test]
    fn parse_concatenates_segments() {
        let value = serde_json::json!([
            [["Premier segment. ", "First segment. "], ["Deuxième.", "Second."]],
            null,
            "en"
        ]);
        assert_eq!(
            parse_translation(&value).unwrap(),
            "Premier segment. Deuxième."
        );
    }

    #[test]
    fn parse_rejects_unexpected_shape() {
        assert!(parse_translation(&serde_json::json!({"error": "nope"})).is_none());
        assert!(parse_translation(&serde_json::json!([])).is_none());
    }
}
