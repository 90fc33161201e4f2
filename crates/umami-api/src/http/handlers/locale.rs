//! Locale table endpoint used by chat front ends.

use axum::Json;
use axum::extract::Path;
use serde::Serialize;
use serde_json::{Map, Value};

use umami_core::locale::{self, KEY_EXAMPLE_MESSAGES};
use umami_types::locale::Locale;

#[derive(Debug, Serialize)]
pub struct LocaleResponse {
    /// The locale actually served, after fallback.
    pub locale: &'static str,
    pub strings: Map<String, Value>,
}

/// Render a locale table as JSON. List-valued keys stay arrays; the rest
/// are single strings.
pub fn locale_strings(locale: Locale) -> Map<String, Value> {
    locale::table(locale)
        .iter()
        .map(|(key, values)| {
            let value = if *key == KEY_EXAMPLE_MESSAGES || values.len() != 1 {
                Value::from(values.to_vec())
            } else {
                Value::from(values[0])
            };
            (key.to_string(), value)
        })
        .collect()
}

/// GET /api/locales/{tag}
pub async fn get_locale(Path(tag): Path<String>) -> Json<LocaleResponse> {
    let locale = Locale::from_tag(&tag);
    Json(LocaleResponse {
        locale: locale.tag(),
        strings: locale_strings(locale),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_stay_a_list() {
        let strings = locale_strings(Locale::En);
        assert!(strings["exampleMessages"].is_array());
        assert_eq!(strings["waiting"], "Waiting for response...");
    }

    #[tokio::test]
    async fn test_unknown_tag_falls_back_to_english() {
        let Json(response) = get_locale(Path("fr-FR".to_string())).await;
        assert_eq!(response.locale, "en");
        assert!(response.strings.contains_key("greeting"));
    }
}
