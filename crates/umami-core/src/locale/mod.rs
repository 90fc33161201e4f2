//! Locale resolver: semantic UI keys to display strings.
//!
//! Each supported [`Locale`] has a static table mapping a key (`greeting`,
//! `placeholder`, `waiting`, `footer`, `exampleMessages`) to one or more
//! strings. Unknown language tags resolve against the English table. A key
//! missing from the selected table resolves to an empty slice.

mod en;
mod ja;

use umami_types::locale::Locale;

pub const KEY_GREETING: &str = "greeting";
pub const KEY_PLACEHOLDER: &str = "placeholder";
pub const KEY_WAITING: &str = "waiting";
pub const KEY_FOOTER: &str = "footer";
pub const KEY_EXAMPLE_MESSAGES: &str = "exampleMessages";

const RESTAURANT_NAME_SLOT: &str = "{restaurant_name}";

/// The full string table for a locale, in a stable key order.
pub fn table(locale: Locale) -> &'static [(&'static str, &'static [&'static str])] {
    match locale {
        Locale::En => en::ENTRIES,
        Locale::Ja => ja::ENTRIES,
    }
}

/// Look up `key` in the table selected by `language_tag`.
pub fn resolve(key: &str, language_tag: &str) -> &'static [&'static str] {
    resolve_for(key, Locale::from_tag(language_tag))
}

/// Look up `key` in the table for `locale`.
pub fn resolve_for(key: &str, locale: Locale) -> &'static [&'static str] {
    match table(locale).iter().find(|(k, _)| *k == key) {
        Some((_, values)) => values,
        None => {
            tracing::debug!(key, locale = %locale, "Locale key not found");
            &[]
        }
    }
}

/// The greeting for `locale` with the restaurant name filled in.
pub fn greeting(restaurant_name: &str, locale: Locale) -> String {
    resolve_for(KEY_GREETING, locale)
        .first()
        .map(|template| template.replace(RESTAURANT_NAME_SLOT, restaurant_name))
        .unwrap_or_default()
}

/// Example prompts offered before the first question.
pub fn example_messages(locale: Locale) -> Vec<String> {
    resolve_for(KEY_EXAMPLE_MESSAGES, locale)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_per_locale() {
        assert_eq!(resolve("footer", "ja"), ["日本で❤_❤を使って作られています。"]);
        assert_eq!(resolve("footer", "en"), ["Built with ❤_❤ in Japan."]);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_english() {
        assert_eq!(resolve("footer", "xx"), resolve("footer", "en"));
        assert_eq!(resolve("placeholder", ""), ["Type your question..."]);
    }

    #[test]
    fn test_region_subtag_is_ignored() {
        assert_eq!(resolve("placeholder", "ja-JP"), ["質問を入力してください..."]);
    }

    #[test]
    fn test_missing_key_is_empty() {
        assert!(resolve("noSuchKey", "en").is_empty());
        assert!(resolve("noSuchKey", "ja").is_empty());
    }

    #[test]
    fn test_example_messages_have_two_entries() {
        assert_eq!(resolve(KEY_EXAMPLE_MESSAGES, "ja").len(), 2);
        assert_eq!(example_messages(Locale::En).len(), 2);
    }

    #[test]
    fn test_tables_share_keys() {
        let en_keys: Vec<&str> = table(Locale::En).iter().map(|(k, _)| *k).collect();
        let ja_keys: Vec<&str> = table(Locale::Ja).iter().map(|(k, _)| *k).collect();
        assert_eq!(en_keys, ja_keys);
    }

    #[test]
    fn test_greeting_substitutes_name() {
        assert_eq!(
            greeting("Sushi Ten", Locale::En),
            "Hello, I'm Umami, an AI assistant at Sushi Ten. How can I help you?"
        );
        assert!(greeting("鮨天", Locale::Ja).starts_with("こんにちは、私は鮨天の"));
    }
}
