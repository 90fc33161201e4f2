//! Supported UI languages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the UI strings and answers are available in.
///
/// Parsing never fails: unknown tags select the default, English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    /// Select a locale from a BCP 47 style tag.
    ///
    /// Only the primary subtag is compared, case-insensitively, so `ja-JP`
    /// and `JA` both select Japanese.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ja") {
            Locale::Ja
        } else {
            Locale::En
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// English name of the language, used in the answer-language instruction.
    pub fn language_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ja => "Japanese",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
