//! `umami locale`: print the strings behind a locale key.

use anyhow::Result;
use console::style;

use umami_core::locale;
use umami_types::locale::Locale;

pub fn show_locale(key: &str, language: &str, json: bool) -> Result<()> {
    let locale = Locale::from_tag(language);
    let values = locale::resolve_for(key, locale);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "key": key,
                "locale": locale.tag(),
                "values": values,
            }))?
        );
        return Ok(());
    }

    if values.is_empty() {
        println!(
            "  {} No strings for key {} in {}",
            style("?").yellow().bold(),
            style(key).dim(),
            locale
        );
        return Ok(());
    }
    for value in values {
        println!("{value}");
    }
    Ok(())
}
