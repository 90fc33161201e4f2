//! Welcome banner display for chat sessions.

use console::style;

use umami_core::locale::{self, KEY_FOOTER};
use umami_types::locale::Locale;

/// Print the banner shown when a chat session starts.
pub fn print_welcome_banner(
    restaurant_name: &str,
    restaurant_id: Option<&str>,
    server: &str,
    locale: Locale,
) {
    println!();
    println!("  {} {}", "🍣", style(restaurant_name).cyan().bold());
    if let Some(footer) = locale::resolve_for(KEY_FOOTER, locale).first() {
        println!("  {}", style(footer).dim());
    }
    println!();
    println!("  {}  {}", style("Server:").bold(), style(server).dim());
    if let Some(id) = restaurant_id {
        println!("  {}      {}", style("Id:").bold(), style(id).dim());
    }
    println!("  {}  {}", style("Locale:").bold(), style(locale).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+C cancels an answer, Ctrl+D exits").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
