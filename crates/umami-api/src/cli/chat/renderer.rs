//! Terminal markdown rendering for answers.
//!
//! Fragments are written raw while streaming, through the readline
//! `SharedWriter` so the prompt is redrawn below them; complete texts
//! (greeting, history) go through `termimad`.

use std::io::Write;

use termimad::MadSkin;
use termimad::crossterm::style::Color;

pub struct ChatRenderer {
    skin: MadSkin,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render complete markdown for the terminal.
    pub fn render_final(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    pub fn print_streaming_token(&self, out: &mut impl Write, token: &str) {
        let _ = write!(out, "{token}");
        let _ = out.flush();
    }

    /// Print the assistant label that precedes an answer.
    pub fn print_label(&self, out: &mut impl Write, name: &str) {
        let _ = write!(out, "\n  {} ", console::style(name).cyan().bold());
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_text() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("We suggest the **miso soup**.");
        assert!(out.contains("miso soup"));
    }

    #[test]
    fn test_streaming_tokens_go_to_given_writer() {
        let renderer = ChatRenderer::new();
        let mut out = Vec::new();
        renderer.print_label(&mut out, "Umami");
        renderer.print_streaming_token(&mut out, "We suggest");
        renderer.print_streaming_token(&mut out, " the soup.");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Umami"));
        assert!(text.ends_with("We suggest the soup."));
    }
}
