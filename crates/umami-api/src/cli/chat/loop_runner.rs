//! Main chat loop orchestration.
//!
//! Resolves the restaurant on the server, prints the banner and greeting,
//! then reads questions and streams answers until the user exits.

use std::io::Write;

use anyhow::Context;
use console::style;
use tokio_util::sync::CancellationToken;

use umami_core::chat::client::{StreamingChatClient, TurnContext, TurnOutcome};
use umami_core::chat::session::ChatSession;
use umami_core::locale::{self, KEY_WAITING};
use umami_infra::chat_client::SseChatTransport;
use umami_types::chat::TurnRole;
use umami_types::config::AppConfig;
use umami_types::error::ChatClientError;
use umami_types::locale::Locale;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

const ASSISTANT_LABEL: &str = "Umami";

/// Default server URL from the `[server]` config section.
pub fn default_server_url(config: &AppConfig) -> String {
    format!("http://{}:{}", config.server.host, config.server.port)
}

fn prompt_for(locale: Locale) -> String {
    let placeholder = locale::resolve_for(locale::KEY_PLACEHOLDER, locale)
        .first()
        .copied()
        .unwrap_or("You");
    format!("  {} {} ", style(placeholder).dim(), style(">").green().bold())
}

fn print_greeting(renderer: &ChatRenderer, session: &ChatSession) {
    if let Some(greeting) = session.transcript().first() {
        renderer.print_label(&mut std::io::stdout(), ASSISTANT_LABEL);
        println!("{}", renderer.render_final(&greeting.text).trim());
    }
    if !session.suggestions().is_empty() {
        println!();
        for (i, suggestion) in session.suggestions().iter().enumerate() {
            println!("  {} {}", style(format!("[{}]", i + 1)).cyan(), style(suggestion).dim());
        }
    }
    println!();
}

fn print_history(renderer: &ChatRenderer, session: &ChatSession) {
    println!();
    for turn in session.transcript() {
        let label = match turn.role {
            TurnRole::User => style("You").green().bold(),
            TurnRole::Assistant => style(ASSISTANT_LABEL).cyan().bold(),
        };
        println!("  {label} {}", renderer.render_final(&turn.text).trim());
    }
    println!();
}

/// Run the interactive chat loop against a running server.
pub async fn run_chat_loop(
    config: &AppConfig,
    url: Option<String>,
    restaurant_id: Option<String>,
    language: &str,
) -> anyhow::Result<()> {
    let base_url = url.unwrap_or_else(|| default_server_url(config));
    let transport = SseChatTransport::new(base_url.clone())?;
    let mut current_locale = Locale::from_tag(language);

    let restaurant_name = match restaurant_id.as_deref() {
        Some(id) => transport
            .fetch_restaurant(id)
            .await
            .with_context(|| format!("failed to reach {base_url}"))?
            .map(|r| r.name)
            .ok_or_else(|| anyhow::anyhow!("Restaurant '{id}' not found on {base_url}"))?,
        None => config.assistant.default_restaurant_name.clone(),
    };

    let context = TurnContext {
        restaurant_id: restaurant_id.clone(),
        restaurant_name: Some(restaurant_name.clone()),
        locale: current_locale,
    };
    let mut client = StreamingChatClient::new(
        transport,
        ChatSession::for_restaurant(&restaurant_name, current_locale),
        context,
    );

    print_welcome_banner(
        &restaurant_name,
        restaurant_id.as_deref(),
        &base_url,
        current_locale,
    );
    let renderer = ChatRenderer::new();
    print_greeting(&renderer, client.session());

    let (mut chat_input, writer) = ChatInput::new(prompt_for(current_locale))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::New => {
                    client.reset_session(ChatSession::for_restaurant(
                        &restaurant_name,
                        current_locale,
                    ));
                    print_greeting(&renderer, client.session());
                }
                ChatCommand::History => print_history(&renderer, client.session()),
                ChatCommand::Language(tag) => {
                    current_locale = Locale::from_tag(&tag);
                    client.set_locale(current_locale);
                    chat_input.update_prompt(&prompt_for(current_locale));
                    println!(
                        "\n  {} Answers will be in {}\n",
                        style("*").cyan().bold(),
                        style(current_locale.language_name()).bold()
                    );
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let question = commands::pick_suggestion(&text, client.session().suggestions())
            .unwrap_or(text);

        let waiting = locale::resolve_for(KEY_WAITING, current_locale)
            .first()
            .copied()
            .unwrap_or("...");
        let spinner = crate::cli::spinner(waiting);
        let cancel = CancellationToken::new();
        let mut started = false;
        let mut answer_out = writer.clone();
        let mut notice_out = writer.clone();

        let outcome = {
            let submit = client.submit_with(&question, cancel.clone(), |fragment| {
                if !started {
                    spinner.finish_and_clear();
                    renderer.print_label(&mut answer_out, ASSISTANT_LABEL);
                    started = true;
                }
                renderer.print_streaming_token(&mut answer_out, fragment);
            });
            tokio::pin!(submit);

            // Keep reading keys while the answer streams so Ctrl+C can cancel it.
            loop {
                tokio::select! {
                    outcome = &mut submit => break outcome,
                    event = chat_input.read_line() => match event {
                        InputEvent::Interrupted | InputEvent::Eof => cancel.cancel(),
                        InputEvent::Message(text) if text.is_empty() => {}
                        InputEvent::Message(_) => {
                            let _ = writeln!(
                                notice_out,
                                "\n  {}",
                                style("Still answering; input ignored. Press Ctrl+C to cancel.").dim()
                            );
                        }
                    },
                }
            }
        };
        spinner.finish_and_clear();

        match outcome {
            Ok(TurnOutcome::Completed(_)) => println!("\n"),
            Ok(TurnOutcome::Cancelled) => {
                println!("\n  {}\n", style("Answer cancelled.").dim());
            }
            Ok(TurnOutcome::Ignored) => {}
            Err(ChatClientError::Busy) => {
                println!("\n  {}\n", style("Still answering the previous question.").dim());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat turn failed");
                eprintln!("\n  {} {e}", style("!").red().bold());
                eprintln!("  {}\n", style("Ask again to retry, /exit to quit.").dim());
            }
        }
    }

    chat_input.flush();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_url() {
        let config = AppConfig::default();
        assert_eq!(default_server_url(&config), "http://127.0.0.1:3000");
    }
}
