//! Prompt assembly for restaurant answers.

use umami_types::chat::HistoryPair;
use umami_types::llm::Message;
use umami_types::locale::Locale;
use umami_types::retrieval::RetrievedDocument;

use crate::locale;

/// Delimiter placed on each side of the retrieved context.
pub const CONTEXT_FENCE: &str = "=========";

/// Join retrieved chunks into one context block, separated by blank lines.
pub fn join_context(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// System prompt grounding the model in one restaurant's documents.
pub fn system_prompt(restaurant_name: &str, locale: Locale, context: &str) -> String {
    format!(
        "You are a helpful AI assistant for the restaurant called {restaurant_name}. \
You are given the following extracted parts of the restaurant's menu and other information about it. \
The context is between two '{CONTEXT_FENCE}'. \
Provide conversational answers in Markdown syntax, formatting links as hyperlinks.\n\
If the context is empty or you don't know the answer, say that you didn't find anything regarding that topic. \
Don't try to make up an answer.\n\
If the question is not about {restaurant_name} or the food on its menu, politely tell the user that you are tuned \
to only answer questions about {restaurant_name}.\n\
Answer in {language}.\n\
{CONTEXT_FENCE}\n\
{context}\n\
{CONTEXT_FENCE}",
        language = locale.language_name(),
    )
}

/// Full message list: system prompt, the localized greeting the user saw,
/// prior exchanges in order, then the new question.
pub fn build_messages(
    restaurant_name: &str,
    locale: Locale,
    context: &str,
    history: &[HistoryPair],
    question: &str,
) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 3);
    messages.push(Message::system(system_prompt(restaurant_name, locale, context)));
    messages.push(Message::assistant(locale::greeting(restaurant_name, locale)));
    for pair in history {
        messages.push(Message::user(pair.question()));
        messages.push(Message::assistant(pair.answer()));
    }
    messages.push(Message::user(question));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use umami_types::llm::MessageRole;

    fn doc(text: &str) -> RetrievedDocument {
        RetrievedDocument {
            text: text.to_string(),
            distance: 0.1,
        }
    }

    #[test]
    fn test_join_context_uses_blank_lines() {
        assert_eq!(join_context(&[doc("a"), doc("b")]), "a\n\nb");
        assert_eq!(join_context(&[]), "");
    }

    #[test]
    fn test_system_prompt_fences_context() {
        let prompt = system_prompt("Sushi Ten", Locale::Ja, "Tuna roll 800 yen");
        assert!(prompt.contains("restaurant called Sushi Ten"));
        assert!(prompt.contains("Answer in Japanese."));
        assert!(prompt.ends_with("=========\nTuna roll 800 yen\n========="));
    }

    #[test]
    fn test_build_messages_order() {
        let history = vec![HistoryPair::new("q1", "a1"), HistoryPair::new("q2", "a2")];
        let messages = build_messages("Sushi Ten", Locale::En, "", &history, "q3");

        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role.clone()).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert!(messages[1].content.contains("Sushi Ten"));
        assert_eq!(messages[2].content, "q1");
        assert_eq!(messages[5].content, "a2");
        assert_eq!(messages[6].content, "q3");
    }
}
