//! English UI strings.

pub(super) const ENTRIES: &[(&str, &[&str])] = &[
    (
        "greeting",
        &["Hello, I'm Umami, an AI assistant at {restaurant_name}. How can I help you?"],
    ),
    ("placeholder", &["Type your question..."]),
    ("waiting", &["Waiting for response..."]),
    ("footer", &["Built with ❤_❤ in Japan."]),
    (
        "exampleMessages",
        &[
            "What do you recommend from the menu?",
            "Are there any vegetarian dishes on the menu?",
        ],
    ),
];
