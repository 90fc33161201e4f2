//! Japanese UI strings.

pub(super) const ENTRIES: &[(&str, &[&str])] = &[
    (
        "greeting",
        &["こんにちは、私は{restaurant_name}のAIアシスタント、ウマミです。どのようなお手伝いができますか？"],
    ),
    ("placeholder", &["質問を入力してください..."]),
    ("waiting", &["回答を待っています..."]),
    ("footer", &["日本で❤_❤を使って作られています。"]),
    (
        "exampleMessages",
        &[
            "メニューから何をおすすめしますか？",
            "メニューにはベジタリアン向けの料理がありますか？",
        ],
    ),
];
