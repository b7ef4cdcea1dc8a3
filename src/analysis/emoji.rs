//! Emoji polarity lexicon.
//!
//! An [`EmojiLexicon`] maps emoji graphemes to a [`Polarity`]. Lookups ignore
//! variation selectors and skin-tone modifiers, so `❤` and `❤️` or `👍` and
//! `👍🏽` share an entry.

use std::sync::{Arc, LazyLock};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

const POSITIVE_EMOJI: &[&str] = &[
    "😀", "😁", "😂", "😃", "😄", "😅", "😆", "😇", "😉", "😊", "😋", "😌", "😍", "😎", "😗",
    "😘", "😙", "😚", "😛", "😜", "😝", "😸", "😹", "😺", "😻", "😽", "🙂", "🙃", "🙌", "🙏",
    "🤗", "🤣", "🤩", "🥰", "🥳", "❤", "💕", "💖", "💗", "💘", "💙", "💚", "💛", "💜", "💝",
    "💞", "💟", "🧡", "🤍", "♥", "👍", "👌", "👏", "✌", "🤘", "🤙", "💪", "🎉", "🎊", "🌹",
    "🌈", "☀", "⭐", "🌟", "✨", "🔥", "💯", "🏆", "🥇", "✅", "☺",
];

const NEGATIVE_EMOJI: &[&str] = &[
    "😒", "😓", "😔", "😕", "😖", "😞", "😟", "😠", "😡", "😢", "😣", "😤", "😥", "😦", "😧",
    "😨", "😩", "😪", "😫", "😬", "😭", "😰", "😱", "😲", "😳", "😵", "😷", "😾", "😿", "🙀",
    "🙁", "🙄", "🤒", "🤕", "🤢", "🤮", "🤬", "🥵", "🥶", "🥺", "☹", "💔", "👎", "💩", "👿",
    "😈", "💀", "☠", "🖕", "❌", "⛔", "🚫", "🤦", "😑", "😐", "🤯",
];

const NEUTRAL_EMOJI: &[&str] = &[
    "😶", "😏", "🤔", "🤨", "🤐", "🤫", "🤭", "🧐", "😴", "🙈", "🙉", "🙊", "👀", "👋", "🤷",
    "👉", "👈", "👆", "👇", "☝", "✋", "🤚", "🖐", "🖖", "🤝", "📷", "📸", "📱", "💻", "📢",
    "📣", "🎶", "🎵", "⚽", "🏀", "🍺", "🍻", "🍷", "☕", "🍕", "🍔", "🚀", "🌍", "🌎", "🌏",
    "⏰", "📅", "📌", "🔗", "➡", "⬅", "⬆", "⬇",
];

static BUILTIN: LazyLock<Arc<AHashMap<String, Polarity>>> = LazyLock::new(|| {
    let mut entries = AHashMap::new();
    for (list, polarity) in [
        (NEUTRAL_EMOJI, Polarity::Neutral),
        (NEGATIVE_EMOJI, Polarity::Negative),
        (POSITIVE_EMOJI, Polarity::Positive),
    ] {
        for emoji in list {
            entries.insert(base_form(emoji), polarity);
        }
    }
    Arc::new(entries)
});

/// Sentiment class of an emoji.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Placeholder token emitted for this class.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Polarity::Positive => "POS_EMOJI",
            Polarity::Negative => "NEG_EMOJI",
            Polarity::Neutral => "NEUTRAL_EMOJI",
        }
    }
}

/// Lookup table from emoji to polarity.
#[derive(Clone, Debug)]
pub struct EmojiLexicon {
    entries: Arc<AHashMap<String, Polarity>>,
}

impl EmojiLexicon {
    /// The built-in lexicon.
    pub fn new() -> Self {
        EmojiLexicon {
            entries: Arc::clone(&BUILTIN),
        }
    }

    /// An empty lexicon.
    pub fn empty() -> Self {
        EmojiLexicon {
            entries: Arc::new(AHashMap::new()),
        }
    }

    /// Build a lexicon from explicit entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Polarity)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(emoji, polarity)| (base_form(emoji.as_ref()), polarity))
            .collect();
        EmojiLexicon {
            entries: Arc::new(entries),
        }
    }

    /// Add or override one entry.
    pub fn with_entry(mut self, emoji: &str, polarity: Polarity) -> Self {
        Arc::make_mut(&mut self.entries).insert(base_form(emoji), polarity);
        self
    }

    /// Polarity of an emoji grapheme, if known.
    pub fn classify(&self, grapheme: &str) -> Option<Polarity> {
        self.entries.get(&base_form(grapheme)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmojiLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Grapheme without variation selectors and skin-tone modifiers.
fn base_form(grapheme: &str) -> String {
    grapheme
        .chars()
        .filter(|c| !matches!(c, '\u{FE0E}' | '\u{FE0F}' | '\u{1F3FB}'..='\u{1F3FF}'))
        .collect()
}
