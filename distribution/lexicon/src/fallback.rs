//! Minimal dataset used when the real one cannot be loaded.

pub struct FallbackEntry {
    pub glyph: &'static str,
    pub name: &'static str,
    pub group: &'static str,
}

pub const FALLBACK_ENTRIES: &[FallbackEntry] = &[
    FallbackEntry {
        glyph: "😀",
        name: "grinning face",
        group: "Smileys & Emotion",
    },
    FallbackEntry {
        glyph: "❤️",
        name: "red heart",
        group: "Smileys & Emotion",
    },
    FallbackEntry {
        glyph: "🍕",
        name: "pizza",
        group: "Food & Drink",
    },
    FallbackEntry {
        glyph: "🐶",
        name: "dog face",
        group: "Animals & Nature",
    },
    FallbackEntry {
        glyph: "🚗",
        name: "automobile",
        group: "Travel & Places",
    },
    FallbackEntry {
        glyph: "⚽",
        name: "soccer ball",
        group: "Activities",
    },
    FallbackEntry {
        glyph: "📱",
        name: "mobile phone",
        group: "Objects",
    },
    FallbackEntry {
        glyph: "🇺🇸",
        name: "flag united states",
        group: "Flags",
    },
];
