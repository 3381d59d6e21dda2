/// A collectible sticker shown in the rewards album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sticker {
    pub emoji: &'static str,
    pub name: &'static str,
}

/// Every sticker that can be collected, in album order.
pub static STICKER_ALBUM: &[Sticker] = &[
    Sticker { emoji: "🦕", name: "Dinosaur" },
    Sticker { emoji: "🐘", name: "Elephant" },
    Sticker { emoji: "🦋", name: "Butterfly" },
    Sticker { emoji: "🐄", name: "Cow" },
    Sticker { emoji: "🐒", name: "Monkey" },
    Sticker { emoji: "🐞", name: "Ladybug" },
    Sticker { emoji: "🐕", name: "Dog" },
    Sticker { emoji: "🐈", name: "Cat" },
    Sticker { emoji: "🦈", name: "Shark" },
    Sticker { emoji: "🐋", name: "Whale" },
    Sticker { emoji: "🦆", name: "Duck" },
    Sticker { emoji: "🐔", name: "Chicken" },
];

/// Stickers the sound hunt game hands out.
pub static HUNT_STICKERS: &[&str] = &["🦕", "🐘", "🦋", "🐄", "🐒", "🐞", "🐕", "🐈"];

/// Stickers the picture match game hands out.
pub static MATCH_STICKERS: &[&str] = &["🦕", "🐘", "🦋", "🐄", "🐒", "🐞", "🐕", "🐈", "🦈", "🐋"];

impl Sticker {
    pub fn find(emoji: &str) -> Option<&'static Sticker> {
        STICKER_ALBUM.iter().find(|s| s.emoji == emoji)
    }
}
