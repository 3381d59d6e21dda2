use serde::{Deserialize, Serialize};

/// The rainbow on the rewards screen has seven colours.
pub const MAX_RAINBOW_STRIPES: u8 = 7;

/// Stars, stickers and rainbow stripes collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardState {
    pub stars: u32,
    /// Unique sticker ids in the order they were first collected.
    pub stickers: Vec<String>,
    pub rainbow_stripes: u8,
}

impl RewardState {
    pub fn add_stars(&mut self, count: u32) {
        self.stars = self.stars.saturating_add(count);
    }

    /// Returns `false` when the sticker was already collected.
    pub fn add_sticker(&mut self, sticker: &str) -> bool {
        if self.has_sticker(sticker) {
            return false;
        }
        self.stickers.push(sticker.to_string());
        true
    }

    pub fn has_sticker(&self, sticker: &str) -> bool {
        self.stickers.iter().any(|s| s == sticker)
    }

    pub fn add_rainbow_stripe(&mut self) {
        self.rainbow_stripes = self.rainbow_stripes.saturating_add(1).min(MAX_RAINBOW_STRIPES);
    }

    pub fn rainbow_complete(&self) -> bool {
        self.rainbow_stripes >= MAX_RAINBOW_STRIPES
    }

    /// Drop duplicate stickers and clamp the stripe count.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.stickers.len());
        self.stickers.retain(|s| {
            if seen.contains(s) {
                false
            } else {
                seen.push(s.clone());
                true
            }
        });
        self.rainbow_stripes = self.rainbow_stripes.min(MAX_RAINBOW_STRIPES);
        self
    }
}
