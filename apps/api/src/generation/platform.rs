//! Supported social networks and the per-platform pieces of the prompt contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{INSTAGRAM_BLOCK, LINKEDIN_BLOCK, TWITTER_X_BLOCK};

/// A social network a post can be drafted for.
///
/// Declaration order is the canonical order used in prompts and parsed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Linkedin,
    TwitterX,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Linkedin, Platform::TwitterX];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Linkedin => "LinkedIn",
            Platform::TwitterX => "Twitter/X",
        }
    }

    /// Section header the model is told to emit, without markdown bold.
    pub fn section_marker(self) -> &'static str {
        match self {
            Platform::Instagram => "[OUTPUT FOR INSTAGRAM]",
            Platform::Linkedin => "[OUTPUT FOR LINKEDIN]",
            Platform::TwitterX => "[OUTPUT FOR TWITTER/X]",
        }
    }

    /// Label of the main text field in this platform's block.
    pub fn text_label(self) -> &'static str {
        match self {
            Platform::Instagram => "Caption",
            Platform::Linkedin => "Post Text",
            Platform::TwitterX => "Tweet",
        }
    }

    /// Template fragment describing the expected output structure.
    pub fn block(self) -> &'static str {
        match self {
            Platform::Instagram => INSTAGRAM_BLOCK,
            Platform::Linkedin => LINKEDIN_BLOCK,
            Platform::TwitterX => TWITTER_X_BLOCK,
        }
    }

    /// Resolves the network named in an `[OUTPUT FOR ...]` header. Expects uppercase input.
    pub fn from_section_name(name: &str) -> Option<Platform> {
        match name.trim() {
            "INSTAGRAM" => Some(Platform::Instagram),
            "LINKEDIN" => Some(Platform::Linkedin),
            "TWITTER/X" | "TWITTER / X" | "TWITTER" | "X" => Some(Platform::TwitterX),
            _ => None,
        }
    }

    /// Sorted into canonical order with duplicates removed.
    pub fn canonical(platforms: &[Platform]) -> Vec<Platform> {
        let mut out = platforms.to_vec();
        out.sort();
        out.dedup();
        out
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
