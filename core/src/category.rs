// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, str::FromStr};

/// The main category of an event. Each one owns a fixed set of subcategories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MainCategory {
    /// Concerts, club nights and other music events.
    Music,

    /// Classes, talks and other hands-on sessions.
    Workshop,
}

const CATEGORY_MUSIC: &str = "Music";
const CATEGORY_WORKSHOP: &str = "Workshop";

const SUBCATEGORIES_MUSIC: &[&str] = &[
    "Bollywood",
    "Hip Hop",
    "Electronic",
    "Melodic",
    "Live Music",
    "Metal",
    "Rap",
    "Music House",
    "Techno",
    "K-pop",
    "Hollywood",
    "POP",
    "Punjabi",
    "Disco",
    "Rock",
    "Afrobeat",
    "Dance Hall",
    "Thumri",
    "Bolly Tech",
];

const SUBCATEGORIES_WORKSHOP: &[&str] = &[
    "Sports",
    "Arts",
    "Meeting",
    "Conference",
    "Seminar",
    "Yoga",
    "Cooking",
    "Dance",
    "Self Help",
    "Consultation",
    "Corporate Event",
    "Communication",
];

impl MainCategory {
    /// All main categories, in menu order.
    pub const ALL: [MainCategory; 2] = [MainCategory::Music, MainCategory::Workshop];

    /// The subcategories that belong to this category, in menu order.
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            MainCategory::Music => SUBCATEGORIES_MUSIC,
            MainCategory::Workshop => SUBCATEGORIES_WORKSHOP,
        }
    }

    /// Whether the given subcategory belongs to this category.
    pub fn contains(&self, subcategory: &str) -> bool {
        self.subcategories().contains(&subcategory)
    }
}

impl AsRef<str> for MainCategory {
    fn as_ref(&self) -> &str {
        match self {
            MainCategory::Music => CATEGORY_MUSIC,
            MainCategory::Workshop => CATEGORY_WORKSHOP,
        }
    }
}

impl Display for MainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for MainCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            CATEGORY_MUSIC => Ok(MainCategory::Music),
            CATEGORY_WORKSHOP => Ok(MainCategory::Workshop),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        for category in MainCategory::ALL {
            assert_eq!(category.to_string().parse(), Ok(category));
        }
        assert!("music".parse::<MainCategory>().is_err());
    }

    #[test]
    fn subcategories_do_not_cross_categories() {
        assert!(MainCategory::Music.contains("Techno"));
        assert!(!MainCategory::Music.contains("Yoga"));
        assert!(MainCategory::Workshop.contains("Yoga"));
        assert!(!MainCategory::Workshop.contains("Techno"));
    }
}
