//! Category tags: icon and pill colors per primary category.

use serde::Serialize;

pub const DEFAULT_ICON: &str = "location-dot";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct PillColors {
    pub background: &'static str,
    pub text: &'static str,
}

const DEFAULT_COLORS: PillColors = PillColors {
    background: "#f3f4f6",
    text: "#1f2937",
};

// (tag, icon, background, text)
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("BEACH", "umbrella-beach", "#dbeafe", "#1e40af"),
    ("WATERFALL", "water", "#d1fae5", "#065f46"),
    ("VIEWPOINT", "mountain", "#fce7f3", "#9f1239"),
    ("NATURE", "tree", "#dcfce7", "#14532d"),
    ("ACCOMMODATION", "bed", "#fef3c7", "#92400e"),
    ("RESORT", "hotel", "#fed7aa", "#9a3412"),
    ("CAFE", "mug-hot", "#e0e7ff", "#3730a3"),
    ("RESTAURANT", "utensils", "#fecaca", "#991b1b"),
    ("MUSEUM", "landmark", "#e9d5ff", "#6b21a8"),
    ("HERITAGE", "monument", "#f3e8ff", "#581c87"),
    ("RELIGIOUS_SITE", "place-of-worship", "#ddd6fe", "#4c1d95"),
    ("SURFING", "person-swimming", "#bfdbfe", "#1e3a8a"),
    ("LANDMARK", "flag", "#fbbf24", "#78350f"),
    ("ECO_PARK", "leaf", "#86efac", "#14532d"),
    ("HIKING", "hiking", "#fdba74", "#7c2d12"),
    ("ISLAND", "island-tropical", "#99f6e4", "#134e4a"),
    ("BAR", "martini-glass", "#fca5a5", "#7f1d1d"),
    ("PARK", "tree-city", "#bef264", "#3f6212"),
    ("LAGOON", "droplet", "#a5f3fc", "#155e75"),
    ("RIVER", "water", "#bae6fd", "#0c4a6e"),
    ("LIGHTHOUSE", "lighthouse", "#fde68a", "#92400e"),
    ("SANDBAR", "water", "#fed7aa", "#9a3412"),
    ("MANGROVE", "tree", "#86efac", "#166534"),
    ("RUINS", "monument", "#e9d5ff", "#6b21a8"),
];

fn lookup(tag: &str) -> Option<(&'static str, &'static str, &'static str, &'static str)> {
    CATEGORIES.iter().find(|(t, ..)| *t == tag).copied()
}

/// Icon name for a category list; only the primary (first) tag is consulted.
pub fn category_icon(categories: &[String]) -> &'static str {
    categories
        .first()
        .and_then(|tag| lookup(tag))
        .map(|(_, icon, ..)| icon)
        .unwrap_or(DEFAULT_ICON)
}

pub fn category_colors(tag: &str) -> PillColors {
    lookup(tag)
        .map(|(_, _, background, text)| PillColors {
            background,
            text,
        })
        .unwrap_or(DEFAULT_COLORS)
}

/// Display label for a tag: `RELIGIOUS_SITE` → `religious site`.
pub fn category_label(tag: &str) -> String {
    tag.to_lowercase().replace('_', " ")
}

/// `SAN_ANDRES` → `San Andres`.
pub fn title_case(key: &str) -> String {
    key.to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
