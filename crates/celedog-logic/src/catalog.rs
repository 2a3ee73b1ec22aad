//! Trait catalog: the valid values for every categorical gene dimension.
//!
//! These are static tables with no game-state dependency. Mutation draws
//! uniformly from them, and the name generator keys its pun table on the
//! `as_str()` tokens, which are also the serialized wire values.

use serde::{Deserialize, Serialize};

use crate::genes::Color;

// ============================================================================
// BODY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Athletic,
    Stocky,
    Slim,
    Fluffy,
    Tiny,
}

impl BodyType {
    pub const ALL: [BodyType; 5] = [
        BodyType::Athletic,
        BodyType::Stocky,
        BodyType::Slim,
        BodyType::Fluffy,
        BodyType::Tiny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Athletic => "athletic",
            Self::Stocky => "stocky",
            Self::Slim => "slim",
            Self::Fluffy => "fluffy",
            Self::Tiny => "tiny",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarType {
    Floppy,
    Pointed,
    Small,
    Large,
}

impl EarType {
    pub const ALL: [EarType; 4] = [
        EarType::Floppy,
        EarType::Pointed,
        EarType::Small,
        EarType::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Floppy => "floppy",
            Self::Pointed => "pointed",
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailType {
    Curly,
    Straight,
    Bushy,
    Short,
}

impl TailType {
    pub const ALL: [TailType; 4] = [
        TailType::Curly,
        TailType::Straight,
        TailType::Bushy,
        TailType::Short,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curly => "curly",
            Self::Straight => "straight",
            Self::Bushy => "bushy",
            Self::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkingPattern {
    Solid,
    Spotted,
    Striped,
    Patched,
}

impl MarkingPattern {
    pub const ALL: [MarkingPattern; 4] = [
        MarkingPattern::Solid,
        MarkingPattern::Spotted,
        MarkingPattern::Striped,
        MarkingPattern::Patched,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Spotted => "spotted",
            Self::Striped => "striped",
            Self::Patched => "patched",
        }
    }
}

// ============================================================================
// BEHAVIOUR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperament {
    Playful,
    Lazy,
    Energetic,
    Sophisticated,
    Goofy,
}

impl Temperament {
    pub const ALL: [Temperament; 5] = [
        Temperament::Playful,
        Temperament::Lazy,
        Temperament::Energetic,
        Temperament::Sophisticated,
        Temperament::Goofy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playful => "playful",
            Self::Lazy => "lazy",
            Self::Energetic => "energetic",
            Self::Sophisticated => "sophisticated",
            Self::Goofy => "goofy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Talent {
    Singing,
    Acting,
    Sports,
    Comedy,
    Modeling,
}

impl Talent {
    pub const ALL: [Talent; 5] = [
        Talent::Singing,
        Talent::Acting,
        Talent::Sports,
        Talent::Comedy,
        Talent::Modeling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singing => "singing",
            Self::Acting => "acting",
            Self::Sports => "sports",
            Self::Comedy => "comedy",
            Self::Modeling => "modeling",
        }
    }
}

/// Special traits are never rolled per-dimension; only synergy detection
/// (or its 5% wildcard) assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialTrait {
    RedCarpet,
    PaparazziMagnet,
    AwardWinner,
}

impl SpecialTrait {
    pub const ALL: [SpecialTrait; 3] = [
        SpecialTrait::RedCarpet,
        SpecialTrait::PaparazziMagnet,
        SpecialTrait::AwardWinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedCarpet => "redCarpet",
            Self::PaparazziMagnet => "paparazziMagnet",
            Self::AwardWinner => "awardWinner",
        }
    }
}

// ============================================================================
// COLORS
// ============================================================================

/// Palette used for founder coats and for coat/marking color mutation.
pub const COAT_COLORS: [Color; 10] = [
    Color::new(0x8B, 0x45, 0x13), // brown
    Color::new(0xFF, 0xFF, 0xFF), // white
    Color::new(0x00, 0x00, 0x00), // black
    Color::new(0xD2, 0xB4, 0x8C), // tan
    Color::new(0xFF, 0xD7, 0x00), // golden
    Color::new(0xC0, 0xC0, 0xC0), // silver
    Color::new(0xA0, 0x52, 0x2D), // sienna
    Color::new(0xF5, 0xDE, 0xB3), // wheat
    Color::new(0x8B, 0x8B, 0x8B), // gray
    Color::new(0xFF, 0x8C, 0x00), // dark orange
];

/// Celebrity head assigned to randomly generated founders.
pub const DEFAULT_CELEBRITY_HEAD: &str = "celeb_001";
