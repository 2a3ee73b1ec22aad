//! Rarity engine: scores offspring into a 1–5 tier.
//!
//! `base = mean(parent rarities) + 1.0 (special trait) + 0.5 (influence > 0.8)`,
//! then one roll picks a branch:
//!
//! | Roll        | Share | Tier |
//! |-------------|-------|------|
//! | `< 0.55`    | 55%   | `floor(base)` |
//! | `< 0.90`    | 35%   | `ceil(base) + 1` |
//! | otherwise   | 10%   | `ceil(base) + 2` |
//!
//! The result is clamped to 1..=5. Only the floor branch can hold a pairing
//! level, and both remaining branches escalate, so offspring drift upward.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::genes::GeneSet;

pub const FLOOR_CHANCE: f64 = 0.55;
pub const PLUS_ONE_CHANCE: f64 = 0.35;
pub const PLUS_TWO_CHANCE: f64 = 0.10;

/// Rolls at or above this take the `+2` branch.
const PLUS_TWO_THRESHOLD: f64 = 0.90;

pub const SPECIAL_TRAIT_BONUS: f64 = 1.0;
pub const HIGH_INFLUENCE_BONUS: f64 = 0.5;
pub const HIGH_INFLUENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rarity {0} is outside 1..=5")]
pub struct InvalidRarity(pub u8);

/// Rarity tier, 1 (Common) through 5 (Legendary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    pub const COMMON: Rarity = Rarity(1);
    pub const UNCOMMON: Rarity = Rarity(2);
    pub const RARE: Rarity = Rarity(3);
    pub const EPIC: Rarity = Rarity(4);
    pub const LEGENDARY: Rarity = Rarity(5);

    pub const ALL: [Rarity; 5] = [
        Rarity::COMMON,
        Rarity::UNCOMMON,
        Rarity::RARE,
        Rarity::EPIC,
        Rarity::LEGENDARY,
    ];

    pub fn new(tier: u8) -> Result<Self, InvalidRarity> {
        if (1..=5).contains(&tier) {
            Ok(Self(tier))
        } else {
            Err(InvalidRarity(tier))
        }
    }

    /// Clamp any integer into the valid range.
    pub fn clamped(tier: i64) -> Self {
        Self(tier.clamp(1, 5) as u8)
    }

    pub fn tier(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Common",
            2 => "Uncommon",
            3 => "Rare",
            4 => "Epic",
            _ => "Legendary",
        }
    }

    /// UI color as `0xRRGGBB`.
    pub fn display_color(self) -> u32 {
        match self.0 {
            1 => 0xCCCCCC,
            2 => 0x00FF00,
            3 => 0x0066FF,
            4 => 0x9933FF,
            _ => 0xFFAA00,
        }
    }

    /// Shop price for a dog of this tier. Fixed, so a dog's value is a
    /// function of its rarity alone.
    pub fn purchase_price(self) -> u64 {
        match self.0 {
            1 => 500,
            2 => 2_000,
            3 => 10_000,
            4 => 40_000,
            _ => 150_000,
        }
    }

    /// Nominal market share of each tier, for UI legends.
    pub fn tier_table() -> [TierInfo; 5] {
        const SHARES: [f64; 5] = [0.60, 0.25, 0.12, 0.025, 0.005];
        let mut table = [TierInfo {
            rarity: Rarity::COMMON,
            name: "",
            color: 0,
            probability: 0.0,
        }; 5];
        for (slot, (rarity, share)) in table.iter_mut().zip(Rarity::ALL.into_iter().zip(SHARES)) {
            *slot = TierInfo {
                rarity,
                name: rarity.name(),
                color: rarity.display_color(),
                probability: share,
            };
        }
        table
    }
}

impl TryFrom<u8> for Rarity {
    type Error = InvalidRarity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rarity::new(value)
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.0
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierInfo {
    pub rarity: Rarity,
    pub name: &'static str,
    pub color: u32,
    pub probability: f64,
}

// ============================================================================
// SCORING
// ============================================================================

/// Pre-roll value: parent mean plus gene bonuses.
pub fn base_value(a: Rarity, b: Rarity, has_special_trait: bool, high_influence: bool) -> f64 {
    let mut base = (a.tier() as f64 + b.tier() as f64) / 2.0;
    if has_special_trait {
        base += SPECIAL_TRAIT_BONUS;
    }
    if high_influence {
        base += HIGH_INFLUENCE_BONUS;
    }
    base
}

/// Resolve a roll in [0,1) against a base value.
pub fn rarity_for_roll(base: f64, roll: f64) -> Rarity {
    let value = if roll < FLOOR_CHANCE {
        base.floor()
    } else if roll < PLUS_TWO_THRESHOLD {
        base.ceil() + 1.0
    } else {
        base.ceil() + 2.0
    };
    Rarity::clamped(value.round() as i64)
}

/// Score offspring genes against their parents' rarities.
pub fn calculate_rarity<R: Rng + ?Sized>(
    a: Rarity,
    b: Rarity,
    genes: &GeneSet,
    rng: &mut R,
) -> Rarity {
    let base = base_value(
        a,
        b,
        genes.has_special_trait(),
        genes.celebrity_influence > HIGH_INFLUENCE_THRESHOLD,
    );
    let roll = rng.gen::<f64>();
    let rarity = rarity_for_roll(base, roll);
    log::debug!("rarity: base {:.1}, roll {:.3} -> {}", base, roll, rarity.tier());
    rarity
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RarityOutcome {
    pub probability: f64,
    pub tier: Rarity,
}

/// The three branch outcomes for a pairing, for preview display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityDistribution {
    pub floor: RarityOutcome,
    pub plus_one: RarityOutcome,
    pub plus_two: RarityOutcome,
}

impl RarityDistribution {
    pub fn outcomes(&self) -> [RarityOutcome; 3] {
        [self.floor, self.plus_one, self.plus_two]
    }

    /// Total probability of landing on `tier`.
    pub fn probability_of(&self, tier: Rarity) -> f64 {
        self.outcomes()
            .iter()
            .filter(|o| o.tier == tier)
            .map(|o| o.probability)
            .sum()
    }
}

/// Branch outcomes without consuming randomness.
pub fn expected_distribution(
    a: Rarity,
    b: Rarity,
    has_special_trait: bool,
    high_influence: bool,
) -> RarityDistribution {
    let base = base_value(a, b, has_special_trait, high_influence);
    RarityDistribution {
        floor: RarityOutcome {
            probability: FLOOR_CHANCE,
            tier: Rarity::clamped(base.floor() as i64),
        },
        plus_one: RarityOutcome {
            probability: PLUS_ONE_CHANCE,
            tier: Rarity::clamped(base.ceil() as i64 + 1),
        },
        plus_two: RarityOutcome {
            probability: PLUS_TWO_CHANCE,
            tier: Rarity::clamped(base.ceil() as i64 + 2),
        },
    }
}
