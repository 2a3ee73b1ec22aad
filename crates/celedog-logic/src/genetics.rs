//! Genetic engine: combines two parent gene sets into offspring genes.
//!
//! Every dimension rolls independently:
//!
//! | Roll        | Outcome | Effect |
//! |-------------|---------|--------|
//! | `< 0.50`    | inherit | copy the value from one parent (coin flip) |
//! | `< 0.90`    | blend   | colors average ± noise, influence averages, categorical → coin flip |
//! | otherwise   | mutate  | fresh uniform draw from the dimension's catalog |
//!
//! Dimension-specific behaviour lives in [`DIMENSION_RULES`], one row per
//! dimension, so coverage can be checked row by row. After all dimensions
//! resolve, synergy detection overwrites `special_trait`.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    BodyType, EarType, MarkingPattern, SpecialTrait, TailType, Talent, Temperament, COAT_COLORS,
};
use crate::genes::{Color, GeneDimension, GeneSet};
use crate::random::{choose, either};

/// Rolls below this inherit.
pub const INHERIT_THRESHOLD: f64 = 0.50;
/// Rolls below this (and not inherited) blend; the rest mutate.
pub const BLEND_THRESHOLD: f64 = 0.90;
/// Max per-channel noise added when blending colors.
pub const COLOR_NOISE: f64 = 20.0;
/// Chance of a random special trait when no synergy rule matches.
pub const WILDCARD_TRAIT_CHANCE: f64 = 0.05;

/// Which branch a dimension took during a breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitOutcome {
    Inherited,
    Blended,
    Mutated,
}

impl TraitOutcome {
    /// Map a uniform roll in [0,1) onto a branch.
    pub fn from_roll(roll: f64) -> Self {
        if roll < INHERIT_THRESHOLD {
            Self::Inherited
        } else if roll < BLEND_THRESHOLD {
            Self::Blended
        } else {
            Self::Mutated
        }
    }
}

/// Per-dimension result of one breed, for harness statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitRoll {
    pub dimension: GeneDimension,
    pub outcome: TraitOutcome,
}

type InheritFn = fn(&mut GeneSet, &GeneSet);
type BlendFn = fn(&mut GeneSet, &GeneSet, &GeneSet, &mut dyn RngCore);
type MutateFn = fn(&mut GeneSet, &GeneSet, &GeneSet, &mut dyn RngCore);

/// How one dimension inherits, blends, and mutates.
pub struct DimensionRule {
    pub dimension: GeneDimension,
    /// Copy the dimension from the given parent.
    pub inherit: InheritFn,
    /// Combine both parents' values.
    pub blend: BlendFn,
    /// Replace the value with a fresh draw.
    pub mutate: MutateFn,
}

/// Strategy table, one row per dimension in wire order.
pub static DIMENSION_RULES: [DimensionRule; 11] = [
    DimensionRule {
        dimension: GeneDimension::BodyType,
        inherit: |c, p| c.body_type = p.body_type,
        blend: |c, a, b, rng| c.body_type = either(rng, a.body_type, b.body_type),
        mutate: |c, _, _, rng| c.body_type = *choose(rng, &BodyType::ALL),
    },
    DimensionRule {
        dimension: GeneDimension::CoatColor,
        inherit: |c, p| c.coat_color = p.coat_color,
        blend: |c, a, b, rng| c.coat_color = blend_colors(a.coat_color, b.coat_color, rng),
        mutate: |c, _, _, rng| c.coat_color = *choose(rng, &COAT_COLORS),
    },
    DimensionRule {
        dimension: GeneDimension::MarkingPattern,
        inherit: |c, p| c.marking_pattern = p.marking_pattern,
        blend: |c, a, b, rng| {
            c.marking_pattern = either(rng, a.marking_pattern, b.marking_pattern)
        },
        mutate: |c, _, _, rng| c.marking_pattern = *choose(rng, &MarkingPattern::ALL),
    },
    DimensionRule {
        dimension: GeneDimension::MarkingColor,
        inherit: |c, p| c.marking_color = p.marking_color,
        blend: |c, a, b, rng| {
            c.marking_color = blend_colors(a.marking_color, b.marking_color, rng)
        },
        mutate: |c, _, _, rng| c.marking_color = *choose(rng, &COAT_COLORS),
    },
    DimensionRule {
        dimension: GeneDimension::EarType,
        inherit: |c, p| c.ear_type = p.ear_type,
        blend: |c, a, b, rng| c.ear_type = either(rng, a.ear_type, b.ear_type),
        mutate: |c, _, _, rng| c.ear_type = *choose(rng, &EarType::ALL),
    },
    DimensionRule {
        dimension: GeneDimension::TailType,
        inherit: |c, p| c.tail_type = p.tail_type,
        blend: |c, a, b, rng| c.tail_type = either(rng, a.tail_type, b.tail_type),
        mutate: |c, _, _, rng| c.tail_type = *choose(rng, &TailType::ALL),
    },
    DimensionRule {
        dimension: GeneDimension::CelebrityHeadId,
        inherit: |c, p| c.celebrity_head_id = p.celebrity_head_id.clone(),
        blend: |c, a, b, rng| {
            c.celebrity_head_id = either(rng, a, b).celebrity_head_id.clone()
        },
        // Heads are art references: a mutate roll still takes a parent's head.
        mutate: |c, a, b, rng| {
            c.celebrity_head_id = either(rng, a, b).celebrity_head_id.clone()
        },
    },
    DimensionRule {
        dimension: GeneDimension::CelebrityInfluence,
        inherit: |c, p| c.celebrity_influence = p.celebrity_influence,
        blend: |c, a, b, _| {
            c.celebrity_influence =
                ((a.celebrity_influence + b.celebrity_influence) / 2.0).clamp(0.0, 1.0)
        },
        mutate: |c, _, _, rng| c.celebrity_influence = rng.gen::<f64>(),
    },
    DimensionRule {
        dimension: GeneDimension::Temperament,
        inherit: |c, p| c.temperament = p.temperament,
        blend: |c, a, b, rng| c.temperament = either(rng, a.temperament, b.temperament),
        mutate: |c, _, _, rng| c.temperament = *choose(rng, &Temperament::ALL),
    },
    DimensionRule {
        dimension: GeneDimension::Talent,
        inherit: |c, p| c.talent = p.talent,
        blend: |c, a, b, rng| c.talent = either(rng, a.talent, b.talent),
        mutate: |c, _, _, rng| c.talent = *choose(rng, &Talent::ALL),
    },
    // Overwritten by synergy detection once every other dimension is settled.
    DimensionRule {
        dimension: GeneDimension::SpecialTrait,
        inherit: |c, p| c.special_trait = p.special_trait,
        blend: |c, a, b, rng| c.special_trait = either(rng, a.special_trait, b.special_trait),
        mutate: |c, _, _, _| c.special_trait = None,
    },
];

/// Look up the rule row for a dimension.
pub fn rule_for(dimension: GeneDimension) -> &'static DimensionRule {
    DIMENSION_RULES
        .iter()
        .find(|rule| rule.dimension == dimension)
        .unwrap_or(&DIMENSION_RULES[0])
}

/// Breed two gene sets into offspring genes.
pub fn breed<R: Rng + ?Sized>(a: &GeneSet, b: &GeneSet, rng: &mut R) -> GeneSet {
    breed_traced(a, b, rng).0
}

/// Like [`breed`], also reporting which branch each dimension took.
pub fn breed_traced<R: Rng + ?Sized>(
    a: &GeneSet,
    b: &GeneSet,
    mut rng: &mut R,
) -> (GeneSet, Vec<TraitRoll>) {
    let rng: &mut dyn RngCore = &mut rng;
    let mut child = a.clone();
    let mut rolls = Vec::with_capacity(DIMENSION_RULES.len());

    for rule in DIMENSION_RULES.iter() {
        let outcome = TraitOutcome::from_roll(rng.gen::<f64>());
        match outcome {
            TraitOutcome::Inherited => {
                let source = either(rng, a, b);
                (rule.inherit)(&mut child, source);
            }
            TraitOutcome::Blended => (rule.blend)(&mut child, a, b, rng),
            TraitOutcome::Mutated => (rule.mutate)(&mut child, a, b, rng),
        }
        log::debug!("{}: {:?}", rule.dimension, outcome);
        rolls.push(TraitRoll {
            dimension: rule.dimension,
            outcome,
        });
    }

    child.special_trait = detect_synergy(&child, rng);
    (child, rolls)
}

/// Average two colors per channel and add uniform noise in ±[`COLOR_NOISE`],
/// clamped to [0, 255].
pub fn blend_colors(a: Color, b: Color, rng: &mut dyn RngCore) -> Color {
    let [ar, ag, ab] = a.channels();
    let [br, bg, bb] = b.channels();
    Color::new(
        blend_channel(ar, br, rng),
        blend_channel(ag, bg, rng),
        blend_channel(ab, bb, rng),
    )
}

fn blend_channel(x: u8, y: u8, rng: &mut dyn RngCore) -> u8 {
    let avg = (x as f64 + y as f64) / 2.0;
    let noise = rng.gen_range(-COLOR_NOISE..=COLOR_NOISE);
    (avg + noise).round().clamp(0.0, 255.0) as u8
}

/// Deterministic synergy rules, in priority order. First match wins.
pub fn synergy(genes: &GeneSet) -> Option<SpecialTrait> {
    if genes.body_type == BodyType::Athletic
        && genes.temperament == Temperament::Sophisticated
        && genes.celebrity_influence > 0.8
    {
        return Some(SpecialTrait::RedCarpet);
    }

    if genes.temperament == Temperament::Goofy && genes.talent == Talent::Comedy {
        return Some(SpecialTrait::PaparazziMagnet);
    }

    if genes.celebrity_influence > 0.85 && genes.marking_pattern != MarkingPattern::Solid {
        return Some(SpecialTrait::AwardWinner);
    }

    None
}

/// Synergy rules, then the wildcard chance, then nothing.
pub fn detect_synergy<R: Rng + ?Sized>(genes: &GeneSet, rng: &mut R) -> Option<SpecialTrait> {
    if let Some(trait_) = synergy(genes) {
        log::debug!("synergy matched: {}", trait_.as_str());
        return Some(trait_);
    }

    if rng.gen::<f64>() < WILDCARD_TRAIT_CHANCE {
        let trait_ = *choose(rng, &SpecialTrait::ALL);
        log::debug!("wildcard special trait: {}", trait_.as_str());
        return Some(trait_);
    }

    None
}
