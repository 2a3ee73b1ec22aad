//! Shared test genes and dogs.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{BodyType, EarType, MarkingPattern, TailType, Talent, Temperament};
use crate::dog::Dog;
use crate::genes::{Color, GeneSet};
use crate::rarity::Rarity;

pub fn genes_a() -> GeneSet {
    GeneSet {
        body_type: BodyType::Athletic,
        coat_color: Color::new(0x8B, 0x45, 0x13),
        marking_pattern: MarkingPattern::Spotted,
        marking_color: Color::new(0, 0, 0),
        ear_type: EarType::Pointed,
        tail_type: TailType::Straight,
        celebrity_head_id: "head_wahlberg".to_string(),
        celebrity_influence: 0.7,
        temperament: Temperament::Energetic,
        talent: Talent::Acting,
        special_trait: None,
    }
}

pub fn genes_b() -> GeneSet {
    GeneSet {
        body_type: BodyType::Fluffy,
        coat_color: Color::new(0xFF, 0xD7, 0x00),
        marking_pattern: MarkingPattern::Solid,
        marking_color: Color::new(0xFF, 0xFF, 0xFF),
        ear_type: EarType::Floppy,
        tail_type: TailType::Curly,
        celebrity_head_id: "head_swift".to_string(),
        celebrity_influence: 0.4,
        temperament: Temperament::Playful,
        talent: Talent::Singing,
        special_trait: None,
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Founder with the given name and rarity, born at t=0.
pub fn founder(name: &str, rarity: u8, genes: GeneSet, seed: u64) -> Dog {
    let rarity = Rarity::new(rarity).unwrap_or(Rarity::COMMON);
    Dog::founder(genes, name, rarity, &mut rng(seed), 0).unwrap()
}
