//! The ten founding dogs sold in the shop.

use crate::catalog::{BodyType, EarType, MarkingPattern, TailType, Talent, Temperament};
use crate::genes::{Color, GeneSet};
use crate::rarity::Rarity;

/// Static definition of a shop starter. Genes are materialized on demand
/// because `GeneSet` owns its head id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarterDog {
    pub name: &'static str,
    pub rarity: Rarity,
    pub body_type: BodyType,
    pub coat_color: Color,
    pub marking_pattern: MarkingPattern,
    pub marking_color: Color,
    pub ear_type: EarType,
    pub tail_type: TailType,
    pub celebrity_head_id: &'static str,
    pub celebrity_influence: f64,
    pub temperament: Temperament,
    pub talent: Talent,
}

impl StarterDog {
    pub fn genes(&self) -> GeneSet {
        GeneSet {
            body_type: self.body_type,
            coat_color: self.coat_color,
            marking_pattern: self.marking_pattern,
            marking_color: self.marking_color,
            ear_type: self.ear_type,
            tail_type: self.tail_type,
            celebrity_head_id: self.celebrity_head_id.to_string(),
            celebrity_influence: self.celebrity_influence,
            temperament: self.temperament,
            talent: self.talent,
            special_trait: None,
        }
    }

    pub fn price(&self) -> u64 {
        self.rarity.purchase_price()
    }
}

const BROWN: Color = Color::new(0x8B, 0x45, 0x13);
const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
const BLACK: Color = Color::new(0x00, 0x00, 0x00);
const TAN: Color = Color::new(0xD2, 0xB4, 0x8C);
const SIENNA: Color = Color::new(0xA0, 0x52, 0x2D);
const WHEAT: Color = Color::new(0xF5, 0xDE, 0xB3);
const GOLDEN: Color = Color::new(0xFF, 0xD7, 0x00);
const CHOCOLATE: Color = Color::new(0xD2, 0x69, 0x1E);

pub static STARTER_DOGS: [StarterDog; 10] = [
    StarterDog {
        name: "Bark Wahlberg",
        rarity: Rarity::COMMON,
        body_type: BodyType::Athletic,
        coat_color: BROWN,
        marking_pattern: MarkingPattern::Solid,
        marking_color: BROWN,
        ear_type: EarType::Pointed,
        tail_type: TailType::Straight,
        celebrity_head_id: "head_wahlberg",
        celebrity_influence: 0.7,
        temperament: Temperament::Energetic,
        talent: Talent::Acting,
    },
    StarterDog {
        name: "Sarah Jessica Barker",
        rarity: Rarity::UNCOMMON,
        body_type: BodyType::Slim,
        coat_color: WHITE,
        marking_pattern: MarkingPattern::Spotted,
        marking_color: BLACK,
        ear_type: EarType::Large,
        tail_type: TailType::Curly,
        celebrity_head_id: "head_sjp",
        celebrity_influence: 0.8,
        temperament: Temperament::Sophisticated,
        talent: Talent::Acting,
    },
    StarterDog {
        name: "Chew-barka",
        rarity: Rarity::COMMON,
        body_type: BodyType::Fluffy,
        coat_color: TAN,
        marking_pattern: MarkingPattern::Striped,
        marking_color: BROWN,
        ear_type: EarType::Floppy,
        tail_type: TailType::Bushy,
        celebrity_head_id: "head_chewbarka",
        celebrity_influence: 0.6,
        temperament: Temperament::Playful,
        talent: Talent::Comedy,
    },
    StarterDog {
        name: "Pupcasso",
        rarity: Rarity::UNCOMMON,
        body_type: BodyType::Stocky,
        coat_color: SIENNA,
        marking_pattern: MarkingPattern::Patched,
        marking_color: WHITE,
        ear_type: EarType::Small,
        tail_type: TailType::Short,
        celebrity_head_id: "head_pupcasso",
        celebrity_influence: 0.75,
        temperament: Temperament::Sophisticated,
        talent: Talent::Modeling,
    },
    StarterDog {
        name: "Bark Obama",
        rarity: Rarity::RARE,
        body_type: BodyType::Athletic,
        coat_color: BLACK,
        marking_pattern: MarkingPattern::Solid,
        marking_color: BLACK,
        ear_type: EarType::Pointed,
        tail_type: TailType::Straight,
        celebrity_head_id: "head_obama",
        celebrity_influence: 0.85,
        temperament: Temperament::Sophisticated,
        talent: Talent::Acting,
    },
    StarterDog {
        name: "Fluff Daddy",
        rarity: Rarity::COMMON,
        body_type: BodyType::Fluffy,
        coat_color: WHITE,
        marking_pattern: MarkingPattern::Solid,
        marking_color: WHITE,
        ear_type: EarType::Floppy,
        tail_type: TailType::Bushy,
        celebrity_head_id: "head_fluff_daddy",
        celebrity_influence: 0.65,
        temperament: Temperament::Goofy,
        talent: Talent::Singing,
    },
    StarterDog {
        name: "Hairy Styles",
        rarity: Rarity::UNCOMMON,
        body_type: BodyType::Slim,
        coat_color: BROWN,
        marking_pattern: MarkingPattern::Spotted,
        marking_color: WHEAT,
        ear_type: EarType::Large,
        tail_type: TailType::Curly,
        celebrity_head_id: "head_hairy_styles",
        celebrity_influence: 0.7,
        temperament: Temperament::Playful,
        talent: Talent::Singing,
    },
    StarterDog {
        name: "Lick Jagger",
        rarity: Rarity::UNCOMMON,
        body_type: BodyType::Athletic,
        coat_color: CHOCOLATE,
        marking_pattern: MarkingPattern::Striped,
        marking_color: BLACK,
        ear_type: EarType::Pointed,
        tail_type: TailType::Straight,
        celebrity_head_id: "head_lick_jagger",
        celebrity_influence: 0.75,
        temperament: Temperament::Energetic,
        talent: Talent::Singing,
    },
    StarterDog {
        name: "Droolius Caesar",
        rarity: Rarity::UNCOMMON,
        body_type: BodyType::Stocky,
        coat_color: GOLDEN,
        marking_pattern: MarkingPattern::Solid,
        marking_color: GOLDEN,
        ear_type: EarType::Small,
        tail_type: TailType::Short,
        celebrity_head_id: "head_droolius",
        celebrity_influence: 0.8,
        temperament: Temperament::Sophisticated,
        talent: Talent::Acting,
    },
    StarterDog {
        name: "Winona Ruffer",
        rarity: Rarity::COMMON,
        body_type: BodyType::Slim,
        coat_color: BLACK,
        marking_pattern: MarkingPattern::Patched,
        marking_color: WHITE,
        ear_type: EarType::Large,
        tail_type: TailType::Curly,
        celebrity_head_id: "head_winona",
        celebrity_influence: 0.65,
        temperament: Temperament::Goofy,
        talent: Talent::Acting,
    },
];

pub fn find_starter(name: &str) -> Option<&'static StarterDog> {
    STARTER_DOGS.iter().find(|s| s.name == name)
}
