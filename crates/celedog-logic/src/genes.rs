//! Gene set: the fixed mapping of trait dimensions that defines a dog.
//!
//! A `GeneSet` always carries every dimension; only `special_trait` may be
//! absent. Field names serialize in the camelCase wire form (`bodyType`,
//! `coatColor`, ...) and colors as `#RRGGBB` strings, so a persisted dog
//! round-trips through any JSON store unchanged.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{
    BodyType, EarType, MarkingPattern, SpecialTrait, TailType, Talent, Temperament, COAT_COLORS,
    DEFAULT_CELEBRITY_HEAD,
};
use crate::random::choose;

/// Gene validation failures. A dog cannot be constructed from a gene set
/// that fails these checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneError {
    #[error("celebrity influence {0} is outside [0, 1]")]
    InfluenceOutOfRange(f64),
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    #[error("celebrity head id must not be empty")]
    MissingCelebrityHead,
}

// ============================================================================
// COLOR
// ============================================================================

/// RGB color value used by the coat and marking dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, hex digits case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, GeneError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GeneError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| GeneError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = GeneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ============================================================================
// GENE SET
// ============================================================================

/// The eleven named gene dimensions, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneDimension {
    BodyType,
    CoatColor,
    MarkingPattern,
    MarkingColor,
    EarType,
    TailType,
    CelebrityHeadId,
    CelebrityInfluence,
    Temperament,
    Talent,
    SpecialTrait,
}

impl GeneDimension {
    pub const ALL: [GeneDimension; 11] = [
        GeneDimension::BodyType,
        GeneDimension::CoatColor,
        GeneDimension::MarkingPattern,
        GeneDimension::MarkingColor,
        GeneDimension::EarType,
        GeneDimension::TailType,
        GeneDimension::CelebrityHeadId,
        GeneDimension::CelebrityInfluence,
        GeneDimension::Temperament,
        GeneDimension::Talent,
        GeneDimension::SpecialTrait,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::BodyType => "bodyType",
            Self::CoatColor => "coatColor",
            Self::MarkingPattern => "markingPattern",
            Self::MarkingColor => "markingColor",
            Self::EarType => "earType",
            Self::TailType => "tailType",
            Self::CelebrityHeadId => "celebrityHeadId",
            Self::CelebrityInfluence => "celebrityInfluence",
            Self::Temperament => "temperament",
            Self::Talent => "talent",
            Self::SpecialTrait => "specialTrait",
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::CoatColor | Self::MarkingColor)
    }
}

impl fmt::Display for GeneDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Complete genetic makeup of a dog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneSet {
    pub body_type: BodyType,
    pub coat_color: Color,
    pub marking_pattern: MarkingPattern,
    pub marking_color: Color,
    pub ear_type: EarType,
    pub tail_type: TailType,
    /// Reference token for the celebrity head art. Carried through breeding
    /// from one parent, never mutated.
    pub celebrity_head_id: String,
    /// 0.0–1.0.
    pub celebrity_influence: f64,
    pub temperament: Temperament,
    pub talent: Talent,
    #[serde(default)]
    pub special_trait: Option<SpecialTrait>,
}

impl GeneSet {
    /// Random founder genes drawn from the catalogs.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            body_type: *choose(rng, &BodyType::ALL),
            coat_color: *choose(rng, &COAT_COLORS),
            marking_pattern: *choose(rng, &MarkingPattern::ALL),
            marking_color: *choose(rng, &COAT_COLORS),
            ear_type: *choose(rng, &EarType::ALL),
            tail_type: *choose(rng, &TailType::ALL),
            celebrity_head_id: DEFAULT_CELEBRITY_HEAD.to_string(),
            celebrity_influence: rng.gen::<f64>(),
            temperament: *choose(rng, &Temperament::ALL),
            talent: *choose(rng, &Talent::ALL),
            special_trait: None,
        }
    }

    /// Check the invariants the type system cannot express.
    pub fn validate(&self) -> Result<(), GeneError> {
        if !(0.0..=1.0).contains(&self.celebrity_influence) {
            return Err(GeneError::InfluenceOutOfRange(self.celebrity_influence));
        }
        if self.celebrity_head_id.trim().is_empty() {
            return Err(GeneError::MissingCelebrityHead);
        }
        Ok(())
    }

    pub fn has_special_trait(&self) -> bool {
        self.special_trait.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_genes() -> GeneSet {
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

    #[test]
    fn hex_parse_and_format() {
        let c = Color::from_hex("#8b4513").unwrap();
        assert_eq!(c, Color::new(0x8B, 0x45, 0x13));
        assert_eq!(c.to_hex(), "#8B4513");
        assert_eq!(Color::from_hex("FFD700").unwrap(), Color::new(255, 215, 0));
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ÿÿÿ").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_value(sample_genes()).unwrap();
        let obj = json.as_object().unwrap();
        for dim in GeneDimension::ALL {
            assert!(obj.contains_key(dim.wire_name()), "missing {}", dim);
        }
        assert_eq!(obj["coatColor"], "#8B4513");
        assert_eq!(obj["bodyType"], "athletic");
        assert!(obj["specialTrait"].is_null());
    }

    #[test]
    fn missing_dimension_fails_to_deserialize() {
        let mut json = serde_json::to_value(sample_genes()).unwrap();
        json.as_object_mut().unwrap().remove("talent");
        assert!(serde_json::from_value::<GeneSet>(json).is_err());
    }

    #[test]
    fn special_trait_may_be_absent() {
        let mut json = serde_json::to_value(sample_genes()).unwrap();
        json.as_object_mut().unwrap().remove("specialTrait");
        let genes: GeneSet = serde_json::from_value(json).unwrap();
        assert_eq!(genes.special_trait, None);
    }

    #[test]
    fn validate_influence_range() {
        let mut genes = sample_genes();
        assert!(genes.validate().is_ok());
        genes.celebrity_influence = 1.2;
        assert_eq!(genes.validate(), Err(GeneError::InfluenceOutOfRange(1.2)));
        genes.celebrity_influence = f64::NAN;
        assert!(genes.validate().is_err());
    }

    #[test]
    fn random_genes_are_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let genes = GeneSet::random(&mut rng);
            assert!(genes.validate().is_ok());
            assert!(genes.special_trait.is_none());
        }
    }
}
