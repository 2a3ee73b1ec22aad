//! Dog entity: identity, genes, generation, parents, and derived value.
//!
//! Fields are private: a dog is fixed once constructed, except that the
//! breeding pipeline assigns rarity (and with it value) right after
//! construction via [`Dog::with_rarity`].

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{BodyType, Talent, Temperament};
use crate::genes::{GeneError, GeneSet};
use crate::rarity::{InvalidRarity, Rarity};

/// Sale returns this fraction of the purchase price.
pub const SELL_MULTIPLIER: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DogError {
    #[error("invalid genes: {0}")]
    Genes(#[from] GeneError),
    #[error(transparent)]
    Rarity(#[from] InvalidRarity),
    #[error("a dog has 0 or 2 parents, got {0}")]
    ParentCount(usize),
    #[error("invalid dog id '{0}'")]
    InvalidId(String),
}

/// Opaque, stable dog identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(Uuid);

impl DogId {
    /// Random v4 id drawn from the given source, so seeded runs repeat.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.gen();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DogId {
    type Err = DogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(DogId)
            .map_err(|_| DogError::InvalidId(s.to_string()))
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DogRecord", try_from = "DogRecord")]
pub struct Dog {
    id: DogId,
    genes: GeneSet,
    generation: u32,
    parent_ids: Vec<DogId>,
    birth_time: u64,
    name: String,
    rarity: Rarity,
    value: u64,
}

impl Dog {
    /// Generation-0 dog with no parents and a preset rarity.
    pub fn founder<R: Rng + ?Sized>(
        genes: GeneSet,
        name: impl Into<String>,
        rarity: Rarity,
        rng: &mut R,
        now: u64,
    ) -> Result<Self, DogError> {
        genes.validate()?;
        Ok(Self {
            id: DogId::random(rng),
            genes,
            generation: 0,
            parent_ids: Vec::new(),
            birth_time: now,
            name: name.into(),
            rarity,
            value: rarity.purchase_price(),
        })
    }

    /// Offspring of `a` and `b`, one generation past the older line.
    /// Starts Common; the pipeline scores it with [`Dog::with_rarity`].
    pub fn bred<R: Rng + ?Sized>(
        genes: GeneSet,
        a: &Dog,
        b: &Dog,
        name: impl Into<String>,
        rng: &mut R,
        now: u64,
    ) -> Result<Self, DogError> {
        genes.validate()?;
        Ok(Self {
            id: DogId::random(rng),
            genes,
            generation: a.generation.max(b.generation) + 1,
            parent_ids: vec![a.id, b.id],
            birth_time: now,
            name: name.into(),
            rarity: Rarity::COMMON,
            value: Rarity::COMMON.purchase_price(),
        })
    }

    /// Assign rarity and the value derived from it.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self.value = rarity.purchase_price();
        self
    }

    pub fn id(&self) -> DogId {
        self.id
    }

    pub fn genes(&self) -> &GeneSet {
        &self.genes
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn parent_ids(&self) -> &[DogId] {
        &self.parent_ids
    }

    pub fn birth_time(&self) -> u64 {
        self.birth_time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn rarity_name(&self) -> &'static str {
        self.rarity.name()
    }

    pub fn sell_value(&self) -> u64 {
        (self.value as f64 * SELL_MULTIPLIER).floor() as u64
    }

    pub fn has_parents(&self) -> bool {
        !self.parent_ids.is_empty()
    }

    pub fn has_special_trait(&self) -> bool {
        self.genes.has_special_trait()
    }

    pub fn age_millis(&self, now: u64) -> u64 {
        now.saturating_sub(self.birth_time)
    }

    /// Coarsest whole unit: `42s`, `5m`, `2h`, `3d`.
    pub fn age_string(&self, now: u64) -> String {
        let seconds = self.age_millis(now) / 1000;
        match seconds {
            s if s < 60 => format!("{}s", s),
            s if s < 3_600 => format!("{}m", s / 60),
            s if s < 86_400 => format!("{}h", s / 3_600),
            s => format!("{}d", s / 86_400),
        }
    }

    pub fn summary(&self, now: u64) -> DogSummary {
        DogSummary {
            id: self.id,
            name: self.name.clone(),
            rarity: self.rarity_name(),
            generation: self.generation,
            age: self.age_string(now),
            value: self.value,
            sell_value: self.sell_value(),
            has_parents: self.has_parents(),
            has_special_trait: self.has_special_trait(),
            body_type: self.genes.body_type,
            temperament: self.genes.temperament,
            talent: self.genes.talent,
        }
    }

    pub fn to_record(&self) -> DogRecord {
        DogRecord {
            id: self.id,
            genes: self.genes.clone(),
            generation: self.generation,
            parent_ids: self.parent_ids.clone(),
            birth_time: self.birth_time,
            name: self.name.clone(),
            rarity: self.rarity.tier(),
            value: self.value,
        }
    }

    /// Rebuild a dog from storage. Id, birth time, rarity and value are
    /// restored as stored, not recomputed.
    pub fn from_record(record: DogRecord) -> Result<Self, DogError> {
        record.genes.validate()?;
        let rarity = Rarity::new(record.rarity)?;
        if !matches!(record.parent_ids.len(), 0 | 2) {
            return Err(DogError::ParentCount(record.parent_ids.len()));
        }
        if record.value != rarity.purchase_price() {
            log::warn!(
                "dog {} stored value {} differs from its {} price",
                record.id,
                record.value,
                rarity.name()
            );
        }
        Ok(Self {
            id: record.id,
            genes: record.genes,
            generation: record.generation,
            parent_ids: record.parent_ids,
            birth_time: record.birth_time,
            name: record.name,
            rarity,
            value: record.value,
        })
    }
}

/// Plain storage shape of a dog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogRecord {
    pub id: DogId,
    pub genes: GeneSet,
    pub generation: u32,
    pub parent_ids: Vec<DogId>,
    pub birth_time: u64,
    pub name: String,
    pub rarity: u8,
    pub value: u64,
}

impl From<Dog> for DogRecord {
    fn from(dog: Dog) -> Self {
        dog.to_record()
    }
}

impl TryFrom<DogRecord> for Dog {
    type Error = DogError;

    fn try_from(record: DogRecord) -> Result<Self, Self::Error> {
        Dog::from_record(record)
    }
}

/// Display-ready snapshot for collection lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogSummary {
    pub id: DogId,
    pub name: String,
    pub rarity: &'static str,
    pub generation: u32,
    pub age: String,
    pub value: u64,
    pub sell_value: u64,
    pub has_parents: bool,
    pub has_special_trait: bool,
    pub body_type: BodyType,
    pub temperament: Temperament,
    pub talent: Talent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpecialTrait;
    use crate::fixtures::{founder, genes_a, genes_b, rng};

    #[test]
    fn founder_is_generation_zero() {
        let dog = founder("Bark Wahlberg", 2, genes_a(), 1);
        assert_eq!(dog.generation(), 0);
        assert!(!dog.has_parents());
        assert_eq!(dog.rarity(), Rarity::UNCOMMON);
        assert_eq!(dog.value(), 2_000);
        assert_eq!(dog.sell_value(), 1_000);
    }

    #[test]
    fn bred_generation_is_max_plus_one() {
        let a = founder("A", 1, genes_a(), 1);
        let b = founder("B", 1, genes_b(), 2);
        let child = Dog::bred(genes_a(), &a, &b, "C", &mut rng(3), 10).unwrap();
        assert_eq!(child.generation(), 1);
        let grandchild = Dog::bred(genes_b(), &child, &a, "D", &mut rng(4), 20).unwrap();
        assert_eq!(grandchild.generation(), 2);
        assert_eq!(grandchild.parent_ids(), &[child.id(), a.id()]);
    }

    #[test]
    fn invalid_genes_cannot_construct() {
        let mut genes = genes_a();
        genes.celebrity_influence = -0.1;
        let err = Dog::founder(genes, "Bad", Rarity::COMMON, &mut rng(1), 0).unwrap_err();
        assert!(matches!(err, DogError::Genes(GeneError::InfluenceOutOfRange(_))));
    }

    #[test]
    fn with_rarity_updates_value() {
        let dog = founder("A", 1, genes_a(), 1).with_rarity(Rarity::EPIC);
        assert_eq!(dog.value(), 40_000);
        assert_eq!(dog.rarity_name(), "Epic");
    }

    #[test]
    fn seeded_ids_repeat() {
        assert_eq!(DogId::random(&mut rng(9)), DogId::random(&mut rng(9)));
        assert_ne!(DogId::random(&mut rng(9)), DogId::random(&mut rng(10)));
        let id = DogId::random(&mut rng(9));
        assert_eq!(id.as_uuid().get_version_num(), 4);
        assert_eq!(id.to_string().parse::<DogId>().unwrap(), id);
    }

    #[test]
    fn age_strings() {
        let dog = founder("A", 1, genes_a(), 1);
        assert_eq!(dog.age_string(42_000), "42s");
        assert_eq!(dog.age_string(5 * 60_000 + 10), "5m");
        assert_eq!(dog.age_string(2 * 3_600_000), "2h");
        assert_eq!(dog.age_string(3 * 86_400_000), "3d");
        assert_eq!(dog.age_millis(0), 0);
    }

    #[test]
    fn record_round_trip_preserves_everything() {
        let a = founder("Bark Wahlberg", 1, genes_a(), 1);
        let b = founder("Lick Jagger", 3, genes_b(), 2);
        let mut genes = genes_a();
        genes.special_trait = Some(SpecialTrait::RedCarpet);
        let child = Dog::bred(genes, &a, &b, "Bager", &mut rng(5), 1_700_000_000_000)
            .unwrap()
            .with_rarity(Rarity::RARE);

        let json = serde_json::to_string(&child).unwrap();
        assert!(json.contains("\"parentIds\""));
        assert!(json.contains("\"birthTime\":1700000000000"));
        let back: Dog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, child);
        assert_eq!(back.value(), 10_000);
    }

    #[test]
    fn record_restores_value_verbatim() {
        let dog = founder("A", 2, genes_a(), 1);
        let mut record = dog.to_record();
        record.value = 1_234;
        let restored = Dog::from_record(record).unwrap();
        assert_eq!(restored.value(), 1_234);
        assert_eq!(restored.rarity(), Rarity::UNCOMMON);
    }

    #[test]
    fn record_rejects_bad_rarity_and_parents() {
        let dog = founder("A", 1, genes_a(), 1);
        let mut record = dog.to_record();
        record.rarity = 9;
        assert!(matches!(Dog::from_record(record), Err(DogError::Rarity(_))));

        let mut record = dog.to_record();
        record.parent_ids = vec![dog.id()];
        assert_eq!(Dog::from_record(record), Err(DogError::ParentCount(1)));
    }

    #[test]
    fn summary_reports_display_fields() {
        let dog = founder("Pupcasso", 3, genes_a(), 1);
        let summary = dog.summary(90_000);
        assert_eq!(summary.rarity, "Rare");
        assert_eq!(summary.age, "1m");
        assert_eq!(summary.sell_value, 5_000);
        assert_eq!(summary.body_type, BodyType::Athletic);
    }
}
