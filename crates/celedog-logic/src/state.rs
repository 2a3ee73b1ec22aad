//! Game state: the one mutable resource the breeding core reads and writes.
//!
//! Owned by the caller and passed explicitly into every operation; there is
//! no process-wide instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::dog::{Dog, DogId};
use crate::lineage::{self, Pedigree};
use crate::rarity::Rarity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KennelError {
    #[error("Kennel is full ({capacity} dogs).")]
    Full { capacity: usize },
    #[error("dog {0} is already in the kennel")]
    Duplicate(DogId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub gold: u64,
    pub kennel_capacity: usize,
    /// Number of kennel expansions bought.
    pub expansion_level: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Player {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gold: config.economy.starting_gold,
            kennel_capacity: config.kennel.default_capacity,
            expansion_level: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_breeds: u32,
    pub total_sold: u32,
    pub highest_generation: u32,
    /// Breeds per resulting tier, index 0 = Common.
    pub rarity_breeds: [u32; 5],
}

impl Stats {
    pub fn breeds_of(&self, rarity: Rarity) -> u32 {
        self.rarity_breeds[rarity.tier() as usize - 1]
    }

    pub(crate) fn record_breed(&mut self, offspring: &Dog) {
        self.total_breeds += 1;
        self.rarity_breeds[offspring.rarity().tier() as usize - 1] += 1;
        self.highest_generation = self.highest_generation.max(offspring.generation());
    }
}

/// UI preferences, carried through saves untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub tutorial_completed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            tutorial_completed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    dogs: HashMap<DogId, Dog>,
    pub lineage: Pedigree,
    pub stats: Stats,
    pub settings: Settings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::from_config(&config),
            config,
            dogs: HashMap::new(),
            lineage: Pedigree::new(),
            stats: Stats::default(),
            settings: Settings::default(),
        }
    }

    /// Rebuild from saved parts; the kennel is filled without a capacity
    /// check so an over-full save still loads.
    pub fn from_parts(
        config: GameConfig,
        player: Player,
        dogs: Vec<Dog>,
        lineage: Pedigree,
        stats: Stats,
        settings: Settings,
    ) -> Self {
        Self {
            config,
            player,
            dogs: dogs.into_iter().map(|d| (d.id(), d)).collect(),
            lineage,
            stats,
            settings,
        }
    }

    /// Back to a fresh game under the same config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Insert a dog, register it in the pedigree, and track the highest
    /// generation. Rejected when the kennel is full or the id is taken.
    pub fn add_dog(&mut self, dog: Dog) -> Result<(), KennelError> {
        if self.is_kennel_full() {
            return Err(KennelError::Full {
                capacity: self.player.kennel_capacity,
            });
        }
        if self.dogs.contains_key(&dog.id()) {
            return Err(KennelError::Duplicate(dog.id()));
        }

        self.lineage.add_dog(&dog);
        self.stats.highest_generation = self.stats.highest_generation.max(dog.generation());
        self.dogs.insert(dog.id(), dog);
        Ok(())
    }

    /// Take a dog out of the kennel. Its pedigree entry stays so relatives
    /// keep their history.
    pub fn remove_dog(&mut self, id: &DogId) -> Option<Dog> {
        self.dogs.remove(id)
    }

    pub fn dog(&self, id: &DogId) -> Option<&Dog> {
        self.dogs.get(id)
    }

    pub fn contains_dog(&self, id: &DogId) -> bool {
        self.dogs.contains_key(id)
    }

    /// Owned dogs, oldest first (ties broken by id).
    pub fn dogs(&self) -> Vec<&Dog> {
        let mut dogs: Vec<&Dog> = self.dogs.values().collect();
        dogs.sort_by_key(|d| (d.birth_time(), d.id()));
        dogs
    }

    pub fn dog_count(&self) -> usize {
        self.dogs.len()
    }

    pub fn dogs_in_generation(&self, generation: u32) -> Vec<&Dog> {
        lineage::dogs_in_generation(self.dogs(), generation)
    }

    /// `(current, max)`.
    pub fn kennel_usage(&self) -> (usize, usize) {
        (self.dogs.len(), self.player.kennel_capacity)
    }

    pub fn is_kennel_full(&self) -> bool {
        self.dogs.len() >= self.player.kennel_capacity
    }

    /// Deduct `amount` if affordable; returns whether it was.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if self.player.gold >= amount {
            self.player.gold -= amount;
            true
        } else {
            false
        }
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.player.gold = self.player.gold.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{founder, genes_a, genes_b};

    fn small_state(capacity: usize) -> GameState {
        let mut config = GameConfig::default();
        config.kennel.default_capacity = capacity;
        GameState::new(config)
    }

    #[test]
    fn new_state_uses_config() {
        let state = GameState::default();
        assert_eq!(state.player.gold, 1_000);
        assert_eq!(state.kennel_usage(), (0, 10));
        assert_eq!(state.stats, Stats::default());
        assert!(state.settings.sound_enabled);
    }

    #[test]
    fn add_dog_rejects_when_full() {
        let mut state = small_state(1);
        state.add_dog(founder("A", 1, genes_a(), 1)).unwrap();
        assert!(state.is_kennel_full());
        let err = state.add_dog(founder("B", 1, genes_b(), 2)).unwrap_err();
        assert_eq!(err, KennelError::Full { capacity: 1 });
        assert_eq!(state.dog_count(), 1);
    }

    #[test]
    fn add_dog_rejects_duplicates() {
        let mut state = GameState::default();
        let dog = founder("A", 1, genes_a(), 1);
        state.add_dog(dog.clone()).unwrap();
        assert_eq!(state.add_dog(dog.clone()), Err(KennelError::Duplicate(dog.id())));
    }

    #[test]
    fn add_dog_registers_lineage() {
        let mut state = GameState::default();
        let dog = founder("A", 1, genes_a(), 1);
        state.add_dog(dog.clone()).unwrap();
        assert!(state.lineage.contains(&dog.id()));
    }

    #[test]
    fn remove_keeps_pedigree() {
        let mut state = GameState::default();
        let dog = founder("A", 1, genes_a(), 1);
        let id = dog.id();
        state.add_dog(dog).unwrap();
        assert!(state.remove_dog(&id).is_some());
        assert!(state.dog(&id).is_none());
        assert!(state.lineage.contains(&id));
        assert!(state.remove_dog(&id).is_none());
    }

    #[test]
    fn gold_helpers() {
        let mut state = GameState::default();
        assert!(!state.spend_gold(1_001));
        assert_eq!(state.player.gold, 1_000);
        assert!(state.spend_gold(1_000));
        state.add_gold(5);
        assert_eq!(state.player.gold, 5);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = GameState::default();
        state.add_dog(founder("A", 1, genes_a(), 1)).unwrap();
        state.player.gold = 3;
        state.stats.total_breeds = 9;
        state.reset();
        assert_eq!(state.player.gold, 1_000);
        assert_eq!(state.dog_count(), 0);
        assert!(state.lineage.is_empty());
        assert_eq!(state.stats.total_breeds, 0);
    }

    #[test]
    fn dogs_are_listed_oldest_first() {
        let mut state = GameState::default();
        let mut r = crate::fixtures::rng(3);
        let young = Dog::founder(genes_a(), "Young", Rarity::COMMON, &mut r, 500).unwrap();
        let old = Dog::founder(genes_b(), "Old", Rarity::COMMON, &mut r, 100).unwrap();
        state.add_dog(young).unwrap();
        state.add_dog(old).unwrap();
        let names: Vec<_> = state.dogs().iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, ["Old", "Young"]);
        assert_eq!(state.dogs_in_generation(0).len(), 2);
        assert!(state.dogs_in_generation(1).is_empty());
    }
}
