//! Pure breeding logic for Celedog.
//!
//! This crate holds every rule of the breeding game that is independent of
//! any renderer, scene graph, or storage medium. Functions take plain data
//! plus an injected random source and return results, so the whole pipeline
//! is unit-testable and reproducible from a seed.
//!
//! A breed runs: validate parents → charge cost → mix genes → score rarity →
//! generate name → build the dog → update pedigree and kennel.
//!
//! ```
//! use celedog_logic::{breeding, starters, shop, state::GameState};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut state = GameState::default();
//! let wahlberg = starters::find_starter("Bark Wahlberg").unwrap();
//! let winona = starters::find_starter("Winona Ruffer").unwrap();
//! state.player.gold += 1_000;
//! let a = shop::buy_starter(&mut state, wahlberg, &mut rng, 0).unwrap();
//! let b = shop::buy_starter(&mut state, winona, &mut rng, 0).unwrap();
//!
//! let result = breeding::breed(&mut state, &a.id(), &b.id(), &mut rng);
//! assert!(result.success, "{}", result.message);
//! assert_eq!(result.offspring.unwrap().generation(), 1);
//! assert_eq!(state.player.gold, 900);
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`appearance`] | Sprite layer plan (shapes and colors) derived from genes |
//! | [`breeding`] | Breeding orchestrator: validation, charge, commit, refund |
//! | [`catalog`] | Valid values for every categorical gene dimension |
//! | [`config`] | Economy and kennel tuning, loadable from JSON |
//! | [`dog`] | Dog entity, ids, storage records |
//! | [`economy`] | Breeding cost, prices, sell value, gold transactions |
//! | [`genes`] | Gene set, colors, gene dimensions |
//! | [`genetics`] | Per-dimension inherit/blend/mutate rules, synergy detection |
//! | [`lineage`] | Pedigree graph with bounded ancestry/descendant walks |
//! | [`naming`] | Weighted multi-strategy name generator |
//! | [`persistence`] | Versioned JSON and bincode save files |
//! | [`random`] | Shared choice helpers over an injected RNG |
//! | [`rarity`] | Rarity tiers, scoring, expected distribution |
//! | [`shop`] | Starter purchases, sales, kennel expansion |
//! | [`starters`] | The ten founding dogs |
//! | [`state`] | Player, stats, settings and the owned game state |

pub mod appearance;
pub mod breeding;
pub mod catalog;
pub mod config;
pub mod dog;
pub mod economy;
pub mod genes;
pub mod genetics;
pub mod lineage;
pub mod naming;
pub mod persistence;
pub mod random;
pub mod rarity;
pub mod shop;
pub mod starters;
pub mod state;

#[cfg(test)]
mod fixtures;
