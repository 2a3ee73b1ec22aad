//! Breeding orchestrator: one breed as a single transaction over
//! [`GameState`].
//!
//! ```text
//! Validate → Cost-check → Capacity-check → Charge → Generate → Score → Name → Commit → Report
//! ```
//!
//! Nothing is mutated before Charge. Any failure between Charge and a
//! successful Commit refunds the cost before reporting, so the caller sees
//! either every mutation (gold, kennel, pedigree, stats) or none.

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::dog::{now_millis, Dog, DogError, DogId};
use crate::economy::{self, TransactionError};
use crate::genetics;
use crate::naming;
use crate::rarity::{self, RarityDistribution};
use crate::state::{GameState, KennelError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreedError {
    #[error("Invalid parents selected.")]
    InvalidParents,
    #[error("Cannot breed a dog with itself!")]
    SelfBreeding,
    #[error("Insufficient funds. Need {required} gold, have {available}.")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("Kennel is full! Sell some dogs to make space.")]
    KennelFull { cost: u64 },
    #[error("Failed to add offspring to kennel.")]
    CommitFailed {
        cost: u64,
        #[source]
        source: KennelError,
    },
    #[error("Offspring could not be created: {source}")]
    InvalidOffspring {
        cost: u64,
        #[source]
        source: DogError,
    },
}

impl BreedError {
    /// Cost reported alongside the failure (0 before a cost is known).
    pub fn cost(&self) -> u64 {
        match self {
            Self::InvalidParents | Self::SelfBreeding => 0,
            Self::InsufficientFunds { required, .. } => *required,
            Self::KennelFull { cost }
            | Self::CommitFailed { cost, .. }
            | Self::InvalidOffspring { cost, .. } => *cost,
        }
    }
}

/// What the UI receives from a breed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedResult {
    pub success: bool,
    pub offspring: Option<Dog>,
    pub message: String,
    pub cost: u64,
}

impl From<Result<(Dog, u64), BreedError>> for BreedResult {
    fn from(result: Result<(Dog, u64), BreedError>) -> Self {
        match result {
            Ok((dog, cost)) => Self {
                success: true,
                message: format!("{} was born! {} gold spent.", dog.name(), cost),
                offspring: Some(dog),
                cost,
            },
            Err(err) => Self {
                success: false,
                offspring: None,
                message: err.to_string(),
                cost: err.cost(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedCheck {
    pub can_breed: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingPreview {
    pub cost: u64,
    pub expected_generation: u32,
    /// Assumes no gene bonuses, which are unknown until the breed runs.
    pub rarity_distribution: RarityDistribution,
    pub parent_names: [String; 2],
    pub example_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingStats {
    pub times_parent: usize,
    /// Offspring still in the kennel.
    pub offspring: Vec<DogId>,
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// Breed two owned dogs. Never panics; every failure comes back as a
/// structured result with a display message.
pub fn breed<R: Rng + ?Sized>(
    state: &mut GameState,
    a: &DogId,
    b: &DogId,
    rng: &mut R,
) -> BreedResult {
    breed_at(state, a, b, rng, now_millis())
}

/// [`breed`] with an explicit birth timestamp.
pub fn breed_at<R: Rng + ?Sized>(
    state: &mut GameState,
    a: &DogId,
    b: &DogId,
    rng: &mut R,
    now: u64,
) -> BreedResult {
    try_breed(state, a, b, rng, now).into()
}

/// The breed pipeline. Returns the committed offspring and the cost paid.
pub fn try_breed<R: Rng + ?Sized>(
    state: &mut GameState,
    a: &DogId,
    b: &DogId,
    rng: &mut R,
    now: u64,
) -> Result<(Dog, u64), BreedError> {
    // Validate
    let (parent_a, parent_b) = match (state.dog(a), state.dog(b)) {
        (Some(pa), Some(pb)) => (pa.clone(), pb.clone()),
        _ => return Err(BreedError::InvalidParents),
    };
    if a == b {
        return Err(BreedError::SelfBreeding);
    }

    // Cost-check
    let cost = economy::breeding_cost(&parent_a, &parent_b, &state.config.economy);
    if !economy::can_afford(&state.player, cost) {
        return Err(BreedError::InsufficientFunds {
            required: cost,
            available: state.player.gold,
        });
    }

    // Capacity-check
    if state.is_kennel_full() {
        return Err(BreedError::KennelFull { cost });
    }

    // Charge
    economy::process_purchase(&mut state.player, cost).map_err(|e| match e {
        TransactionError::InsufficientFunds { cost, gold } => BreedError::InsufficientFunds {
            required: cost,
            available: gold,
        },
    })?;

    // Generate
    let genes = genetics::breed(parent_a.genes(), parent_b.genes(), rng);
    // Score
    let rarity = rarity::calculate_rarity(parent_a.rarity(), parent_b.rarity(), &genes, rng);
    // Name
    let name = naming::generate_name(parent_a.name(), parent_b.name(), &genes, rng);

    let offspring = match Dog::bred(genes, &parent_a, &parent_b, name, rng, now) {
        Ok(dog) => dog.with_rarity(rarity),
        Err(source) => {
            refund(state, cost);
            return Err(BreedError::InvalidOffspring { cost, source });
        }
    };

    // Commit
    commit_offspring(state, offspring.clone(), cost)?;
    Ok((offspring, cost))
}

/// Insert an already-paid-for offspring and record the breed. A rejected
/// insert refunds `cost` and leaves stats untouched.
pub fn commit_offspring(state: &mut GameState, offspring: Dog, cost: u64) -> Result<(), BreedError> {
    let stats_entry = offspring.clone();
    if let Err(source) = state.add_dog(offspring) {
        refund(state, cost);
        log::warn!("offspring rejected ({}), refunded {} gold", source, cost);
        return Err(BreedError::CommitFailed { cost, source });
    }

    state.stats.record_breed(&stats_entry);
    log::info!(
        "bred {} (gen {}, {}) for {} gold",
        stats_entry.name(),
        stats_entry.generation(),
        stats_entry.rarity_name(),
        cost
    );
    Ok(())
}

fn refund(state: &mut GameState, cost: u64) {
    economy::process_sale(&mut state.player, cost);
}

// ============================================================================
// QUERIES
// ============================================================================

/// Same checks as [`try_breed`], in the same order, without mutating.
pub fn can_breed(state: &GameState, a: &DogId, b: &DogId) -> BreedCheck {
    let reject = |reason: String| BreedCheck {
        can_breed: false,
        reason,
    };

    let (parent_a, parent_b) = match (state.dog(a), state.dog(b)) {
        (Some(pa), Some(pb)) => (pa, pb),
        _ => return reject("Invalid parents".into()),
    };
    if a == b {
        return reject("Cannot breed with self".into());
    }
    let cost = economy::breeding_cost(parent_a, parent_b, &state.config.economy);
    if !economy::can_afford(&state.player, cost) {
        return reject(format!("Need {} gold", cost));
    }
    if state.is_kennel_full() {
        return reject("Kennel is full".into());
    }

    BreedCheck {
        can_breed: true,
        reason: "Ready to breed".into(),
    }
}

/// Cost, generation, rarity odds and a sample name for a pairing. `None`
/// when either parent is missing. Consumes no randomness.
pub fn breeding_preview(state: &GameState, a: &DogId, b: &DogId) -> Option<BreedingPreview> {
    let parent_a = state.dog(a)?;
    let parent_b = state.dog(b)?;

    Some(BreedingPreview {
        cost: economy::breeding_cost(parent_a, parent_b, &state.config.economy),
        expected_generation: parent_a.generation().max(parent_b.generation()) + 1,
        rarity_distribution: rarity::expected_distribution(
            parent_a.rarity(),
            parent_b.rarity(),
            false,
            false,
        ),
        parent_names: [parent_a.name().to_string(), parent_b.name().to_string()],
        example_name: naming::portmanteau(parent_a.name(), parent_b.name()),
    })
}

pub fn breeding_stats(state: &GameState, id: &DogId) -> BreedingStats {
    match state.lineage.entry(id) {
        Some(entry) => BreedingStats {
            times_parent: entry.children.len(),
            offspring: entry
                .children
                .iter()
                .filter(|child| state.contains_dog(child))
                .copied()
                .collect(),
        },
        None => BreedingStats {
            times_parent: 0,
            offspring: Vec::new(),
        },
    }
}
