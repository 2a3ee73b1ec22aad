//! Shop: buying starters, selling dogs, expanding the kennel.

use rand::Rng;
use thiserror::Error;

use crate::dog::{Dog, DogError, DogId};
use crate::economy::{self, TransactionError, TransactionReceipt};
use crate::starters::StarterDog;
use crate::state::{GameState, KennelError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShopError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("Kennel is full! Sell some dogs to make space.")]
    KennelFull,
    #[error("Kennel is already at maximum size.")]
    MaxExpansion,
    #[error("No dog with id {0}.")]
    UnknownDog(DogId),
    #[error("Failed to add dog to kennel: {0}")]
    Rejected(#[from] KennelError),
    #[error("invalid starter: {0}")]
    InvalidStarter(#[from] DogError),
}

/// Buy a starter as a generation-0 founder at its preset rarity.
pub fn buy_starter<R: Rng + ?Sized>(
    state: &mut GameState,
    starter: &StarterDog,
    rng: &mut R,
    now: u64,
) -> Result<Dog, ShopError> {
    let price = starter.price();
    if !economy::can_afford(&state.player, price) {
        return Err(TransactionError::InsufficientFunds {
            cost: price,
            gold: state.player.gold,
        }
        .into());
    }
    if state.is_kennel_full() {
        return Err(ShopError::KennelFull);
    }

    let dog = Dog::founder(starter.genes(), starter.name, starter.rarity, rng, now)?;
    economy::process_purchase(&mut state.player, price)?;
    if let Err(err) = state.add_dog(dog.clone()) {
        economy::process_sale(&mut state.player, price);
        log::warn!("starter {} rejected ({}), refunded {} gold", starter.name, err, price);
        return Err(err.into());
    }

    log::info!("bought {} for {} gold", starter.name, price);
    Ok(dog)
}

/// Sell an owned dog for its sell value. Its pedigree entry is kept.
pub fn sell_dog(state: &mut GameState, id: &DogId) -> Result<TransactionReceipt, ShopError> {
    let dog = state.remove_dog(id).ok_or(ShopError::UnknownDog(*id))?;
    let receipt = economy::process_sale(&mut state.player, economy::sell_value(&dog));
    state.stats.total_sold += 1;
    log::info!("sold {} for {} gold", dog.name(), receipt.amount);
    Ok(receipt)
}

/// Buy the next kennel expansion. Returns the new capacity.
pub fn expand_kennel(state: &mut GameState) -> Result<usize, ShopError> {
    let kennel = state.config.kennel.clone();
    if state.player.kennel_capacity >= kennel.max_capacity {
        return Err(ShopError::MaxExpansion);
    }
    let cost = economy::kennel_expansion_cost(state.player.expansion_level, &state.config.economy)
        .ok_or(ShopError::MaxExpansion)?;

    economy::process_purchase(&mut state.player, cost)?;
    state.player.expansion_level += 1;
    state.player.kennel_capacity =
        (state.player.kennel_capacity + kennel.slots_per_expansion).min(kennel.max_capacity);
    log::info!(
        "kennel expanded to {} for {} gold",
        state.player.kennel_capacity,
        cost
    );
    Ok(state.player.kennel_capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::fixtures::rng;
    use crate::lineage::DEFAULT_ANCESTRY_DEPTH;
    use crate::starters::{find_starter, STARTER_DOGS};

    #[test]
    fn buying_a_starter_charges_its_price() {
        let mut state = GameState::default();
        let starter = find_starter("Bark Wahlberg").unwrap();
        let dog = buy_starter(&mut state, starter, &mut rng(1), 0).unwrap();
        assert_eq!(state.player.gold, 500);
        assert_eq!(dog.generation(), 0);
        assert_eq!(dog.name(), "Bark Wahlberg");
        assert!(state.dog(&dog.id()).is_some());
        assert_eq!(state.lineage.ancestry(dog.id(), DEFAULT_ANCESTRY_DEPTH).len(), 1);
    }

    #[test]
    fn unaffordable_starter_is_refused() {
        let mut state = GameState::default();
        let obama = find_starter("Bark Obama").unwrap();
        let err = buy_starter(&mut state, obama, &mut rng(1), 0).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient funds. Need 10000 gold, have 1000.");
        assert_eq!(state.player.gold, 1_000);
        assert_eq!(state.dog_count(), 0);
    }

    #[test]
    fn full_kennel_refuses_purchase() {
        let mut config = GameConfig::default();
        config.kennel.default_capacity = 1;
        let mut state = GameState::new(config);
        state.player.gold = 10_000;
        buy_starter(&mut state, &STARTER_DOGS[0], &mut rng(1), 0).unwrap();
        assert_eq!(
            buy_starter(&mut state, &STARTER_DOGS[2], &mut rng(2), 0),
            Err(ShopError::KennelFull)
        );
        assert_eq!(state.player.gold, 9_500);
    }

    #[test]
    fn selling_credits_half_and_counts() {
        let mut state = GameState::default();
        let dog = buy_starter(&mut state, &STARTER_DOGS[0], &mut rng(1), 0).unwrap();
        let receipt = sell_dog(&mut state, &dog.id()).unwrap();
        assert_eq!(receipt.amount, 250);
        assert_eq!(state.player.gold, 750);
        assert_eq!(state.stats.total_sold, 1);
        assert_eq!(state.dog_count(), 0);
        assert_eq!(sell_dog(&mut state, &dog.id()), Err(ShopError::UnknownDog(dog.id())));
    }

    #[test]
    fn expansions_step_up_to_the_cap() {
        let mut state = GameState::default();
        state.player.gold = 100_000;
        assert_eq!(expand_kennel(&mut state).unwrap(), 20);
        assert_eq!(state.player.gold, 99_000);
        assert_eq!(expand_kennel(&mut state).unwrap(), 30);
        assert_eq!(expand_kennel(&mut state).unwrap(), 40);
        assert_eq!(expand_kennel(&mut state).unwrap(), 50);
        assert_eq!(state.player.gold, 100_000 - 18_500);
        assert_eq!(expand_kennel(&mut state), Err(ShopError::MaxExpansion));
        assert_eq!(state.player.expansion_level, 4);
    }

    #[test]
    fn expansion_needs_gold() {
        let mut state = GameState::default();
        state.player.gold = 999;
        assert!(matches!(
            expand_kennel(&mut state),
            Err(ShopError::Transaction(_))
        ));
        assert_eq!(state.player.kennel_capacity, 10);
        assert_eq!(state.player.gold, 999);
    }
}
