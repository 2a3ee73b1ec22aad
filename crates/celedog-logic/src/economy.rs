//! Economy engine: prices, breeding costs, and gold transactions.
//!
//! Gold only moves through [`process_purchase`], [`process_sale`] and
//! [`award_gold`]. Purchases are all-or-nothing: an unaffordable cost leaves
//! the balance untouched.

use serde::Serialize;
use thiserror::Error;

use crate::config::EconomyConfig;
use crate::dog::{Dog, SELL_MULTIPLIER};
use crate::rarity::Rarity;
use crate::state::Player;

/// Expected income during active play, used for "time to afford" hints.
pub const GOLD_PER_MINUTE: u64 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("Insufficient funds. Need {cost} gold, have {gold}.")]
    InsufficientFunds { cost: u64, gold: u64 },
}

/// Outcome of a completed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub amount: u64,
    pub balance: u64,
    pub message: String,
}

// ============================================================================
// PRICING
// ============================================================================

/// Cost to breed `a` with `b`.
pub fn breeding_cost(a: &Dog, b: &Dog, config: &EconomyConfig) -> u64 {
    let avg_rarity = (a.rarity().tier() as f64 + b.rarity().tier() as f64) / 2.0;
    let avg_generation = (a.generation() as f64 + b.generation() as f64) / 2.0;
    breeding_cost_for(avg_rarity, avg_generation, config)
}

/// `floor(base × rarity multiplier × (1 + mean generation × bonus))`.
///
/// The multiplier is looked up at `floor(avg_rarity) - 1`; anything outside
/// the table uses 1.
pub fn breeding_cost_for(avg_rarity: f64, avg_generation: f64, config: &EconomyConfig) -> u64 {
    let index = avg_rarity.floor() as i64 - 1;
    let rarity_multiplier = usize::try_from(index)
        .ok()
        .and_then(|i| config.rarity_multipliers.get(i))
        .copied()
        .unwrap_or(1.0);
    let generation_multiplier = 1.0 + avg_generation * config.generation_bonus;
    (config.breeding_base_cost as f64 * rarity_multiplier * generation_multiplier).floor() as u64
}

pub fn purchase_price(rarity: Rarity) -> u64 {
    rarity.purchase_price()
}

/// Half the purchase price for the dog's tier, rounded down.
pub fn sell_value(dog: &Dog) -> u64 {
    (purchase_price(dog.rarity()) as f64 * SELL_MULTIPLIER).floor() as u64
}

/// Price of the next kennel expansion, or `None` once all are bought.
pub fn kennel_expansion_cost(level: usize, config: &EconomyConfig) -> Option<u64> {
    config.kennel_expansion_costs.get(level).copied()
}

/// Whole minutes of play needed to cover `cost`.
pub fn time_to_afford(gold: u64, cost: u64) -> u64 {
    if gold >= cost {
        return 0;
    }
    (cost - gold).div_ceil(GOLD_PER_MINUTE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DogEconomics {
    pub purchase_price: u64,
    pub sell_value: u64,
    /// Sell value minus purchase price; negative for every tier.
    pub profit: i64,
    /// Profit as a percentage of the purchase price.
    pub profit_margin: f64,
}

pub fn dog_economics(dog: &Dog) -> DogEconomics {
    let price = purchase_price(dog.rarity());
    let sell = sell_value(dog);
    let profit = sell as i64 - price as i64;
    DogEconomics {
        purchase_price: price,
        sell_value: sell,
        profit,
        profit_margin: profit as f64 / price as f64 * 100.0,
    }
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

pub fn can_afford(player: &Player, cost: u64) -> bool {
    player.gold >= cost
}

/// Deduct exactly `cost`, or fail with the balance unchanged.
pub fn process_purchase(
    player: &mut Player,
    cost: u64,
) -> Result<TransactionReceipt, TransactionError> {
    if !can_afford(player, cost) {
        return Err(TransactionError::InsufficientFunds {
            cost,
            gold: player.gold,
        });
    }
    player.gold -= cost;
    Ok(TransactionReceipt {
        amount: cost,
        balance: player.gold,
        message: format!("Purchase successful. {} gold spent.", cost),
    })
}

/// Credit exactly `value`. Always succeeds.
pub fn process_sale(player: &mut Player, value: u64) -> TransactionReceipt {
    player.gold = player.gold.saturating_add(value);
    TransactionReceipt {
        amount: value,
        balance: player.gold,
        message: format!("Sale successful. {} gold earned.", value),
    }
}

pub fn award_gold(player: &mut Player, amount: u64, reason: &str) -> TransactionReceipt {
    player.gold = player.gold.saturating_add(amount);
    log::info!("awarded {} gold ({})", amount, reason);
    TransactionReceipt {
        amount,
        balance: player.gold,
        message: format!("Earned {} gold from {}.", amount, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{founder, genes_a, genes_b};

    fn player(gold: u64) -> Player {
        Player {
            gold,
            ..Player::default()
        }
    }

    #[test]
    fn base_breeding_cost_for_commons() {
        let cfg = EconomyConfig::default();
        let a = founder("A", 1, genes_a(), 1);
        let b = founder("B", 1, genes_b(), 2);
        assert_eq!(breeding_cost(&a, &b, &cfg), 100);
    }

    #[test]
    fn cost_table_examples() {
        let cfg = EconomyConfig::default();
        // mean rarity 1.5 floors to tier 1
        assert_eq!(breeding_cost_for(1.5, 0.0, &cfg), 100);
        assert_eq!(breeding_cost_for(3.0, 0.0, &cfg), 500);
        assert_eq!(breeding_cost_for(5.0, 0.0, &cfg), 2_000);
        // generation 2: 100 × 1 × 1.3
        assert_eq!(breeding_cost_for(1.0, 2.0, &cfg), 130);
        // uncommon pair at generation 2: 200 × 1.3
        assert_eq!(breeding_cost_for(2.0, 2.0, &cfg), 260);
    }

    #[test]
    fn out_of_table_rarity_uses_unit_multiplier() {
        let cfg = EconomyConfig::default();
        assert_eq!(breeding_cost_for(0.0, 0.0, &cfg), 100);
        assert_eq!(breeding_cost_for(7.0, 0.0, &cfg), 100);
    }

    #[test]
    fn cost_is_monotonic_in_rarity_and_generation() {
        let cfg = EconomyConfig::default();
        let rarities: Vec<f64> = (2..=10).map(|r| r as f64 / 2.0).collect();
        for gen in 0..12 {
            let g = gen as f64 / 2.0;
            for pair in rarities.windows(2) {
                assert!(breeding_cost_for(pair[0], g, &cfg) <= breeding_cost_for(pair[1], g, &cfg));
            }
        }
        for &r in &rarities {
            for gen in 0..20 {
                let g = gen as f64 / 2.0;
                assert!(breeding_cost_for(r, g, &cfg) <= breeding_cost_for(r, g + 0.5, &cfg));
            }
        }
    }

    #[test]
    fn sell_value_is_half_price() {
        for (tier, expected) in [(1, 250), (2, 1_000), (3, 5_000), (4, 20_000), (5, 75_000)] {
            let dog = founder("A", tier, genes_a(), 1);
            assert_eq!(sell_value(&dog), expected);
            assert_eq!(sell_value(&dog), dog.sell_value());
        }
    }

    #[test]
    fn purchase_is_all_or_nothing() {
        let mut p = player(50);
        let err = process_purchase(&mut p, 100).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient funds. Need 100 gold, have 50.");
        assert_eq!(p.gold, 50);

        let mut p = player(1_000);
        let receipt = process_purchase(&mut p, 100).unwrap();
        assert_eq!(p.gold, 900);
        assert_eq!(receipt.balance, 900);

        let mut p = player(100);
        assert!(process_purchase(&mut p, 100).is_ok());
        assert_eq!(p.gold, 0);
    }

    #[test]
    fn sale_and_award_credit_exactly() {
        let mut p = player(10);
        process_sale(&mut p, 250);
        assert_eq!(p.gold, 260);
        let receipt = award_gold(&mut p, 40, "tutorial");
        assert_eq!(p.gold, 300);
        assert_eq!(receipt.message, "Earned 40 gold from tutorial.");
    }

    #[test]
    fn expansion_costs_run_out() {
        let cfg = EconomyConfig::default();
        assert_eq!(kennel_expansion_cost(0, &cfg), Some(1_000));
        assert_eq!(kennel_expansion_cost(3, &cfg), Some(10_000));
        assert_eq!(kennel_expansion_cost(4, &cfg), None);
    }

    #[test]
    fn time_to_afford_rounds_up() {
        assert_eq!(time_to_afford(500, 100), 0);
        assert_eq!(time_to_afford(0, 40), 1);
        assert_eq!(time_to_afford(0, 41), 2);
        assert_eq!(time_to_afford(60, 100), 1);
    }

    #[test]
    fn dog_economics_loses_half() {
        let dog = founder("A", 2, genes_a(), 1);
        let econ = dog_economics(&dog);
        assert_eq!(econ.purchase_price, 2_000);
        assert_eq!(econ.sell_value, 1_000);
        assert_eq!(econ.profit, -1_000);
        assert!((econ.profit_margin + 50.0).abs() < 1e-9);
    }
}
