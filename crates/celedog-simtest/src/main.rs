//! Celedog Headless Breeding Harness
//!
//! Drives the breeding core over a seeded RNG and checks its invariants.
//! Runs entirely in-process with no renderer and no storage medium.
//!
//! Usage:
//!   cargo run -p celedog-simtest
//!   cargo run -p celedog-simtest -- --verbose --seed 7 --breeds 500
//!   cargo run -p celedog-simtest -- --config tuning.json

use std::collections::{HashMap, HashSet};

use celedog_logic::breeding;
use celedog_logic::config::GameConfig;
use celedog_logic::dog::{Dog, DogId};
use celedog_logic::economy;
use celedog_logic::genes::{GeneDimension, GeneSet};
use celedog_logic::genetics::{self, TraitOutcome};
use celedog_logic::naming::{self, NameStrategy};
use celedog_logic::persistence;
use celedog_logic::rarity::{self, Rarity};
use celedog_logic::shop;
use celedog_logic::starters::STARTER_DOGS;
use celedog_logic::state::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trials for the statistical sweeps.
const SWEEP_TRIALS: usize = 20_000;
/// Allowed gap between observed and nominal branch frequencies.
const FREQUENCY_TOLERANCE: f64 = 0.02;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    seed: u64,
    breeds: usize,
    config_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        seed: 42,
        breeds: 300,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = value.parse().map_err(|e| format!("bad --seed: {}", e))?;
            }
            "--breeds" => {
                let value = args.next().ok_or("--breeds needs a value")?;
                options.breeds = value.parse().map_err(|e| format!("bad --breeds: {}", e))?;
            }
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(options)
}

fn main() {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let default_level = if options.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("=== Celedog Breeding Harness (seed {}) ===\n", options.seed);

    let config = match &options.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut results = Vec::new();

    // 1. Config and starter catalog
    results.extend(validate_catalog(&config));

    // 2. Gene inheritance sweep
    results.extend(validate_genetics(&mut rng));

    // 3. Rarity distribution
    results.extend(validate_rarity(&mut rng));

    // 4. Name generator
    results.extend(validate_naming(&mut rng));

    // 5. Pricing
    results.extend(validate_economy(&config));

    // 6. Full breeding session
    let (session_results, state) = run_session(&config, options.breeds, &mut rng);
    results.extend(session_results);

    // 7. Save/load of the session
    results.extend(validate_persistence(&state, &config));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn frequency_check(name: &str, observed: usize, trials: usize, nominal: f64) -> TestResult {
    let freq = observed as f64 / trials as f64;
    TestResult::new(
        name,
        (freq - nominal).abs() <= FREQUENCY_TOLERANCE,
        format!("{:.3} observed vs {:.3} nominal", freq, nominal),
    )
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Config & Starters ---");
    let mut results = Vec::new();

    results.push(TestResult::new(
        "config_valid",
        config.validate().is_ok(),
        format!(
            "{} gold, kennel {}..{}",
            config.economy.starting_gold, config.kennel.default_capacity, config.kennel.max_capacity
        ),
    ));

    let invalid: Vec<_> = STARTER_DOGS
        .iter()
        .filter(|s| s.genes().validate().is_err())
        .map(|s| s.name)
        .collect();
    results.push(TestResult::new(
        "starters_valid_genes",
        invalid.is_empty(),
        if invalid.is_empty() {
            format!("{} starters", STARTER_DOGS.len())
        } else {
            format!("invalid: {}", invalid.join(", "))
        },
    ));

    let names: HashSet<_> = STARTER_DOGS.iter().map(|s| s.name).collect();
    results.push(TestResult::new(
        "starters_unique_names",
        names.len() == STARTER_DOGS.len(),
        format!("{} unique names", names.len()),
    ));

    let affordable = STARTER_DOGS
        .iter()
        .filter(|s| s.price() <= config.economy.starting_gold)
        .count();
    results.push(TestResult::new(
        "starters_affordable_at_start",
        affordable >= 2,
        format!("{} affordable with starting gold", affordable),
    ));

    results
}

// ── 2. Genetics ─────────────────────────────────────────────────────────

fn random_parents(rng: &mut StdRng) -> (GeneSet, GeneSet) {
    let a = STARTER_DOGS[rng.gen_range(0..STARTER_DOGS.len())].genes();
    let b = if rng.gen_bool(0.5) {
        STARTER_DOGS[rng.gen_range(0..STARTER_DOGS.len())].genes()
    } else {
        GeneSet::random(rng)
    };
    (a, b)
}

fn validate_genetics(rng: &mut StdRng) -> Vec<TestResult> {
    println!("--- Genetics ---");
    let mut results = Vec::new();
    let mut counts: HashMap<GeneDimension, [usize; 3]> = HashMap::new();
    let mut bad_influence = 0;
    let mut bad_head = 0;
    let mut synergy_mismatch = 0;
    let mut with_trait = 0;

    for _ in 0..SWEEP_TRIALS {
        let (a, b) = random_parents(rng);
        let (child, rolls) = genetics::breed_traced(&a, &b, rng);

        for roll in rolls {
            let slot = match roll.outcome {
                TraitOutcome::Inherited => 0,
                TraitOutcome::Blended => 1,
                TraitOutcome::Mutated => 2,
            };
            counts.entry(roll.dimension).or_default()[slot] += 1;
        }
        if !(0.0..=1.0).contains(&child.celebrity_influence) {
            bad_influence += 1;
        }
        if child.celebrity_head_id != a.celebrity_head_id
            && child.celebrity_head_id != b.celebrity_head_id
        {
            bad_head += 1;
        }
        if let Some(expected) = genetics::synergy(&child) {
            if child.special_trait != Some(expected) {
                synergy_mismatch += 1;
            }
        }
        if child.has_special_trait() {
            with_trait += 1;
        }
    }

    let rolled_dimensions = counts.len();
    results.push(TestResult::new(
        "genetics_every_dimension_rolled",
        rolled_dimensions == GeneDimension::ALL.len(),
        format!("{} dimensions", rolled_dimensions),
    ));

    let totals = counts.values().fold([0usize; 3], |mut acc, c| {
        for i in 0..3 {
            acc[i] += c[i];
        }
        acc
    });
    let rolls: usize = totals.iter().sum();
    results.push(frequency_check(
        "genetics_inherit_rate",
        totals[0],
        rolls,
        genetics::INHERIT_THRESHOLD,
    ));
    results.push(frequency_check(
        "genetics_blend_rate",
        totals[1],
        rolls,
        genetics::BLEND_THRESHOLD - genetics::INHERIT_THRESHOLD,
    ));
    results.push(frequency_check(
        "genetics_mutate_rate",
        totals[2],
        rolls,
        1.0 - genetics::BLEND_THRESHOLD,
    ));

    results.push(TestResult::new(
        "genetics_influence_in_range",
        bad_influence == 0,
        format!("{} out of range", bad_influence),
    ));
    results.push(TestResult::new(
        "genetics_head_from_parent",
        bad_head == 0,
        format!("{} foreign heads", bad_head),
    ));
    results.push(TestResult::new(
        "genetics_synergy_wins",
        synergy_mismatch == 0,
        format!(
            "{} mismatches, {:.1}% carry a trait",
            synergy_mismatch,
            with_trait as f64 * 100.0 / SWEEP_TRIALS as f64
        ),
    ));

    results
}

// ── 3. Rarity ───────────────────────────────────────────────────────────

fn validate_rarity(rng: &mut StdRng) -> Vec<TestResult> {
    println!("--- Rarity ---");
    let mut results = Vec::new();
    let mut plain = STARTER_DOGS[0].genes();
    plain.celebrity_influence = 0.5;
    plain.special_trait = None;

    let mut observed = [0usize; 5];
    for _ in 0..SWEEP_TRIALS {
        let tier = rarity::calculate_rarity(Rarity::COMMON, Rarity::COMMON, &plain, rng);
        observed[tier.tier() as usize - 1] += 1;
    }
    results.push(TestResult::new(
        "rarity_common_pair_capped",
        observed[3] + observed[4] == 0,
        format!("tier counts {:?}", observed),
    ));

    let expected = rarity::expected_distribution(Rarity::COMMON, Rarity::COMMON, false, false);
    for (label, outcome) in ["floor", "plus_one", "plus_two"]
        .iter()
        .zip(expected.outcomes())
    {
        results.push(frequency_check(
            &format!("rarity_{}_rate", label),
            observed[outcome.tier.tier() as usize - 1],
            SWEEP_TRIALS,
            outcome.probability,
        ));
    }

    let mut out_of_range = 0;
    for a in Rarity::ALL {
        for b in Rarity::ALL {
            for _ in 0..200 {
                let genes = GeneSet::random(rng);
                let tier = rarity::calculate_rarity(a, b, &genes, rng).tier();
                if !(1..=5).contains(&tier) {
                    out_of_range += 1;
                }
            }
        }
    }
    results.push(TestResult::new(
        "rarity_always_valid_tier",
        out_of_range == 0,
        format!("{} out of range across all pairings", out_of_range),
    ));

    results
}

// ── 4. Naming ───────────────────────────────────────────────────────────

fn validate_naming(rng: &mut StdRng) -> Vec<TestResult> {
    println!("--- Naming ---");
    let mut results = Vec::new();
    let mut by_strategy: HashMap<NameStrategy, usize> = HashMap::new();
    let mut empty = 0;
    let mut fallbacks = 0;
    let mut too_long = 0;

    for _ in 0..SWEEP_TRIALS {
        let a = naming::random_starter_name(rng);
        let b = naming::random_starter_name(rng);
        let genes = GeneSet::random(rng);
        let generated = naming::generate_name_traced(a, b, &genes, rng);
        *by_strategy.entry(generated.strategy).or_default() += 1;
        if generated.name.trim().is_empty() {
            empty += 1;
        }
        if generated.fell_back {
            fallbacks += 1;
        }
        if !naming::is_valid_name(&generated.name) {
            too_long += 1;
        }
    }

    for (strategy, weight) in NameStrategy::WEIGHTS {
        results.push(frequency_check(
            &format!("naming_{:?}_rate", strategy).to_lowercase(),
            by_strategy.get(&strategy).copied().unwrap_or(0),
            SWEEP_TRIALS,
            weight,
        ));
    }
    results.push(TestResult::new(
        "naming_never_empty",
        empty == 0,
        format!("{} empty, {} fallbacks", empty, fallbacks),
    ));
    results.push(TestResult::new(
        "naming_valid_length",
        too_long == 0,
        format!("{} over {} chars", too_long, naming::MAX_NAME_LENGTH),
    ));

    results
}

// ── 5. Economy ──────────────────────────────────────────────────────────

fn validate_economy(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Economy ---");
    let mut results = Vec::new();
    let economy_config = &config.economy;

    let mut violations = 0;
    for r in 0..=16 {
        let rarity = 1.0 + r as f64 * 0.25;
        for g in 0..20 {
            let generation = g as f64 * 0.5;
            let cost = economy::breeding_cost_for(rarity, generation, economy_config);
            if economy::breeding_cost_for(rarity + 0.25, generation, economy_config) < cost
                || economy::breeding_cost_for(rarity, generation + 0.5, economy_config) < cost
            {
                violations += 1;
            }
        }
    }
    results.push(TestResult::new(
        "economy_cost_monotonic",
        violations == 0,
        format!("{} decreasing steps", violations),
    ));

    let base = economy::breeding_cost_for(1.0, 0.0, economy_config);
    results.push(TestResult::new(
        "economy_base_cost",
        base == economy_config.breeding_base_cost,
        format!("common gen-0 pair costs {}", base),
    ));

    let halved = Rarity::ALL
        .iter()
        .all(|r| r.purchase_price() / 2 == (r.purchase_price() as f64 * 0.5).floor() as u64);
    results.push(TestResult::new(
        "economy_sell_half_price",
        halved,
        "sell value is half the purchase price",
    ));

    results
}

// ── 6. Session ──────────────────────────────────────────────────────────

struct SessionTally {
    successes: usize,
    failures: usize,
    gold_errors: usize,
    capacity_errors: usize,
    generation_errors: usize,
    lineage_errors: usize,
    sold: usize,
    expansions: usize,
}

/// Cheapest-to-keep dog that is not one of the given parents.
fn weakest_dog(state: &GameState, keep: &[DogId]) -> Option<DogId> {
    state
        .dogs()
        .into_iter()
        .filter(|d| !keep.contains(&d.id()))
        .min_by_key(|d| (d.rarity(), d.generation()))
        .map(Dog::id)
}

fn run_session(
    config: &GameConfig,
    breeds: usize,
    rng: &mut StdRng,
) -> (Vec<TestResult>, GameState) {
    println!("--- Session ({} breeds) ---", breeds);
    let mut results = Vec::new();
    let mut state = GameState::new(config.clone());
    let mut tally = SessionTally {
        successes: 0,
        failures: 0,
        gold_errors: 0,
        capacity_errors: 0,
        generation_errors: 0,
        lineage_errors: 0,
        sold: 0,
        expansions: 0,
    };

    // Two cheapest starters found the line.
    let mut starters: Vec<_> = STARTER_DOGS.iter().collect();
    starters.sort_by_key(|s| s.price());
    for starter in starters.iter().take(2) {
        economy::award_gold(&mut state.player, starter.price(), "starter grant");
        if let Err(e) = shop::buy_starter(&mut state, starter, rng, 0) {
            results.push(TestResult::new("session_buy_starters", false, e.to_string()));
            return (results, state);
        }
    }

    for step in 0..breeds {
        let now = step as u64 * 1_000;
        let dogs: Vec<DogId> = state.dogs().into_iter().map(Dog::id).collect();
        if dogs.len() < 2 {
            break;
        }
        let a = dogs[rng.gen_range(0..dogs.len())];
        let b = dogs[rng.gen_range(0..dogs.len())];

        if state.is_kennel_full() {
            if shop::expand_kennel(&mut state).is_ok() {
                tally.expansions += 1;
            } else if let Some(weak) = weakest_dog(&state, &[a, b]) {
                if shop::sell_dog(&mut state, &weak).is_ok() {
                    tally.sold += 1;
                }
            }
        }

        let gold_before = state.player.gold;
        let count_before = state.dog_count();
        let check = breeding::can_breed(&state, &a, &b);
        let expected_generation = match (state.dog(&a), state.dog(&b)) {
            (Some(pa), Some(pb)) => pa.generation().max(pb.generation()) + 1,
            _ => 0,
        };

        let result = breeding::breed_at(&mut state, &a, &b, rng, now);
        if result.success != check.can_breed {
            tally.failures += 1;
        }

        match &result.offspring {
            Some(pup) => {
                tally.successes += 1;
                if state.player.gold + result.cost != gold_before {
                    tally.gold_errors += 1;
                }
                if state.dog_count() != count_before + 1 {
                    tally.capacity_errors += 1;
                }
                if pup.generation() != expected_generation || pup.parent_ids() != [a, b] {
                    tally.generation_errors += 1;
                }
                let ancestry = state.lineage.ancestry(pup.id(), 64);
                let unique: HashSet<_> = ancestry.iter().map(|n| n.id).collect();
                if unique.len() != ancestry.len()
                    || ancestry.iter().skip(1).any(|n| n.id == pup.id())
                {
                    tally.lineage_errors += 1;
                }
            }
            None => {
                if state.player.gold != gold_before || state.dog_count() != count_before {
                    tally.gold_errors += 1;
                }
                // Keep the session going.
                if state.player.gold < result.cost {
                    economy::award_gold(&mut state.player, result.cost * 2, "harness top-up");
                }
            }
        }

        if state.dog_count() > state.player.kennel_capacity {
            tally.capacity_errors += 1;
        }
    }

    results.push(TestResult::new(
        "session_breeds_succeed",
        tally.successes > 0,
        format!(
            "{} bred, {} sold, {} expansions, highest generation {}",
            tally.successes, tally.sold, tally.expansions, state.stats.highest_generation
        ),
    ));
    results.push(TestResult::new(
        "session_check_matches_breed",
        tally.failures == 0,
        format!("{} disagreements between can_breed and breed", tally.failures),
    ));
    results.push(TestResult::new(
        "session_gold_conserved",
        tally.gold_errors == 0,
        format!("{} gold mismatches", tally.gold_errors),
    ));
    results.push(TestResult::new(
        "session_capacity_respected",
        tally.capacity_errors == 0,
        format!("{} capacity violations", tally.capacity_errors),
    ));
    results.push(TestResult::new(
        "session_generations_consistent",
        tally.generation_errors == 0,
        format!("{} generation/parent mismatches", tally.generation_errors),
    ));
    results.push(TestResult::new(
        "session_pedigree_acyclic",
        tally.lineage_errors == 0,
        format!("{} cyclic or duplicated ancestries", tally.lineage_errors),
    ));
    let rarity_total: u32 = state.stats.rarity_breeds.iter().sum();
    results.push(TestResult::new(
        "session_stats_agree",
        state.stats.total_breeds as usize == tally.successes
            && rarity_total == state.stats.total_breeds
            && state.stats.total_sold as usize == tally.sold,
        format!(
            "{} breeds, per-tier {:?}",
            state.stats.total_breeds, state.stats.rarity_breeds
        ),
    ));

    if let Ok(json) = serde_json::to_string(&state.stats) {
        log::info!("session stats: {}", json);
    }

    (results, state)
}

// ── 7. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(state: &GameState, config: &GameConfig) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let same = |loaded: &GameState| {
        loaded.player == state.player
            && loaded.stats == state.stats
            && loaded.lineage == state.lineage
            && loaded.dogs() == state.dogs()
    };

    let mut json = Vec::new();
    let json_ok = persistence::save_json(&mut json, state, 0)
        .and_then(|_| persistence::load_json(&json[..], config.clone()));
    results.push(match json_ok {
        Ok(loaded) => TestResult::new(
            "persistence_json_roundtrip",
            same(&loaded.state),
            format!("{} bytes, {} dogs", json.len(), loaded.state.dog_count()),
        ),
        Err(e) => TestResult::new("persistence_json_roundtrip", false, e.to_string()),
    });

    let mut binary = Vec::new();
    let binary_ok = persistence::save_binary(&mut binary, state, 0)
        .and_then(|_| persistence::load_binary(&binary[..], config.clone()));
    results.push(match binary_ok {
        Ok(loaded) => TestResult::new(
            "persistence_binary_roundtrip",
            same(&loaded.state),
            format!("{} bytes", binary.len()),
        ),
        Err(e) => TestResult::new("persistence_binary_roundtrip", false, e.to_string()),
    });

    results
}
