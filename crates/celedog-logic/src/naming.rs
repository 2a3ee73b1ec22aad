//! Name generator: punny celebrity names for offspring.
//!
//! One of three strategies is picked by weight:
//! - **Portmanteau** (0.5): front half of parent A's first word + back half
//!   of parent B's last word.
//! - **Trait pun** (0.3): random entry from the pun table rows matching the
//!   offspring's body type, temperament and talent.
//! - **Synthetic** (0.2): onomatopoeic prefix + celebrity surname (70%), or
//!   start + middle + end syllables (30%).
//!
//! Whenever the chosen strategy yields nothing usable, the simple
//! combination "first word of A + last word of B" is used instead.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genes::GeneSet;
use crate::random::{choose, weighted_choice};

/// Longest name the UI accepts.
pub const MAX_NAME_LENGTH: usize = 50;

pub const UNNAMED_PUP: &str = "Unnamed Pup";
pub const MYSTERY_PUP: &str = "Mystery Pup";

const CELEBRITY_PATTERN_CHANCE: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameStrategy {
    Portmanteau,
    TraitPun,
    Synthetic,
}

impl NameStrategy {
    pub const WEIGHTS: [(NameStrategy, f64); 3] = [
        (NameStrategy::Portmanteau, 0.5),
        (NameStrategy::TraitPun, 0.3),
        (NameStrategy::Synthetic, 0.2),
    ];
}

/// A generated name and how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedName {
    pub name: String,
    pub strategy: NameStrategy,
    /// The strategy produced nothing and the simple combination was used.
    pub fell_back: bool,
}

// ============================================================================
// TABLES
// ============================================================================

/// Pun rows keyed by body type, temperament and talent tokens.
const PUN_TABLE: &[(&str, &[&str])] = &[
    // Body
    ("athletic", &["Pawlympian", "Fetchival Champion", "Sporty Spice-paw", "Ruff Athlete"]),
    ("fluffy", &["Fluff Daddy", "Hairy Styles", "Fur-nando", "Puffy P. Diddy"]),
    ("stocky", &["Tank the Bark", "Bulk Bogan", "Chonky McPaws"]),
    ("slim", &["Skinny Minnie Mouse", "Slim Shaggy", "Lean Bean"]),
    ("tiny", &["Lil Bow Wow", "Tiny Barker", "Pocket Pup"]),
    // Temperament
    ("sophisticated", &["Bark-tisocrat", "Paws-itively Posh", "Haute Dog", "Sir Barksalot"]),
    ("goofy", &["Derp Doginson", "Silly Cyrus", "Goofball Grande", "Derpina Turner"]),
    ("playful", &["Bouncy Beyoncé", "Jumpy Jonas", "Frisky Fido"]),
    ("lazy", &["Snoozy Susan", "Lazy Bones Malone", "Sleepy McSnore"]),
    ("energetic", &["Zoomie Zendaya", "Hyper Hound", "Zippy Stardust"]),
    // Talent
    ("singing", &["Pup-erazzi Star", "Bark Streisand", "Growl-ie Minogue"]),
    ("acting", &["Drama Dogma", "Oscar Wagger", "Meryl Streep-er"]),
    ("sports", &["Paws Jordan", "Fetch Armstrong", "Serena Woofliams"]),
    ("comedy", &["Jim Furry", "Kevin Bark", "Tina Fido"]),
    ("modeling", &["Bark Moss", "Gisele Barkchen", "Tyra Barks"]),
];

const START_SYLLABLES: [&str; 9] = [
    "Bark", "Woof", "Paw", "Fur", "Ruff", "Howl", "Fetch", "Sniff", "Wag",
];
const MIDDLE_SYLLABLES: [&str; 7] = ["y", "ie", "ster", "meister", "ington", "worth", "field"];
const END_SYLLABLES: [&str; 7] = ["son", "ton", "ley", "bert", "ford", "wood", "stone"];

const CELEBRITY_SURNAMES: [&str; 12] = [
    "Wahlberg", "Obama", "Jagger", "Styles", "Grande", "Swift", "Bieber", "Cruise", "Pitt",
    "Jolie", "Streep", "DiCaprio",
];

pub const STARTER_NAMES: [&str; 20] = [
    "Bark Wahlberg",
    "Sarah Jessica Barker",
    "Chew-barka",
    "Pupcasso",
    "Bark Obama",
    "Fluff Daddy",
    "Hairy Styles",
    "Lick Jagger",
    "Droolius Caesar",
    "Winona Ruffer",
    "Brad Pittbull",
    "Jennifer Paw-niston",
    "George Sniff-ney",
    "Bark Ruffalo",
    "Natalie Pawrtman",
    "Chris Prrratt",
    "Scarlett Yo-hound-son",
    "Ryan Pawsling",
    "Emma Bone",
    "Tom Paws",
];

// ============================================================================
// STRATEGIES
// ============================================================================

/// Name offspring of `parent_a` and `parent_b`.
pub fn generate_name<R: Rng + ?Sized>(
    parent_a: &str,
    parent_b: &str,
    genes: &GeneSet,
    rng: &mut R,
) -> String {
    generate_name_traced(parent_a, parent_b, genes, rng).name
}

/// Like [`generate_name`], also reporting the strategy taken.
pub fn generate_name_traced<R: Rng + ?Sized>(
    parent_a: &str,
    parent_b: &str,
    genes: &GeneSet,
    rng: &mut R,
) -> GeneratedName {
    let strategy =
        weighted_choice(rng, &NameStrategy::WEIGHTS).unwrap_or(NameStrategy::Portmanteau);

    let candidate = match strategy {
        NameStrategy::Portmanteau => Some(portmanteau(parent_a, parent_b)),
        NameStrategy::TraitPun => trait_pun(genes, rng),
        NameStrategy::Synthetic => Some(synthetic(rng)),
    };

    let (name, fell_back) = match candidate {
        Some(name) if !name.trim().is_empty() => (name, false),
        _ => (simple_combination(parent_a, parent_b), true),
    };

    log::debug!("name: {:?} -> {:?} (fallback: {})", strategy, name, fell_back);
    // Length is not enforced at generation time.
    if !is_valid_name(&name) {
        log::warn!("generated name {:?} fails validation", name);
    }

    GeneratedName {
        name,
        strategy,
        fell_back,
    }
}

fn first_word(name: &str) -> &str {
    name.split(' ').next().unwrap_or(name)
}

fn last_word(name: &str) -> &str {
    name.split(' ').next_back().unwrap_or(name)
}

/// Splice the front half of A's first word onto the back half of B's last
/// word. Halves are counted in characters; odd lengths put the extra
/// character in the back half.
pub fn portmanteau(parent_a: &str, parent_b: &str) -> String {
    if parent_a.is_empty() || parent_b.is_empty() {
        return UNNAMED_PUP.to_string();
    }

    let word_a = first_word(parent_a);
    let word_b = last_word(parent_b);
    let mid_a = word_a.chars().count() / 2;
    let mid_b = word_b.chars().count() / 2;

    word_a
        .chars()
        .take(mid_a)
        .chain(word_b.chars().skip(mid_b))
        .collect()
}

/// Pun candidates for the gene set's body, temperament and talent rows.
pub fn pun_candidates(genes: &GeneSet) -> Vec<&'static str> {
    let keys = [
        genes.body_type.as_str(),
        genes.temperament.as_str(),
        genes.talent.as_str(),
    ];
    keys.iter()
        .filter_map(|key| PUN_TABLE.iter().find(|(k, _)| k == key))
        .flat_map(|(_, names)| names.iter().copied())
        .collect()
}

/// Random pun for the gene set, or `None` when no row matches.
pub fn trait_pun<R: Rng + ?Sized>(genes: &GeneSet, rng: &mut R) -> Option<String> {
    let candidates = pun_candidates(genes);
    if candidates.is_empty() {
        return None;
    }
    Some(choose(rng, &candidates).to_string())
}

/// Celebrity pattern or syllable chain.
pub fn synthetic<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.gen::<f64>() < CELEBRITY_PATTERN_CHANCE {
        let celeb = choose(rng, &CELEBRITY_SURNAMES);
        let prefix = choose(rng, &START_SYLLABLES);
        return format!("{} {}", prefix, celeb);
    }

    let start = choose(rng, &START_SYLLABLES);
    let middle = choose(rng, &MIDDLE_SYLLABLES);
    let end = choose(rng, &END_SYLLABLES);
    format!("{}{}{}", start, middle, end)
}

/// Fallback: A's first word and B's last word.
pub fn simple_combination(parent_a: &str, parent_b: &str) -> String {
    if parent_a.is_empty() || parent_b.is_empty() {
        return MYSTERY_PUP.to_string();
    }
    format!("{} {}", first_word(parent_a), last_word(parent_b))
}

pub fn random_starter_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    *choose(rng, &STARTER_NAMES)
}

/// Non-blank and at most [`MAX_NAME_LENGTH`] characters.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_NAME_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BodyType, Talent, Temperament};
    use crate::fixtures::genes_a;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn portmanteau_splices_halves() {
        // "Bark" -> "Ba", "Jagger" -> "ger"
        assert_eq!(portmanteau("Bark Wahlberg", "Lick Jagger"), "Bager");
        assert_eq!(portmanteau("Pupcasso", "Emma Bone"), "Pupcne");
        assert_eq!(portmanteau("Fluff Daddy", "Tom Paws"), "Flws");
    }

    #[test]
    fn portmanteau_counts_characters_not_bytes() {
        assert_eq!(portmanteau("Beyoncé", "Café"), "Beyfé");
    }

    #[test]
    fn empty_parent_names_use_placeholders() {
        assert_eq!(portmanteau("", "Tom Paws"), UNNAMED_PUP);
        assert_eq!(simple_combination("Emma Bone", ""), MYSTERY_PUP);
    }

    #[test]
    fn simple_combination_takes_outer_words() {
        assert_eq!(simple_combination("Sarah Jessica Barker", "Bark Obama"), "Sarah Obama");
        assert_eq!(simple_combination("Pupcasso", "Chew-barka"), "Pupcasso Chew-barka");
    }

    #[test]
    fn pun_candidates_union_three_rows() {
        let mut genes = genes_a();
        genes.body_type = BodyType::Tiny;
        genes.temperament = Temperament::Lazy;
        genes.talent = Talent::Comedy;
        let candidates = pun_candidates(&genes);
        assert_eq!(candidates.len(), 9);
        assert!(candidates.contains(&"Pocket Pup"));
        assert!(candidates.contains(&"Sleepy McSnore"));
        assert!(candidates.contains(&"Kevin Bark"));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pun = trait_pun(&genes, &mut rng).unwrap();
            assert!(candidates.contains(&pun.as_str()));
        }
    }

    #[test]
    fn every_catalog_value_has_a_pun_row() {
        for body in BodyType::ALL {
            assert!(PUN_TABLE.iter().any(|(k, _)| *k == body.as_str()));
        }
        for temperament in Temperament::ALL {
            assert!(PUN_TABLE.iter().any(|(k, _)| *k == temperament.as_str()));
        }
        for talent in Talent::ALL {
            assert!(PUN_TABLE.iter().any(|(k, _)| *k == talent.as_str()));
        }
    }

    #[test]
    fn synthetic_names_use_catalog_parts() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let name = synthetic(&mut rng);
            assert!(START_SYLLABLES.iter().any(|s| name.starts_with(s)), "{}", name);
            if let Some((_, celeb)) = name.split_once(' ') {
                assert!(CELEBRITY_SURNAMES.contains(&celeb));
            } else {
                assert!(END_SYLLABLES.iter().any(|s| name.ends_with(s)), "{}", name);
            }
        }
    }

    #[test]
    fn strategy_weights_hold() {
        let mut rng = StdRng::seed_from_u64(21);
        let genes = genes_a();
        let mut counts: HashMap<NameStrategy, u32> = HashMap::new();
        for _ in 0..10_000 {
            let named = generate_name_traced("Bark Wahlberg", "Lick Jagger", &genes, &mut rng);
            assert!(!named.fell_back);
            assert!(!named.name.trim().is_empty());
            *counts.entry(named.strategy).or_default() += 1;
        }
        let share = |s| *counts.get(&s).unwrap_or(&0) as f64 / 10_000.0;
        assert!((share(NameStrategy::Portmanteau) - 0.5).abs() < 0.02);
        assert!((share(NameStrategy::TraitPun) - 0.3).abs() < 0.02);
        assert!((share(NameStrategy::Synthetic) - 0.2).abs() < 0.02);
    }

    #[test]
    fn blank_portmanteau_falls_back_to_simple_combination() {
        // Leading/trailing spaces leave empty outer words to splice.
        let mut rng = StdRng::seed_from_u64(5);
        let genes = genes_a();
        assert_eq!(portmanteau(" Max", "Max "), "");
        let mut fallbacks = 0;
        for _ in 0..200 {
            let named = generate_name_traced(" Max", "Max ", &genes, &mut rng);
            if named.strategy == NameStrategy::Portmanteau {
                assert!(named.fell_back);
                assert_eq!(named.name, simple_combination(" Max", "Max "));
                fallbacks += 1;
            } else {
                assert!(!named.fell_back);
            }
        }
        assert!(fallbacks > 0);
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_name("Bark Wahlberg"));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(""));
        assert!(is_valid_name(&"a".repeat(50)));
        assert!(!is_valid_name(&"a".repeat(51)));
    }

    #[test]
    fn starter_names_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..40 {
            let name = random_starter_name(&mut rng);
            assert!(STARTER_NAMES.contains(&name));
            assert!(is_valid_name(name));
        }
    }
}
