//! Lineage tracker: id-keyed pedigree with bounded BFS traversal.
//!
//! Edges are stored as id lists on each entry, never as references, so the
//! pedigree is a plain adjacency table. Parents always predate their
//! children, which keeps the graph acyclic.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::dog::{Dog, DogId};

pub const DEFAULT_ANCESTRY_DEPTH: u32 = 3;
pub const DEFAULT_DESCENDANT_DEPTH: u32 = 3;
pub const DEFAULT_RELATEDNESS_DEPTH: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedigreeEntry {
    pub parents: Vec<DogId>,
    pub children: Vec<DogId>,
}

/// One node reached by an ancestry or descendant walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageNode {
    pub id: DogId,
    pub depth: u32,
    pub relationship: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageStats {
    pub total_dogs: usize,
    /// Parent links plus child links over every entry.
    pub total_relationships: usize,
    pub max_children: usize,
    pub average_children: f64,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pedigree {
    entries: HashMap<DogId, PedigreeEntry>,
}

impl Pedigree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dog(&mut self, dog: &Dog) {
        self.add(dog.id(), dog.parent_ids());
    }

    /// Register `id` with its parents. Unknown parents get a stub entry;
    /// each parent lists `id` as a child at most once.
    pub fn add(&mut self, id: DogId, parents: &[DogId]) {
        self.entries.entry(id).or_insert_with(|| PedigreeEntry {
            parents: parents.to_vec(),
            children: Vec::new(),
        });

        for parent in parents {
            let entry = self.entries.entry(*parent).or_default();
            if !entry.children.contains(&id) {
                entry.children.push(id);
            }
        }
    }

    pub fn entry(&self, id: &DogId) -> Option<&PedigreeEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &DogId) -> bool {
        self.entries.contains_key(id)
    }

    /// `id` and its ancestors up to `max_depth` generations back.
    pub fn ancestry(&self, id: DogId, max_depth: u32) -> Vec<LineageNode> {
        self.walk(id, max_depth, Direction::Up)
    }

    /// `id` and its descendants up to `max_depth` generations down.
    pub fn descendants(&self, id: DogId, max_depth: u32) -> Vec<LineageNode> {
        self.walk(id, max_depth, Direction::Down)
    }

    /// Whether the two dogs' ancestry sets (each including the dog itself)
    /// intersect within `max_depth`.
    pub fn are_related(&self, a: DogId, b: DogId, max_depth: u32) -> bool {
        let ancestors_a: HashSet<DogId> = self
            .ancestry(a, max_depth)
            .into_iter()
            .map(|n| n.id)
            .collect();
        self.ancestry(b, max_depth)
            .iter()
            .any(|n| ancestors_a.contains(&n.id))
    }

    fn walk(&self, start: DogId, max_depth: u32, direction: Direction) -> Vec<LineageNode> {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        let mut nodes = Vec::new();
        queue.push_back((start, 0u32));

        while let Some((id, depth)) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(entry) = self.entries.get(&id) else {
                continue;
            };

            nodes.push(LineageNode {
                id,
                depth,
                relationship: match direction {
                    Direction::Up => ancestor_label(depth),
                    Direction::Down => descendant_label(depth),
                },
            });

            if depth >= max_depth {
                continue;
            }

            let next = match direction {
                Direction::Up => &entry.parents,
                Direction::Down => &entry.children,
            };
            for neighbor in next {
                queue.push_back((*neighbor, depth + 1));
            }
        }

        nodes
    }

    pub fn statistics(&self) -> LineageStats {
        let total_dogs = self.entries.len();
        let mut total_relationships = 0;
        let mut max_children = 0;
        for entry in self.entries.values() {
            total_relationships += entry.parents.len() + entry.children.len();
            max_children = max_children.max(entry.children.len());
        }
        LineageStats {
            total_dogs,
            total_relationships,
            max_children,
            average_children: if total_dogs == 0 {
                0.0
            } else {
                total_relationships as f64 / total_dogs as f64
            },
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn ancestor_label(depth: u32) -> String {
    match depth {
        0 => "self".into(),
        1 => "parent".into(),
        2 => "grandparent".into(),
        3 => "great-grandparent".into(),
        4 => "great-great-grandparent".into(),
        n => format!("ancestor ({} generations)", n),
    }
}

pub fn descendant_label(depth: u32) -> String {
    match depth {
        0 => "self".into(),
        1 => "child".into(),
        2 => "grandchild".into(),
        3 => "great-grandchild".into(),
        n => format!("descendant ({} generations)", n),
    }
}

/// Dogs of exactly generation `generation`.
pub fn dogs_in_generation<'a>(
    dogs: impl IntoIterator<Item = &'a Dog>,
    generation: u32,
) -> Vec<&'a Dog> {
    dogs.into_iter()
        .filter(|d| d.generation() == generation)
        .collect()
}
