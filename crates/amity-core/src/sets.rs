//! Order-preserving set operations over email lists.
//!
//! Store results arrive as `Vec`s; these helpers give them set semantics
//! without losing the order in which entries were first seen.

use std::{collections::HashSet, hash::Hash};

/// Remove repeated items, keeping the first occurrence of each.
pub fn dedupe<T, I>(items: I) -> Vec<T>
where
  T: Eq + Hash + Clone,
  I: IntoIterator<Item = T>,
{
  let mut seen = HashSet::new();
  items
    .into_iter()
    .filter(|item| seen.insert(item.clone()))
    .collect()
}

/// Items of `items` that do not appear in `excluded`, order kept.
pub fn difference<'a, T, I>(items: I, excluded: impl IntoIterator<Item = &'a T>) -> Vec<T>
where
  T: Eq + Hash + 'a,
  I: IntoIterator<Item = T>,
{
  let excluded: HashSet<&T> = excluded.into_iter().collect();
  items
    .into_iter()
    .filter(|item| !excluded.contains(item))
    .collect()
}

/// `true` if any item appears more than once.
pub fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
  let mut seen = HashSet::with_capacity(items.len());
  items.iter().any(|item| !seen.insert(item))
}
