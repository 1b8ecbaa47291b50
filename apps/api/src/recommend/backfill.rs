//! Random top-up of under-sized filter results.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Profile;

/// Pads `filtered` up to `top_k` entries with randomly sampled profiles from
/// the rest of the collection. The filtered prefix keeps its order; padding
/// is appended after it in shuffled order. Returning loosely related
/// profiles beats returning too few.
///
/// The random source is injected so tests can supply a seeded generator.
pub fn backfill(
    mut filtered: Vec<Profile>,
    all: &[Profile],
    top_k: usize,
    rng: &mut impl Rng,
) -> Vec<Profile> {
    if filtered.len() >= top_k {
        return filtered;
    }

    let seen: HashSet<u32> = filtered.iter().map(|p| p.id).collect();
    let mut remaining: Vec<&Profile> = all.iter().filter(|p| !seen.contains(&p.id)).collect();
    remaining.shuffle(rng);

    let needed = top_k - filtered.len();
    filtered.extend(remaining.into_iter().take(needed).cloned());
    filtered
}
