use crate::models::{ActiveCell, Animal, SelectedOverlay};
use rand::Rng;
use rand::seq::index;

pub const MAX_OVERLAYS: usize = 3;
pub const DELAY_STEP_SECONDS: u32 = 2;

pub const ANIMALS: [Animal; 5] = [
    Animal { emoji: "🐿️", name: "squirrel" },
    Animal { emoji: "🐭", name: "mouse" },
    Animal { emoji: "🦝", name: "raccoon" },
    Animal { emoji: "🦊", name: "fox" },
    Animal { emoji: "🐹", name: "hamster" },
];

/// Number of top-ranked cells eligible for selection.
pub fn candidate_pool_size(active: usize) -> usize {
    if active == 0 { 0 } else { (active / 3).max(1) }
}

/// Picks up to three busy cells for the theft animation.
///
/// Cells are ranked by count (ties keep their date order) and sampled
/// without replacement from the top third. The delay of each overlay
/// depends only on its position in the selection.
pub fn select_overlays<R>(active_cells: &[ActiveCell], rng: &mut R) -> Vec<SelectedOverlay>
where
    R: Rng + ?Sized,
{
    if active_cells.is_empty() {
        return Vec::new();
    }

    let mut ranked = active_cells.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(candidate_pool_size(active_cells.len()));

    let amount = MAX_OVERLAYS.min(ranked.len());
    let picks = index::sample(rng, ranked.len(), amount).into_vec();

    picks
        .into_iter()
        .enumerate()
        .map(|(order, pick)| SelectedOverlay {
            position: ranked[pick].clone(),
            animal: ANIMALS[rng.random_range(0..ANIMALS.len())],
            delay_seconds: order as u32 * DELAY_STEP_SECONDS,
            index: order,
        })
        .collect()
}
