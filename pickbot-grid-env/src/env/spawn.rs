//! Random placement of items and people.
use crate::Coord;
use log::debug;
use rand::Rng;
use std::collections::HashSet;

/// Bound on the draws of [`spawn_people`].
pub(super) const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Draws `n` distinct cells from the interior of the grid (1-cell border
/// excluded).
///
/// The caller guarantees that the interior holds `n` cells.
pub(super) fn spawn_items<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    n: usize,
) -> Vec<Coord> {
    let mut seen = HashSet::with_capacity(n);
    let mut items = Vec::with_capacity(n);
    while items.len() < n {
        let cell = Coord(rng.gen_range(1..rows - 1), rng.gen_range(1..cols - 1));
        if seen.insert(cell) {
            items.push(cell);
        }
    }
    items
}

/// Draws up to `n` distinct cells avoiding items, the drop zone and the bot.
///
/// Gives up after [`MAX_PLACEMENT_ATTEMPTS`] draws and returns the people
/// placed so far.
pub(super) fn spawn_people<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    n: usize,
    items: &[Coord],
    drop: Coord,
    bot: Coord,
) -> Vec<Coord> {
    let mut blocked: HashSet<Coord> = items.iter().copied().collect();
    blocked.insert(drop);
    blocked.insert(bot);

    let mut people = Vec::with_capacity(n);
    let mut attempts = 0;
    while people.len() < n && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let cell = Coord(rng.gen_range(0..rows), rng.gen_range(0..cols));
        if blocked.insert(cell) {
            people.push(cell);
        }
    }

    if people.len() < n {
        debug!(
            "Placed {} of {} people after {} attempts",
            people.len(),
            n,
            attempts
        );
    }
    people
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_items_are_distinct_and_interior() {
        let mut rng = SmallRng::seed_from_u64(0);
        let items = spawn_items(&mut rng, 5, 5, 9);

        let unique: HashSet<_> = items.iter().collect();
        assert_eq!(unique.len(), 9);
        assert!(items.iter().all(|c| (1..4).contains(&c.0) && (1..4).contains(&c.1)));
    }

    #[test]
    fn test_people_avoid_blocked_cells() {
        let mut rng = SmallRng::seed_from_u64(1);
        let items = vec![Coord(1, 1), Coord(2, 2)];
        let people = spawn_people(&mut rng, 4, 4, 10, &items, Coord(0, 3), Coord(3, 0));

        assert_eq!(people.len(), 10);
        let unique: HashSet<_> = people.iter().collect();
        assert_eq!(unique.len(), 10);
        for p in people.iter() {
            assert!(!items.contains(p));
            assert_ne!(*p, Coord(0, 3));
            assert_ne!(*p, Coord(3, 0));
        }
    }

    #[test]
    fn test_people_placement_degrades_when_grid_is_full() {
        let mut rng = SmallRng::seed_from_u64(2);
        // 9 cells, 3 blocked.
        let people = spawn_people(
            &mut rng,
            3,
            3,
            20,
            &[Coord(1, 1)],
            Coord(0, 0),
            Coord(2, 2),
        );
        assert_eq!(people.len(), 6);
    }
}
