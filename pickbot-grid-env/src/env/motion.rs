//! Random walk of people.
use crate::Coord;
use rand::Rng;
use std::collections::HashSet;

/// Down, up, right, left, stay.
const MOVES: [(i64, i64); 5] = [(1, 0), (-1, 0), (0, 1), (0, -1), (0, 0)];

/// Advances every person by one tick.
///
/// Each person draws one of [`MOVES`] uniformly. The move is rejected, and the
/// person stays, if the clamped target is an item cell or is claimed by
/// another person: either one processed earlier in this tick or one still
/// standing there. People are processed in order, so the first claim wins.
/// Blocking on people who have not moved yet is stricter than a plain
/// first-claim rule and is what keeps the number of people constant.
///
/// Given distinct input positions, the output positions are distinct, avoid
/// item cells (as long as no person started on one) and keep the input order.
pub(super) fn move_people<R: Rng + ?Sized>(
    rng: &mut R,
    people: &[Coord],
    items: &[Coord],
    rows: usize,
    cols: usize,
) -> Vec<Coord> {
    let items: HashSet<Coord> = items.iter().copied().collect();
    let mut waiting: HashSet<Coord> = people.iter().copied().collect();
    let mut claimed = HashSet::with_capacity(people.len());
    let mut moved = Vec::with_capacity(people.len());

    for &cell in people {
        waiting.remove(&cell);
        let delta = MOVES[rng.gen_range(0..MOVES.len())];
        let target = cell.offset(delta, rows, cols);
        let next = if items.contains(&target) || claimed.contains(&target) || waiting.contains(&target) {
            cell
        } else {
            target
        };
        claimed.insert(next);
        moved.push(next);
    }

    moved
}
