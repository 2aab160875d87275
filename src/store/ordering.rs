//! Ordering rules applied inside a store's critical section

use crate::types::{Direction, Event, Release};
use crate::utils::time::event_date_sort_key;

/// Sort ascending by parsed date; unparsable dates go last.
/// Stable, so ties keep their input order.
pub(crate) fn sort_events_by_date(events: &mut [Event]) {
    events.sort_by_cached_key(|event| event_date_sort_key(&event.date));
}

/// Highest rank kept verbatim when a document is loaded
pub(crate) const MAX_STORED_RANK: u32 = u32::MAX / 2;

/// Rank for a release appended to `releases`.
///
/// `None` when the highest rank has no successor.
pub(crate) fn next_order(releases: &[Release]) -> Option<u32> {
    match releases.iter().map(|r| r.order).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Renumber ranks to 0..n-1, keeping the existing relative rank order
pub(crate) fn compact(releases: &mut [Release]) {
    releases.sort_by_key(|r| r.order);
    for (index, release) in releases.iter_mut().enumerate() {
        release.order = index as u32;
    }
}

/// Swap the rank of `id` with its neighbor in `direction`.
///
/// Leaves the slice sorted by the ranks it had before the swap. Returns
/// `None` when `id` is absent, `Some(false)` when already at the boundary.
pub(crate) fn move_adjacent(
    releases: &mut [Release],
    id: &str,
    direction: Direction,
) -> Option<bool> {
    releases.sort_by_key(|r| r.order);
    let index = releases.iter().position(|r| r.id == id)?;

    let neighbor = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < releases.len() => index + 1,
        _ => return Some(false),
    };

    let moved = releases[index].order;
    releases[index].order = releases[neighbor].order;
    releases[neighbor].order = moved;
    Some(true)
}

/// Turn ranks as found in a document into usable ranks.
///
/// # Arguments
///
/// * `stored` - one entry per release in document order; `None` where the
///   document had no numeric `order`
///
/// Missing ranks take their positional index. When every rank is then a
/// whole number in `0..=MAX_STORED_RANK` they are kept as they are;
/// otherwise (negative, fractional or huge values) the category is renumbered
/// `0..n-1` by stored value, ties in document order.
pub(crate) fn normalize_ranks(stored: &[Option<f64>]) -> Vec<u32> {
    let ranks: Vec<f64> = stored
        .iter()
        .enumerate()
        .map(|(index, rank)| rank.unwrap_or(index as f64))
        .collect();

    let usable = ranks
        .iter()
        .all(|r| r.fract() == 0.0 && *r >= 0.0 && *r <= MAX_STORED_RANK as f64);
    if usable {
        return ranks.iter().map(|r| *r as u32).collect();
    }

    // Stable, so equal stored values keep document order
    let mut by_rank: Vec<usize> = (0..ranks.len()).collect();
    by_rank.sort_by(|a, b| ranks[*a].total_cmp(&ranks[*b]));

    let mut renumbered = vec![0; ranks.len()];
    for (rank, index) in by_rank.into_iter().enumerate() {
        renumbered[index] = rank as u32;
    }
    renumbered
}
