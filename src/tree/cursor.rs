//! Cursor and limit resolution shared by every sort mode.

use std::cmp::Ordering;

/// Flip an ascending comparison when the caller asked for descending order
pub fn directed(ordering: Ordering, desc: bool) -> Ordering {
    if desc {
        ordering.reverse()
    } else {
        ordering
    }
}

/// The part of `ordered` that comes strictly after `cursor`.
///
/// `ordered` must already be sorted by `key` in the requested direction.
/// Elements equal to the cursor are skipped along with everything before it,
/// so the cursor row itself never shows up twice across pages.
pub fn resume_after<'s, T, K, F>(ordered: &'s [T], key: F, cursor: &K, desc: bool) -> &'s [T]
where
    K: Ord + ?Sized,
    F: Fn(&T) -> &K,
{
    let start = ordered.partition_point(|item| match key(item).cmp(cursor) {
        Ordering::Equal => true,
        Ordering::Less => !desc,
        Ordering::Greater => desc,
    });
    &ordered[start..]
}

/// At most `limit` leading elements; `None` keeps everything
pub fn take_limit<T>(items: &[T], limit: Option<usize>) -> &[T] {
    match limit {
        Some(limit) => &items[..limit.min(items.len())],
        None => items,
    }
}
