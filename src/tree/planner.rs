use crate::models::Post;

use super::cursor::{directed, resume_after, take_limit};
use super::index::IndexedPost;
use super::query::{SortMode, TraversalQuery};

/// Produce one page of a thread's posts.
///
/// Never fails: a cursor that isn't part of the snapshot, or a zero limit,
/// yields an empty page.
pub fn page(indexed: &[IndexedPost], query: &TraversalQuery) -> Vec<Post> {
    if query.limit == Some(0) {
        return Vec::new();
    }

    let cursor = match query.since {
        Some(since) => match indexed.iter().find(|p| p.post.id == since) {
            Some(cursor) => Some(cursor),
            None => return Vec::new(),
        },
        None => None,
    };

    let selected = match query.mode {
        SortMode::Flat => flat(indexed, cursor, query),
        SortMode::Tree => tree(indexed, cursor, query),
        SortMode::ParentTree => parent_tree(indexed, cursor, query),
    };

    selected.into_iter().map(|p| p.post.clone()).collect()
}

/// Ordered by id, which is creation order even inside a batch sharing one timestamp
fn flat<'a>(
    indexed: &'a [IndexedPost],
    cursor: Option<&IndexedPost>,
    query: &TraversalQuery,
) -> Vec<&'a IndexedPost> {
    let mut ordered: Vec<&IndexedPost> = indexed.iter().collect();
    ordered.sort_by(|a, b| directed(a.post.id.cmp(&b.post.id), query.desc));

    let rest = match cursor {
        Some(c) => resume_after(&ordered, |p| &p.post.id, &c.post.id, query.desc),
        None => &ordered[..],
    };
    take_limit(rest, query.limit).to_vec()
}

/// Preorder over the whole forest. Descending reverses the complete order,
/// so the newest root comes first and each subtree is laid out backwards.
fn tree<'a>(
    indexed: &'a [IndexedPost],
    cursor: Option<&IndexedPost>,
    query: &TraversalQuery,
) -> Vec<&'a IndexedPost> {
    let mut ordered: Vec<&IndexedPost> = indexed.iter().collect();
    ordered.sort_by(|a, b| directed(a.path.cmp(&b.path), query.desc));

    let rest = match cursor {
        Some(c) => resume_after(&ordered, |p| p.path.as_slice(), c.path.as_slice(), query.desc),
        None => &ordered[..],
    };
    take_limit(rest, query.limit).to_vec()
}

/// Whole root discussions. Direction and limit apply to roots; the posts
/// inside a discussion always stay in ascending preorder.
fn parent_tree<'a>(
    indexed: &'a [IndexedPost],
    cursor: Option<&IndexedPost>,
    query: &TraversalQuery,
) -> Vec<&'a IndexedPost> {
    let mut ordered: Vec<&IndexedPost> = indexed.iter().collect();
    ordered.sort_by(|a, b| {
        directed(a.root_id().cmp(&b.root_id()), query.desc).then_with(|| a.path.cmp(&b.path))
    });

    let groups: Vec<&[&IndexedPost]> = ordered
        .chunk_by(|a, b| a.root_id() == b.root_id())
        .collect();

    let rest = match cursor {
        Some(c) => resume_after(&groups, |g| &g[0].path[0], &c.root_id(), query.desc),
        None => &groups[..],
    };

    take_limit(rest, query.limit)
        .iter()
        .flat_map(|group| group.iter().copied())
        .collect()
}
