use std::collections::HashMap;

use crate::models::{Post, PostId, ThreadId};

/// A thread snapshot that does not form a forest.
///
/// This means the stored data is inconsistent, not that the request was bad.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTreeError {
    #[error("post {post_id} references parent {parent_id}, not an earlier post of the thread")]
    UnresolvedParent { post_id: PostId, parent_id: PostId },

    #[error("post {post_id} appears more than once")]
    DuplicatePost { post_id: PostId },

    #[error("post {post_id} belongs to thread {found}, not thread {expected}")]
    ForeignThread {
        post_id: PostId,
        expected: ThreadId,
        found: ThreadId,
    },
}

impl MalformedTreeError {
    /// The post at which indexing stopped
    pub fn post_id(&self) -> PostId {
        match self {
            MalformedTreeError::UnresolvedParent { post_id, .. }
            | MalformedTreeError::DuplicatePost { post_id }
            | MalformedTreeError::ForeignThread { post_id, .. } => *post_id,
        }
    }
}

/// A post together with its root-to-self path of ids
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPost {
    pub post: Post,
    pub path: Vec<PostId>,
}

impl IndexedPost {
    /// Id of the root post this post descends from (itself for roots)
    pub fn root_id(&self) -> PostId {
        self.path[0]
    }

    pub fn is_ancestor_of(&self, other: &IndexedPost) -> bool {
        self.path.len() < other.path.len() && other.path.starts_with(&self.path)
    }
}

/// Paths for `order`, which must be sorted by id.
///
/// A reply can only point at an earlier post, so its parent's path is always
/// known by the time the reply is reached and a single pass suffices.
fn assign_paths(order: &[&Post]) -> Result<Vec<Vec<PostId>>, MalformedTreeError> {
    let thread_id = order.first().map(|p| p.thread_id);
    let mut positions: HashMap<PostId, usize> = HashMap::with_capacity(order.len());
    let mut paths: Vec<Vec<PostId>> = Vec::with_capacity(order.len());

    for post in order {
        if let Some(expected) = thread_id.filter(|&t| t != post.thread_id) {
            return Err(MalformedTreeError::ForeignThread {
                post_id: post.id,
                expected,
                found: post.thread_id,
            });
        }

        let path = if post.is_root() {
            vec![post.id]
        } else {
            // A parent with a larger id hasn't been visited yet and is rejected here too
            let parent = positions.get(&post.parent_id).ok_or(
                MalformedTreeError::UnresolvedParent {
                    post_id: post.id,
                    parent_id: post.parent_id,
                },
            )?;
            let parent_path = &paths[*parent];
            let mut path = Vec::with_capacity(parent_path.len() + 1);
            path.extend_from_slice(parent_path);
            path.push(post.id);
            path
        };

        if positions.insert(post.id, paths.len()).is_some() {
            return Err(MalformedTreeError::DuplicatePost { post_id: post.id });
        }
        paths.push(path);
    }

    Ok(paths)
}

/// Compute the materialized path of every post in one thread.
///
/// Input order does not matter; posts are visited in ascending id order.
pub fn index(posts: &[Post]) -> Result<HashMap<PostId, Vec<PostId>>, MalformedTreeError> {
    let mut order: Vec<&Post> = posts.iter().collect();
    order.sort_by_key(|p| p.id);

    let paths = assign_paths(&order)?;
    Ok(order.iter().map(|p| p.id).zip(paths).collect())
}

/// Index a thread snapshot and attach each path to its post, in id order
pub fn index_posts(mut posts: Vec<Post>) -> Result<Vec<IndexedPost>, MalformedTreeError> {
    posts.sort_by_key(|p| p.id);

    let paths = {
        let order: Vec<&Post> = posts.iter().collect();
        assign_paths(&order)?
    };

    Ok(posts
        .into_iter()
        .zip(paths)
        .map(|(post, path)| IndexedPost { post, path })
        .collect())
}
