//! Threaded post retrieval.
//!
//! A thread's posts form a forest: roots have `parent == 0`, replies hang off
//! any earlier post of the same thread. [`index`] derives each post's
//! root-to-self path from a snapshot of the thread, and [`page`] orders and
//! paginates the indexed posts in one of three layouts.

mod cursor;
mod index;
mod planner;
mod query;

pub use index::{index, index_posts, IndexedPost, MalformedTreeError};
pub use planner::page;
pub use query::{SortMode, ThreadPostsParams, TraversalQuery};
