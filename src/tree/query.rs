use serde::Deserialize;

use crate::models::PostId;

/// How the posts of a thread are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Creation order
    #[default]
    Flat,
    /// Depth-first over the whole forest, paged by post
    Tree,
    /// Depth-first inside each root discussion, paged by root
    ParentTree,
}

impl SortMode {
    /// Parse the `sort` query parameter. Unknown values fall back to `Flat`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("tree") => SortMode::Tree,
            Some("parent_tree") => SortMode::ParentTree,
            _ => SortMode::Flat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Flat => "flat",
            SortMode::Tree => "tree",
            SortMode::ParentTree => "parent_tree",
        }
    }
}

/// A normalized page request over one thread
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalQuery {
    pub mode: SortMode,
    /// Posts per page (root groups for `ParentTree`); `None` is unbounded
    pub limit: Option<usize>,
    /// Resume strictly after this post in the mode's ordering
    pub since: Option<PostId>,
    pub desc: bool,
}

impl TraversalQuery {
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn since(mut self, since: PostId) -> Self {
        self.since = Some(since);
        self
    }

    pub fn desc(mut self, desc: bool) -> Self {
        self.desc = desc;
        self
    }
}

/// Raw `GET /thread/{slug_or_id}/posts` query string.
///
/// Every field is kept as text so that malformed values are normalized
/// instead of rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ThreadPostsParams {
    pub limit: Option<String>,
    pub since: Option<String>,
    pub desc: Option<String>,
    pub sort: Option<String>,
}

impl ThreadPostsParams {
    pub fn normalize(&self) -> TraversalQuery {
        let limit = self
            .limit
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|v| usize::try_from(v).ok());

        let since = self
            .since
            .as_deref()
            .and_then(|v| v.trim().parse::<PostId>().ok());

        let desc = self
            .desc
            .as_deref()
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        TraversalQuery {
            mode: SortMode::from_param(self.sort.as_deref()),
            limit,
            since,
            desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        limit: Option<&str>,
        since: Option<&str>,
        desc: Option<&str>,
        sort: Option<&str>,
    ) -> ThreadPostsParams {
        ThreadPostsParams {
            limit: limit.map(String::from),
            since: since.map(String::from),
            desc: desc.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn test_sort_mode_fallback() {
        assert_eq!(SortMode::from_param(Some("tree")), SortMode::Tree);
        assert_eq!(SortMode::from_param(Some("parent_tree")), SortMode::ParentTree);
        assert_eq!(SortMode::from_param(Some("flat")), SortMode::Flat);
        assert_eq!(SortMode::from_param(Some("TREE")), SortMode::Flat);
        assert_eq!(SortMode::from_param(Some("bogus")), SortMode::Flat);
        assert_eq!(SortMode::from_param(None), SortMode::Flat);
    }

    #[test]
    fn test_normalize_defaults() {
        let query = params(None, None, None, None).normalize();
        assert_eq!(query, TraversalQuery::new(SortMode::Flat));
    }

    #[test]
    fn test_normalize_full() {
        let query = params(Some("10"), Some("42"), Some("true"), Some("parent_tree")).normalize();
        assert_eq!(
            query,
            TraversalQuery::new(SortMode::ParentTree).limit(10).since(42).desc(true)
        );
    }

    #[test]
    fn test_normalize_lenient_values() {
        let query = params(Some("-3"), Some("abc"), Some("yes"), Some("tree")).normalize();
        assert_eq!(query.limit, None);
        assert_eq!(query.since, None);
        assert!(!query.desc);
        assert_eq!(query.mode, SortMode::Tree);

        let query = params(Some("zero"), None, Some("TRUE"), None).normalize();
        assert_eq!(query.limit, None);
        assert!(query.desc);
    }

    #[test]
    fn test_normalize_zero_limit_is_kept() {
        let query = params(Some("0"), None, None, None).normalize();
        assert_eq!(query.limit, Some(0));
    }
}
