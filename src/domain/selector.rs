//! Latest-tag selection over an unordered set of tag names

use std::cmp::Ordering;

use crate::domain::{SemanticVersion, Tag};

/// Outcome of scanning a repository's tags for the latest semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The repository has no tags at all
    NoTags,
    /// Tags exist but none of them is a semantic version
    NoSemanticTags { skipped: Vec<String> },
    /// The tag carrying the highest version, with its original name
    Latest {
        tag: String,
        version: SemanticVersion,
        skipped: Vec<String>,
    },
}

impl Selection {
    /// Name of the selected tag, if any
    pub fn tag(&self) -> Option<&str> {
        match self {
            Selection::Latest { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Tag names that were ignored because they are not semantic versions
    pub fn skipped(&self) -> &[String] {
        match self {
            Selection::NoTags => &[],
            Selection::NoSemanticTags { skipped } | Selection::Latest { skipped, .. } => {
                skipped.as_slice()
            }
        }
    }

    pub fn into_tag(self) -> Option<String> {
        match self {
            Selection::Latest { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

/// Picks the latest semantic-version tag.
///
/// Ordering uses [`SemanticVersion::cmp_precedence`]; among tags with an
/// equal `(major, minor, patch)` the one appearing first in the input wins,
/// so `["1.0.0", "v1.0.0"]` selects `"1.0.0"`. Callers feeding unordered
/// listings should sort them first; [`crate::git::Repository::list_tag_names`]
/// returns names sorted.
pub struct TagSelector;

impl TagSelector {
    /// Scan `raw_tags` and report the latest semantic version, if any
    pub fn select<S: AsRef<str>>(raw_tags: &[S]) -> Selection {
        if raw_tags.is_empty() {
            return Selection::NoTags;
        }

        let mut skipped = Vec::new();
        let mut best: Option<Tag> = None;

        for raw in raw_tags {
            let candidate = Tag::new(raw.as_ref());
            if !candidate.is_semantic() {
                skipped.push(candidate.name);
                continue;
            }

            // Strictly greater, so the first of several equal versions stays
            let replace = match (&best, &candidate.version) {
                (Some(Tag { version: Some(current), .. }), Some(version)) => {
                    version.cmp_precedence(current) == Ordering::Greater
                }
                _ => true,
            };
            if replace {
                best = Some(candidate);
            }
        }

        match best {
            Some(Tag {
                name,
                version: Some(version),
            }) => Selection::Latest {
                tag: name,
                version,
                skipped,
            },
            _ => Selection::NoSemanticTags { skipped },
        }
    }
}

/// Returns the original name of the latest semantic-version tag, or `None`
/// when there are no tags or none of them parse.
pub fn select_latest<S: AsRef<str>>(raw_tags: &[S]) -> Option<String> {
    TagSelector::select(raw_tags).into_tag()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_latest_empty() {
        let tags: Vec<String> = Vec::new();
        assert_eq!(select_latest(&tags), None);
        assert_eq!(TagSelector::select(&tags), Selection::NoTags);
    }

    #[test]
    fn test_select_latest_no_semantic_tags() {
        assert_eq!(select_latest(&["latest", "build"]), None);
        assert_eq!(
            TagSelector::select(&["latest", "build"]),
            Selection::NoSemanticTags {
                skipped: vec!["latest".to_string(), "build".to_string()]
            }
        );
    }

    #[test]
    fn test_select_latest_picks_highest() {
        assert_eq!(
            select_latest(&["1.0.0", "1.2.0", "0.9.9"]),
            Some("1.2.0".to_string())
        );
    }

    #[test]
    fn test_select_latest_numeric_not_lexical() {
        assert_eq!(
            select_latest(&["1.9.0", "1.10.0", "1.2.0"]),
            Some("1.10.0".to_string())
        );
    }

    #[test]
    fn test_select_latest_preserves_prefix() {
        assert_eq!(
            select_latest(&["v2.0.0", "1.9.9"]),
            Some("v2.0.0".to_string())
        );
    }

    #[test]
    fn test_select_latest_skips_invalid() {
        let selection = TagSelector::select(&["1.0.0", "bad-tag", "1.1.0", "latest"]);
        assert_eq!(selection.tag(), Some("1.1.0"));
        assert_eq!(selection.skipped(), &["bad-tag", "latest"]);
    }

    #[test]
    fn test_tie_break_first_in_input_order() {
        assert_eq!(
            select_latest(&["1.0.0", "v1.0.0"]),
            Some("1.0.0".to_string())
        );
        assert_eq!(
            select_latest(&["v1.0.0", "1.0.0"]),
            Some("v1.0.0".to_string())
        );
        assert_eq!(
            select_latest(&["1.0.0+build2", "0.1.0", "1.0.0"]),
            Some("1.0.0+build2".to_string())
        );
    }

    #[test]
    fn test_prerelease_does_not_outrank_release_number() {
        assert_eq!(
            select_latest(&["1.0.0", "1.0.1-rc.1"]),
            Some("1.0.1-rc.1".to_string())
        );
    }

    #[test]
    fn test_selection_carries_version() {
        match TagSelector::select(&["v3.1.4"]) {
            Selection::Latest { version, .. } => {
                assert_eq!(version, SemanticVersion::new(3, 1, 4))
            }
            other => panic!("unexpected selection: {:?}", other),
        }
    }
}
