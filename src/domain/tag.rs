use crate::domain::SemanticVersion;
use crate::error::{Result, TaggerError};

/// Represents a git tag, together with its parsed version when the name is
/// a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub version: Option<SemanticVersion>,
}

impl Tag {
    /// Create a new tag from a string, parsing the version if possible
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let version = SemanticVersion::parse(&name).ok();
        Tag { name, version }
    }

    /// Whether the tag name is a recognized semantic version
    pub fn is_semantic(&self) -> bool {
        self.version.is_some()
    }
}

/// Tag naming pattern (e.g., "{version}", "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    pub const PLACEHOLDER: &'static str = "{version}";

    /// Create a new tag pattern, rejecting patterns without a placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(Self::PLACEHOLDER) {
            return Err(TaggerError::config(format!(
                "Tag pattern '{}' must contain {} placeholder",
                pattern,
                Self::PLACEHOLDER
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern
            .replace(Self::PLACEHOLDER, &version.to_string())
    }

    /// Validate if a tag matches this pattern
    pub fn matches(&self, tag: &str) -> Result<bool> {
        // Escape everything, then replace {version} with a version regex
        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(
            r"\{version\}",
            r"\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?",
        );

        regex::Regex::new(&format!("^{}$", regex_pattern))
            .map(|re| re.is_match(tag))
            .map_err(|e| TaggerError::config(format!("Invalid tag pattern: {}", e)))
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: Self::PLACEHOLDER.to_string(),
        }
    }
}
