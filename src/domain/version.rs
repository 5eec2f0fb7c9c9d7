use crate::error::{Result, TaggerError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version parsed from a tag name.
///
/// Equality is structural (prerelease and build included), while ordering
/// via [`SemanticVersion::cmp_precedence`] only looks at
/// `(major, minor, patch)`. The two disagree for `1.0.0` vs `1.0.0-rc.1`,
/// so the type deliberately has no `Ord` impl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    /// Create a release version with no prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version from a tag string.
    ///
    /// Accepts `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` with one optional
    /// leading `v` or `V`. Numeric components may carry leading zeros
    /// (`01.2.3` parses as `1.2.3`).
    ///
    /// # Example
    /// ```
    /// # use git_easy_tagger::domain::SemanticVersion;
    /// let v = SemanticVersion::parse("v1.2.3-rc.1+build.5").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
    /// assert_eq!(v.prerelease.as_deref(), Some("rc.1"));
    /// assert!(SemanticVersion::parse("1.2").is_err());
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        let clean = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);

        if clean.is_empty() {
            return Err(TaggerError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        // Build metadata is everything after the first '+', prerelease is
        // everything between the first '-' and the build marker.
        let (rest, build) = match clean.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (clean, None),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(TaggerError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                tag
            )));
        }

        let major = parse_numeric(parts[0], "major", tag)?;
        let minor = parse_numeric(parts[1], "minor", tag)?;
        let patch = parse_numeric(parts[2], "patch", tag)?;

        let prerelease = prerelease
            .map(|pre| parse_identifiers(pre, "prerelease", tag))
            .transpose()?;
        let build = build
            .map(|meta| parse_identifiers(meta, "build", tag))
            .transpose()?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }

    /// Compare two versions by `(major, minor, patch)` only.
    ///
    /// Prerelease and build metadata are ignored, so `1.0.0-rc.1` and
    /// `1.0.0` compare equal. This is not full SemVer precedence.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence_key().cmp(&other.precedence_key())
    }

    /// The numeric triple used for ordering
    pub fn precedence_key(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Returns true if this version carries a prerelease label
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    pub fn increment_major(&self) -> Result<Self> {
        let major = checked_increment(self.major, "major")?;
        Ok(SemanticVersion::new(major, 0, 0))
    }

    pub fn increment_minor(&self) -> Result<Self> {
        let minor = checked_increment(self.minor, "minor")?;
        Ok(SemanticVersion::new(self.major, minor, 0))
    }

    pub fn increment_patch(&self) -> Result<Self> {
        let patch = checked_increment(self.patch, "patch")?;
        Ok(SemanticVersion::new(self.major, self.minor, patch))
    }

    /// Bump version according to bump type.
    ///
    /// Lower-precedence components reset to zero and prerelease/build
    /// metadata is dropped.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        match bump_type {
            VersionBump::Major => self.increment_major(),
            VersionBump::Minor => self.increment_minor(),
            VersionBump::Patch => self.increment_patch(),
        }
    }
}

fn parse_numeric(part: &str, component: &str, tag: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaggerError::parse(format!(
            "Invalid {} version '{}' in '{}'",
            component, part, tag
        )));
    }

    part.parse::<u64>().map_err(|_| {
        TaggerError::parse(format!(
            "{} version '{}' in '{}' is out of range",
            component, part, tag
        ))
    })
}

fn parse_identifiers(raw: &str, kind: &str, tag: &str) -> Result<String> {
    let valid = !raw.is_empty()
        && raw.split('.').all(|ident| {
            !ident.is_empty()
                && ident
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    if !valid {
        return Err(TaggerError::parse(format!(
            "Invalid {} identifier '{}' in '{}'",
            kind, raw, tag
        )));
    }

    Ok(raw.to_string())
}

fn checked_increment(value: u64, component: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        TaggerError::overflow(format!(
            "{} version {} cannot be incremented",
            component, value
        ))
    })
}

impl FromStr for SemanticVersion {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}
