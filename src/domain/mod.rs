//! Domain logic - pure versioning rules independent of git operations

pub mod branch;
pub mod selector;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use selector::{select_latest, Selection, TagSelector};
pub use tag::{Tag, TagPattern};
pub use version::{SemanticVersion, VersionBump};
