//! Migration error taxonomy.
//!
//! Every failure is a deterministic function of the input file: there are no
//! retries, and a failed file is always left byte-identical on disk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    /// The file carries no `@Component` marker, so there is nothing to do.
    #[error("file already migrated: no @Component decorator found")]
    AlreadyMigrated,

    #[error("extension `{0}` not supported, only .ts and .vue files can be migrated")]
    UnsupportedExtension(String),

    /// A `.vue` document without a `<script>` block cannot be migrated.
    #[error("unable to extract script tag content")]
    ScriptNotFound,

    #[error("failed to parse script: {0}")]
    Parse(String),

    #[error("no default-exported class declaration found")]
    ComponentClassNotFound,

    /// A decorator outside the recognized vocabulary aborts the whole file.
    #[error("the member `{member}` has non supported decorator @{decorator}")]
    UnsupportedDecorator { member: String, decorator: String },

    /// A member shape no transformer claims (static, private, constructor, …).
    #[error("the member `{member}` is not supported: {reason}")]
    UnsupportedMember { member: String, reason: String },

    /// Two members classified into the same output key. Entries are never
    /// overwritten; a collision indicates a taxonomy ambiguity.
    #[error("duplicate `{key}` entry in `{section}`")]
    DuplicateEntry { section: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    pub fn unsupported_member(member: impl Into<String>, reason: impl Into<String>) -> Self {
        MigrateError::UnsupportedMember {
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(section: impl Into<String>, key: impl Into<String>) -> Self {
        MigrateError::DuplicateEntry {
            section: section.into(),
            key: key.into(),
        }
    }
}
