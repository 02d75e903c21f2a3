use std::fmt;

use thiserror::Error;

/// The kind of named entity an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Subject,
    Topic,
    Subtopic,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Subject => "subject",
            EntityKind::Topic => "topic",
            EntityKind::Subtopic => "subtopic",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejections raised by state operations.
///
/// Every variant leaves the state untouched. The messages are shown to the
/// user as warnings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),

    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: EntityKind, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    #[error("resource link cannot be empty")]
    EmptyLink,
}

impl PlanError {
    pub(crate) fn not_found(kind: EntityKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_owned(),
        }
    }
}

/// Trim a user-supplied name and reject it when nothing is left.
///
/// # Errors
///
/// Returns `PlanError::EmptyName` for empty or whitespace-only input.
pub fn normalize_name(kind: EntityKind, raw: &str) -> Result<String, PlanError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlanError::EmptyName(kind));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_trims() {
        let name = normalize_name(EntityKind::Topic, "  Standards ").unwrap();
        assert_eq!(name, "Standards");
    }

    #[test]
    fn normalize_name_rejects_blank() {
        let err = normalize_name(EntityKind::Subtopic, "   ").unwrap_err();
        assert_eq!(err, PlanError::EmptyName(EntityKind::Subtopic));
        assert_eq!(err.to_string(), "subtopic name cannot be empty");
    }

    #[test]
    fn duplicate_message_names_entity() {
        let err = PlanError::Duplicate {
            kind: EntityKind::Topic,
            name: "Standards".into(),
        };
        assert_eq!(err.to_string(), "topic 'Standards' already exists");
    }
}
