use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const UNKNOWN_FIELD_KIND: &str = "UNKNOWN_FIELD_KIND";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const AMBIGUOUS_CHILD_NAME: &str = "AMBIGUOUS_CHILD_NAME";
    pub const EMPTY_COMPOSITE: &str = "EMPTY_COMPOSITE";
    pub const STRUCTURAL_DEPTH_EXCEEDED: &str = "STRUCTURAL_DEPTH_EXCEEDED";
    pub const DUPLICATE_PARTITION_IDENTIFIER: &str = "DUPLICATE_PARTITION_IDENTIFIER";
    pub const MISSING_GETTER_TARGET: &str = "MISSING_GETTER_TARGET";
    pub const INVALID_IDENTIFIER: &str = "INVALID_IDENTIFIER";
    pub const UNEXPECTED_ATTRIBUTE: &str = "UNEXPECTED_ATTRIBUTE";
    pub const CLARIFICATION_NEEDED: &str = "CLARIFICATION_NEEDED";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── Naming scopes ───────────────────────────────────────────────────

/// Scope in which a name must be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "owner", rename_all = "camelCase")]
pub enum NameScope {
    /// Top-level fields of the component.
    TopLevel,
    /// Children of one composite field (named).
    Composite(String),
    /// Java members and types derived for the Sling Model.
    Binding,
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameScope::TopLevel => write!(f, "top-level fields"),
            NameScope::Composite(owner) => write!(f, "children of '{owner}'"),
            NameScope::Binding => write!(f, "binding class members"),
        }
    }
}

// ── GenerateError ───────────────────────────────────────────────────

/// Every way a generation request can fail.
///
/// All checks are fail-fast: the first violation aborts the pipeline and
/// no artifact is produced. Nothing is renamed or merged silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The `kind` of a field is not in the registry.
    #[error("field '{field}' has unknown kind '{kind}'")]
    UnknownFieldKind { field: String, kind: String },

    /// A name is declared twice within one scope.
    #[error("duplicate name '{name}' among {scope}")]
    DuplicateName { name: String, scope: NameScope },

    /// A composite child reuses the name of a top-level field.
    #[error(
        "child '{child}' of '{composite}' has the same name as a top-level field; pick a distinct name"
    )]
    AmbiguousChildName { composite: String, child: String },

    /// A composite field has an empty child list.
    #[error("composite field '{field}' has no child fields")]
    EmptyComposite { field: String },

    /// A composite field contains another composite field.
    #[error("child '{child}' of '{composite}' is itself a composite; only one level of nesting is allowed")]
    StructuralDepthExceeded { composite: String, child: String },

    /// Two tab names fold to the same node identifier.
    #[error("tabs '{first}' and '{second}' both resolve to node '{identifier}'")]
    DuplicatePartitionIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    /// A top-level field is not placed in exactly one tab.
    #[error("field '{field}' is not placed in exactly one tab")]
    MissingGetterTarget { field: String },

    /// A name cannot be used as a node, Java or HTL identifier.
    #[error("'{name}' is not a valid identifier: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// An attribute is present on a field that cannot carry it.
    #[error("field '{field}' cannot carry '{attribute}'")]
    UnexpectedAttribute { field: String, attribute: String },

    /// Input is well-formed but underspecified.
    #[error("clarification needed: {0}")]
    ClarificationNeeded(String),

    /// The IR reached an emitter in a state validation should have rejected.
    #[error("internal generator error: {0}")]
    Internal(String),
}

impl GenerateError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            GenerateError::UnknownFieldKind { .. } => error_code::UNKNOWN_FIELD_KIND,
            GenerateError::DuplicateName { .. } => error_code::DUPLICATE_NAME,
            GenerateError::AmbiguousChildName { .. } => error_code::AMBIGUOUS_CHILD_NAME,
            GenerateError::EmptyComposite { .. } => error_code::EMPTY_COMPOSITE,
            GenerateError::StructuralDepthExceeded { .. } => {
                error_code::STRUCTURAL_DEPTH_EXCEEDED
            }
            GenerateError::DuplicatePartitionIdentifier { .. } => {
                error_code::DUPLICATE_PARTITION_IDENTIFIER
            }
            GenerateError::MissingGetterTarget { .. } => error_code::MISSING_GETTER_TARGET,
            GenerateError::InvalidIdentifier { .. } => error_code::INVALID_IDENTIFIER,
            GenerateError::UnexpectedAttribute { .. } => error_code::UNEXPECTED_ATTRIBUTE,
            GenerateError::ClarificationNeeded(_) => error_code::CLARIFICATION_NEEDED,
            GenerateError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// True for the "ask the caller" outcome rather than a hard failure.
    pub fn is_clarification(&self) -> bool {
        matches!(self, GenerateError::ClarificationNeeded(_))
    }

    pub(crate) fn clarify(reason: impl Into<String>) -> Self {
        GenerateError::ClarificationNeeded(reason.into())
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        GenerateError::InvalidIdentifier {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
