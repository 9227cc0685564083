//! Common error infrastructure for game-core.
//!
//! This module provides the shared severity classification and the
//! [`GameError`] trait implemented by every error enum in the crate.
//! Domain-specific errors (e.g., [`crate::PathError`], [`crate::CommandError`])
//! are defined next to the operations that raise them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation has its own error type with specific variants
//! - **Never guess**: Malformed level data is surfaced, never patched over
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: A player mistake; the session reports it and continues
/// - **Validation**: Invalid level or configuration data, rejected at load time
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The session cannot continue and must be ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - reported to the player as a status message.
    ///
    /// Examples: unknown direction, item not in the room, no route
    Recoverable,

    /// Validation error - the input data is malformed and must be fixed.
    ///
    /// Examples: duplicate room name, zero traversal cost
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: exit pointing at a room missing from the graph
    Internal,

    /// Fatal error - session state corrupted, cannot continue.
    ///
    /// Examples: current room missing from the session's level copy
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log fields, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
