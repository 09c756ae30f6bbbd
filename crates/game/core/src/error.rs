//! Error infrastructure for aura-core.
//!
//! The engine is pure state-transition logic, so the taxonomy is small:
//! contract violations on the inputs (`advance` deltas, effect specs) and
//! runaway chains of deferred hook commands.
//!
//! # Design Principles
//!
//! - **Type Safety**: one `thiserror` enum, one variant per violated contract
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Ownership over checks**: an effect instance is moved into the registry on
//!   `apply`, so binding one instance to two entities cannot be expressed

use crate::kind::EffectKind;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Effect content misbehaving (e.g. hooks that keep spawning commands)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative time delta, effect with a zero max duration
    Validation,

    /// Internal error - the effect content is inconsistent.
    ///
    /// Examples: an `on_apply` hook that re-applies its own kind forever
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug in effect content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for aura-core errors.
///
/// Provides a uniform interface for error classification across the crate
/// and for hosts that wrap [`EffectError`] in their own error types.
pub trait EffectFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and for matching in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by [`crate::EffectRegistry`] operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("invalid time delta {delta}: must be a non-negative number")]
    InvalidDelta { delta: f64 },

    #[error("effect `{kind}` declares invalid max duration {duration}")]
    InvalidDuration { kind: EffectKind, duration: f64 },

    #[error("deferred effect commands nested too deep: reached depth {depth}")]
    CommandChainTooDeep { depth: usize },
}

impl EffectFault for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidDelta { .. } | Self::InvalidDuration { .. } => ErrorSeverity::Validation,
            Self::CommandChainTooDeep { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDelta { .. } => "invalid_delta",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::CommandChainTooDeep { .. } => "command_chain_too_deep",
        }
    }
}
