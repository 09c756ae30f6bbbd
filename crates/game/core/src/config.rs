use crate::error::EffectError;

/// How [`crate::EffectRegistry::advance`] treats negative time deltas.
///
/// NaN is rejected under every policy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeltaPolicy {
    /// Negative deltas are a contract violation and fail the call.
    #[default]
    Reject,
    /// Negative deltas advance by zero.
    Clamp,
}

impl DeltaPolicy {
    /// Returns the delta to advance by, or the violation.
    pub fn admit(self, delta: f64) -> Result<f64, EffectError> {
        if delta.is_nan() {
            return Err(EffectError::InvalidDelta { delta });
        }
        match self {
            _ if delta >= 0.0 => Ok(delta),
            Self::Reject => Err(EffectError::InvalidDelta { delta }),
            Self::Clamp => Ok(0.0),
        }
    }
}

/// Registry configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    pub delta_policy: DeltaPolicy,
    /// How many levels of hook-queued commands may spawn further commands.
    pub max_command_depth: usize,
}

impl RegistryConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_COMMAND_DEPTH: usize = 16;

    pub const fn new() -> Self {
        Self {
            delta_policy: DeltaPolicy::Reject,
            max_command_depth: Self::DEFAULT_MAX_COMMAND_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_delta_policy(mut self, delta_policy: DeltaPolicy) -> Self {
        self.delta_policy = delta_policy;
        self
    }

    #[must_use]
    pub const fn with_max_command_depth(mut self, max_command_depth: usize) -> Self {
        self.max_command_depth = max_command_depth;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
