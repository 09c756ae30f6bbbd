//! Effect identity and per-kind static metadata.
//!
//! Everything that is a property of an effect *kind* (its variant, its max
//! duration, the dispel groups it answers to) lives in an [`EffectSpec`]
//! declared as a constant next to the effect type. Instances only carry the
//! mutable bookkeeping (see [`crate::EffectState`]).

use core::fmt;

use crate::error::EffectError;
use crate::variant::Variant;

/// Max duration sentinel for effects that never time out.
pub const PERMANENT: f64 = f64::INFINITY;

/// Stable identifier distinguishing effect classes ("poison", "corrosion", ...).
///
/// Two instances are the same kind iff their tags are equal. Composition
/// rules only apply within a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EffectKind(&'static str);

impl EffectKind {
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Static metadata shared by every instance of one effect kind.
///
/// Declare one per effect type as an associated constant and return a
/// reference to it from [`crate::Effect::spec`]:
///
/// ```rust
/// use aura_core::{EffectSpec, Variant};
///
/// const CORROSION: EffectSpec = EffectSpec::new("corrosion", Variant::Stacking, 5.0)
///     .with_dispel_groups(&["death"]);
///
/// assert!(CORROSION.has_group("death"));
/// assert!(!CORROSION.has_group("antidote"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub variant: Variant,
    /// Duration of a single application in seconds, or [`PERMANENT`].
    pub max_duration: f64,
    pub dispel_groups: &'static [&'static str],
}

impl EffectSpec {
    /// Creates a spec that belongs to no dispel group.
    pub const fn new(tag: &'static str, variant: Variant, max_duration: f64) -> Self {
        Self {
            kind: EffectKind::new(tag),
            variant,
            max_duration,
            dispel_groups: &[],
        }
    }

    /// Sets the dispel groups this kind answers to (builder pattern).
    #[must_use]
    pub const fn with_dispel_groups(mut self, groups: &'static [&'static str]) -> Self {
        self.dispel_groups = groups;
        self
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.dispel_groups.contains(&group)
    }

    pub fn is_permanent(&self) -> bool {
        self.max_duration == PERMANENT
    }

    /// Checks that the max duration is a positive number (infinity allowed).
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.max_duration > 0.0 {
            Ok(())
        } else {
            Err(EffectError::InvalidDuration {
                kind: self.kind,
                duration: self.max_duration,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_compare_by_tag() {
        assert_eq!(EffectKind::new("poison"), EffectKind::new("poison"));
        assert_ne!(EffectKind::new("poison"), EffectKind::new("corrosion"));
        assert_eq!(EffectKind::new("poison").to_string(), "poison");
    }

    #[test]
    fn validate_rejects_non_positive_and_nan_durations() {
        for duration in [0.0, -1.0, f64::NAN] {
            let spec = EffectSpec::new("broken", Variant::Override, duration);
            assert!(matches!(
                spec.validate(),
                Err(EffectError::InvalidDuration { .. })
            ));
        }

        assert!(EffectSpec::new("ok", Variant::Refresh, 0.5).validate().is_ok());
        assert!(EffectSpec::new("forever", Variant::Stacking, PERMANENT)
            .validate()
            .is_ok());
    }

    #[test]
    fn permanent_specs_are_detected() {
        assert!(EffectSpec::new("aura", Variant::Stacking, PERMANENT).is_permanent());
        assert!(!EffectSpec::new("burn", Variant::Extend, 3.0).is_permanent());
    }
}
