//! Read-only snapshot of a registry entry for display and export.

use core::fmt;

use crate::instance::EffectInstance;
use crate::variant::Variant;

/// Owned view of one active effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSnapshot {
    pub kind: String,
    pub variant: Variant,
    /// Seconds left, `None` for permanent effects.
    pub remaining: Option<f64>,
    /// `None` for permanent effects.
    pub max_duration: Option<f64>,
    pub percent_left: f64,
    pub count: Option<u32>,
}

impl<H> From<&EffectInstance<H>> for EffectSnapshot {
    fn from(instance: &EffectInstance<H>) -> Self {
        let finite = |value: f64| value.is_finite().then_some(value);
        Self {
            kind: instance.kind().to_string(),
            variant: instance.variant(),
            remaining: finite(instance.remaining()),
            max_duration: finite(instance.max_duration()),
            percent_left: instance.percent_left(),
            count: instance.count(),
        }
    }
}

impl fmt::Display for EffectSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.variant)?;
        match self.remaining {
            Some(remaining) => write!(f, " {remaining:.2}s")?,
            None => f.write_str(" permanent")?,
        }
        if let Some(count) = self.count {
            write!(f, " x{count}")?;
        }
        Ok(())
    }
}
