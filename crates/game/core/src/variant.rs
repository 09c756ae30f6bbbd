//! Composition variants.
//!
//! Every effect kind picks exactly one [`Variant`]. The variant decides what
//! happens when an effect of that kind is applied while another instance of the
//! same kind is still active, and what the timeout path does once the shared
//! timer runs out. Both rules live here behind a single `match` each so the
//! state machine stays exhaustive.
//!
//! | Variant       | Re-apply duration               | Count         | `on_apply` on re-apply |
//! |---------------|---------------------------------|---------------|------------------------|
//! | `Override`    | own max                         | -             | yes                    |
//! | `Refresh`     | max(own max, previous)          | -             | no                     |
//! | `Extend`      | own max + previous              | -             | no                     |
//! | `MultiCharge` | previous (timer keeps running)  | previous + 1  | yes                    |
//! | `Stacking`    | max(own max, previous)          | previous + 1  | yes                    |

use crate::instance::EffectState;

/// Composition strategy of an effect kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Variant {
    /// A new application replaces the previous instance outright.
    Override,
    /// A new application keeps the longer of the two durations.
    Refresh,
    /// A new application adds its duration to what is left.
    Extend,
    /// Applications accumulate as charges that expire one at a time.
    MultiCharge,
    /// Applications accumulate as stacks sharing one timer.
    Stacking,
}

/// Outcome of composing a new application with the previous instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composition {
    pub remaining: f64,
    /// Stack or charge count, `None` for single-charge variants.
    pub count: Option<u32>,
    pub fire_on_apply: bool,
}

/// What the timeout path does once the timer reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expiry {
    /// Number of `on_clear` calls to make.
    pub clears: u32,
    /// Count left after this expiry, `None` for variants that do not track one.
    pub charges_left: Option<u32>,
}

impl Expiry {
    /// True when the instance leaves the registry after this expiry.
    pub fn is_final(&self) -> bool {
        !matches!(self.charges_left, Some(left) if left > 0)
    }
}

impl Variant {
    /// True for the variants that carry a stack/charge count.
    pub const fn is_counted(&self) -> bool {
        matches!(self, Self::MultiCharge | Self::Stacking)
    }

    /// Resolves the state of a new instance given the previous one of its kind.
    pub fn compose(self, max_duration: f64, previous: Option<&EffectState>) -> Composition {
        let Some(previous) = previous else {
            return Composition {
                remaining: max_duration,
                count: self.is_counted().then_some(1),
                fire_on_apply: true,
            };
        };

        let next_count = Some(previous.count.unwrap_or(0).saturating_add(1));
        match self {
            Self::Override => Composition {
                remaining: max_duration,
                count: None,
                fire_on_apply: true,
            },
            Self::Refresh => Composition {
                remaining: max_duration.max(previous.remaining),
                count: None,
                fire_on_apply: false,
            },
            Self::Extend => Composition {
                remaining: max_duration + previous.remaining,
                count: None,
                fire_on_apply: false,
            },
            Self::MultiCharge => Composition {
                remaining: previous.remaining,
                count: next_count,
                fire_on_apply: true,
            },
            Self::Stacking => Composition {
                remaining: max_duration.max(previous.remaining),
                count: next_count,
                fire_on_apply: true,
            },
        }
    }

    /// Resolves the timeout path for an instance holding `count`.
    ///
    /// Stacking clears once per stack; dispelling clears once regardless of
    /// the count and does not go through here.
    pub fn expire(self, count: Option<u32>) -> Expiry {
        match self {
            Self::Override | Self::Refresh | Self::Extend => Expiry {
                clears: 1,
                charges_left: None,
            },
            Self::MultiCharge => Expiry {
                clears: 1,
                charges_left: Some(count.unwrap_or(1).saturating_sub(1)),
            },
            Self::Stacking => Expiry {
                clears: count.unwrap_or(1),
                charges_left: None,
            },
        }
    }
}
