//! Effect kinds shipped with the demo content.
//!
//! Every kind declares its static metadata as `SPEC` and implements the
//! aura-core hooks against [`Attributes`]. [`EffectName`] maps the kinds to
//! stable names so scenarios and the CLI can refer to them.

mod buffs;
mod debuffs;

pub use buffs::{BonusDamage, Stun};
pub use debuffs::{Corrosion, ManaLeak, Poison, Venom, Weakness};

use aura_core::{Effect, EffectSpec};

use crate::attributes::Attributes;

/// Dispel groups used by the content.
pub mod groups {
    /// Dispelled when the actor dies.
    pub const DEATH: &str = "death";
    /// Cures poisons.
    pub const ANTIDOTE: &str = "antidote";
    /// Removes physical impairments.
    pub const CLEANSE: &str = "cleanse";
    /// Strips magical enhancements, permanent ones included.
    pub const PURGE: &str = "purge";
}

/// Name of a content effect kind.
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
pub enum EffectName {
    Weakness,
    Poison,
    Venom,
    ManaLeak,
    Corrosion,
    BonusDamage,
    Stun,
}

impl EffectName {
    pub fn spec(self) -> &'static EffectSpec {
        match self {
            Self::Weakness => &Weakness::SPEC,
            Self::Poison => &Poison::SPEC,
            Self::Venom => &Venom::SPEC,
            Self::ManaLeak => &ManaLeak::SPEC,
            Self::Corrosion => &Corrosion::SPEC,
            Self::BonusDamage => &BonusDamage::SPEC,
            Self::Stun => &Stun::SPEC,
        }
    }

    /// Creates a fresh instance of this kind.
    pub fn instantiate(self) -> Box<dyn Effect<Attributes>> {
        match self {
            Self::Weakness => Box::new(Weakness),
            Self::Poison => Box::new(Poison),
            Self::Venom => Box::new(Venom),
            Self::ManaLeak => Box::new(ManaLeak),
            Self::Corrosion => Box::new(Corrosion),
            Self::BonusDamage => Box::new(BonusDamage),
            Self::Stun => Box::new(Stun),
        }
    }
}
