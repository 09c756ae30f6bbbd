//! Concrete effect kinds and the demo host they act on.
//!
//! This crate houses the content side of the effect engine:
//! - [`Attributes`]: health, armor, mana and attack of a combatant
//! - [`Actor`]: attributes plus an [`aura_core::EffectRegistry`]
//! - Effect kinds (weakness, poison, venom, mana leak, corrosion, ...)
//!   addressable by name through [`EffectName`]
//! - Scenario scripts (data-driven via RON) for the demo driver
//!
//! All effect behavior goes through aura-core hooks; nothing here touches a
//! registry directly.

pub mod actor;
pub mod attributes;
pub mod effects;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use actor::Actor;
pub use attributes::Attributes;
pub use effects::{
    BonusDamage, Corrosion, EffectName, ManaLeak, Poison, Stun, Venom, Weakness, groups,
};

#[cfg(feature = "loaders")]
pub use loaders::{Scenario, ScenarioAction, ScenarioEvent, ScenarioLoader};
