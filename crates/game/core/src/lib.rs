//! Timed status-effect engine.
//!
//! `aura-core` tracks transient modifiers ("buffs" and "debuffs") attached to
//! a host entity, advances them by elapsed time and resolves how a newly
//! applied effect combines with an already active effect of the same kind.
//!
//! - [`EffectRegistry`]: per-entity map from [`EffectKind`] to the single
//!   active [`EffectInstance`] of that kind.
//! - [`Effect`]: the hook set a concrete effect kind implements.
//! - [`Variant`]: the five composition strategies (override, refresh,
//!   extend, multi-charge, stacking) and their timeout rules.
//!
//! All state mutation flows through the registry; hooks receive an
//! [`EffectContext`] that exposes the host and queues follow-up commands.
pub mod config;
pub mod error;
pub mod hooks;
pub mod instance;
pub mod kind;
pub mod registry;
pub mod snapshot;
pub mod variant;

pub use config::{DeltaPolicy, RegistryConfig};
pub use error::{EffectError, EffectFault, ErrorSeverity};
pub use hooks::{Effect, EffectContext};
pub use instance::{EffectInstance, EffectState, InstanceId, Lifecycle};
pub use kind::{EffectKind, EffectSpec, PERMANENT};
pub use registry::{Affected, EffectRegistry};
pub use snapshot::EffectSnapshot;
pub use variant::{Composition, Expiry, Variant};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
