//! Beneficial effects and crowd control.

use aura_core::{Effect, EffectContext, EffectSpec, PERMANENT, Variant};

use super::groups;
use crate::attributes::Attributes;

/// Permanent attack bonus, one increment per stack.
///
/// Never times out; a purge removes all stacks at once, so the clear
/// reverses every stack itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct BonusDamage;

impl BonusDamage {
    pub const PER_STACK: f64 = 2.0;
    pub const SPEC: EffectSpec = EffectSpec::new("bonus_damage", Variant::Stacking, PERMANENT)
        .with_dispel_groups(&[groups::PURGE]);
}

impl Effect<Attributes> for BonusDamage {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_apply(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().attack_damage += Self::PER_STACK;
    }

    fn on_clear(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        let bonus = Self::PER_STACK * f64::from(cx.stacks());
        cx.host_mut().attack_damage -= bonus;
    }
}

/// Prevents the actor from acting. A new stun replaces the old one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stun;

impl Stun {
    pub const SPEC: EffectSpec = EffectSpec::new("stun", Variant::Override, 2.0)
        .with_dispel_groups(&[groups::CLEANSE, groups::DEATH]);
}

impl Effect<Attributes> for Stun {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    // Idempotent, since an override drops the previous stun without a clear.
    fn on_apply(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().stunned = true;
    }

    fn on_clear(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().stunned = false;
    }
}
