//! Harmful effects.

use aura_core::{Effect, EffectContext, EffectSpec, Variant};

use super::groups;
use crate::attributes::Attributes;

/// Deals damage and queues the death dispel when the blow is lethal.
fn deal_damage(cx: &mut EffectContext<'_, Attributes>, amount: f64) {
    if cx.host_mut().take_damage(amount) {
        cx.dispel(groups::DEATH);
    }
}

/// Halves attack damage. Re-applying only refreshes the duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Weakness;

impl Weakness {
    pub const SPEC: EffectSpec = EffectSpec::new("weakness", Variant::Refresh, 5.0);
}

impl Effect<Attributes> for Weakness {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_apply(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().attack_damage *= 0.5;
    }

    fn on_clear(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().attack_damage *= 2.0;
    }
}

/// Damage over time; re-applying adds another full duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Poison;

impl Poison {
    pub const DAMAGE_PER_SECOND: f64 = 5.0;
    pub const SPEC: EffectSpec = EffectSpec::new("poison", Variant::Extend, 5.0)
        .with_dispel_groups(&[groups::DEATH, groups::ANTIDOTE]);
}

impl Effect<Attributes> for Poison {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_update(&mut self, cx: &mut EffectContext<'_, Attributes>, passed: f64) {
        deal_damage(cx, passed * Self::DAMAGE_PER_SECOND);
    }
}

/// Damage over time that grows with every stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct Venom;

impl Venom {
    pub const DAMAGE_PER_SECOND: f64 = 4.0;
    pub const SPEC: EffectSpec = EffectSpec::new("venom", Variant::Stacking, 5.0)
        .with_dispel_groups(&[groups::DEATH, groups::ANTIDOTE]);
}

impl Effect<Attributes> for Venom {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_update(&mut self, cx: &mut EffectContext<'_, Attributes>, passed: f64) {
        let damage = passed * Self::DAMAGE_PER_SECOND * f64::from(cx.stacks());
        deal_damage(cx, damage);
    }
}

/// Halves mana per charge; each charge gives its half back when it runs out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManaLeak;

impl ManaLeak {
    pub const SPEC: EffectSpec = EffectSpec::new("mana_leak", Variant::MultiCharge, 2.0)
        .with_dispel_groups(&[groups::DEATH]);
}

impl Effect<Attributes> for ManaLeak {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_apply(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().mana *= 0.5;
    }

    fn on_clear(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().mana *= 2.0;
    }
}

/// One point of armor per stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct Corrosion;

impl Corrosion {
    pub const SPEC: EffectSpec = EffectSpec::new("corrosion", Variant::Stacking, 5.0)
        .with_dispel_groups(&[groups::CLEANSE]);
}

impl Effect<Attributes> for Corrosion {
    fn spec(&self) -> &'static EffectSpec {
        &Self::SPEC
    }

    fn on_apply(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().armor -= 1.0;
    }

    fn on_clear(&mut self, cx: &mut EffectContext<'_, Attributes>) {
        cx.host_mut().armor += 1.0;
    }
}
