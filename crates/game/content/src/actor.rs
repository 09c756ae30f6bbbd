//! Demo entity: attributes plus the effects acting on them.

use aura_core::{Affected, EffectError, EffectRegistry, InstanceId, RegistryConfig};
use tracing::info;

use crate::attributes::Attributes;
use crate::effects::{EffectName, groups};

/// A combatant that owns its effect registry.
#[derive(Debug)]
pub struct Actor {
    pub name: String,
    attributes: Attributes,
    effects: EffectRegistry<Attributes>,
}

impl Actor {
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self::with_config(name, attributes, RegistryConfig::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        attributes: Attributes,
        config: RegistryConfig,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            effects: EffectRegistry::with_config(config),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn is_alive(&self) -> bool {
        self.attributes.alive
    }

    /// Applies a fresh instance of the named kind.
    pub fn apply_named(&mut self, name: EffectName) -> Result<InstanceId, EffectError> {
        let (registry, host) = self.split_effects();
        registry.apply_boxed(host, name.instantiate())
    }

    /// Advances all effects by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> Result<(), EffectError> {
        self.update_effects(dt)
    }

    /// Direct damage from outside the effect system.
    ///
    /// A lethal blow dispels everything in the `death` group.
    pub fn take_damage(&mut self, value: f64) -> Result<(), EffectError> {
        if self.attributes.take_damage(value) {
            self.die()?;
        }
        Ok(())
    }

    fn die(&mut self) -> Result<(), EffectError> {
        let dispelled = self.apply_dispel(groups::DEATH)?;
        info!(actor = %self.name, dispelled, "actor died");
        Ok(())
    }
}

impl Affected for Actor {
    type Host = Attributes;

    fn effects(&self) -> &EffectRegistry<Attributes> {
        &self.effects
    }

    fn split_effects(&mut self) -> (&mut EffectRegistry<Attributes>, &mut Attributes) {
        (&mut self.effects, &mut self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Corrosion, Venom, Weakness};

    #[test]
    fn direct_kill_dispels_death_group() {
        let mut actor = Actor::new("dummy", Attributes::new(10.0));
        actor.apply_effect(Venom).unwrap();
        actor.apply_effect(Weakness).unwrap();

        actor.take_damage(50.0).unwrap();

        assert!(!actor.is_alive());
        assert!(!actor.effects().has(Venom::SPEC.kind));
        assert!(actor.effects().has(Weakness::SPEC.kind));
    }

    #[test]
    fn lethal_damage_over_time_dispels_itself_once() {
        let mut actor = Actor::new("dummy", Attributes::new(10.0).with_armor(3.0));
        actor.apply_effect(Venom).unwrap();
        actor.apply_effect(Venom).unwrap();
        actor.apply_effect(Corrosion).unwrap();

        // Two stacks deal 8 per second.
        actor.update(2.0).unwrap();

        assert!(!actor.is_alive());
        assert_eq!(actor.attributes().health, -6.0);
        assert!(!actor.effects().has(Venom::SPEC.kind));
        // Corrosion is not in the death group.
        assert_eq!(actor.attributes().armor, 2.0);
        assert!(actor.effects().has(Corrosion::SPEC.kind));
    }
}
