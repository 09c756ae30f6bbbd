//! Host attributes mutated by effect hooks.

use tracing::info;

/// Combat attributes of one actor.
///
/// Effects read and write these freely during their hooks; the engine puts
/// no rules on them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub max_health: f64,
    pub health: f64,
    pub armor: f64,
    pub mana: f64,
    pub attack_damage: f64,
    pub alive: bool,
    /// Set while a stun is active.
    pub stunned: bool,
}

impl Attributes {
    pub const DEFAULT_MAX_HEALTH: f64 = 100.0;
    pub const DEFAULT_MANA: f64 = 100.0;
    pub const DEFAULT_ATTACK_DAMAGE: f64 = 10.0;

    /// Full health, no armor, default mana and attack.
    pub fn new(max_health: f64) -> Self {
        Self {
            max_health,
            health: max_health,
            armor: 0.0,
            mana: Self::DEFAULT_MANA,
            attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
            alive: true,
            stunned: false,
        }
    }

    #[must_use]
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_armor(mut self, armor: f64) -> Self {
        self.armor = armor;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: f64) -> Self {
        self.mana = mana;
        self
    }

    #[must_use]
    pub fn with_attack_damage(mut self, attack_damage: f64) -> Self {
        self.attack_damage = attack_damage;
        self
    }

    /// Subtracts `value` from health.
    ///
    /// Returns true if this blow killed a living actor. Damage to an actor
    /// that is already dead still lowers health but never reports a second
    /// death.
    pub fn take_damage(&mut self, value: f64) -> bool {
        self.health -= value;
        if self.alive && self.health <= 0.0 {
            self.alive = false;
            info!(health = self.health, "actor died");
            true
        } else {
            false
        }
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_HEALTH)
    }
}
