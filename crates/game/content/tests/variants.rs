use aura_core::Affected;
use aura_content::{
    Actor, Attributes, BonusDamage, Corrosion, ManaLeak, Poison, Stun, Weakness, groups,
};

fn actor(attributes: Attributes) -> Actor {
    Actor::new("target", attributes)
}

#[test]
fn refresh_keeps_single_application() {
    let mut ent = actor(Attributes::new(100.0));
    ent.apply_effect(Weakness).unwrap();
    assert_eq!(ent.effects().get(Weakness::SPEC.kind).unwrap().percent_left(), 1.0);
    assert_eq!(ent.attributes().attack_damage, 5.0);

    ent.update(3.0).unwrap();
    assert_eq!(
        ent.effects().get(Weakness::SPEC.kind).unwrap().percent_left(),
        2.0 / 5.0
    );

    // Re-applying refreshes the timer without halving attack again.
    ent.apply_effect(Weakness).unwrap();
    assert_eq!(ent.effects().get(Weakness::SPEC.kind).unwrap().remaining(), 5.0);
    assert_eq!(ent.attributes().attack_damage, 5.0);

    ent.update(6.0).unwrap();
    assert_eq!(ent.attributes().attack_damage, 10.0);
    assert!(ent.effects().is_empty());
}

#[test]
fn refresh_expires_after_full_duration() {
    let mut ent = actor(Attributes::new(100.0));
    ent.apply_effect(Weakness).unwrap();

    ent.update(3.0).unwrap();
    assert_eq!(
        ent.effects().get(Weakness::SPEC.kind).unwrap().percent_left(),
        2.0 / 5.0
    );
    assert_eq!(ent.attributes().attack_damage, 5.0);

    ent.update(3.0).unwrap();
    assert_eq!(ent.attributes().attack_damage, 10.0);
}

#[test]
fn extend_accumulates_duration() {
    let mut ent = actor(Attributes::new(100.0));
    ent.apply_effect(Poison).unwrap();
    ent.update(2.0).unwrap();
    assert_eq!(
        ent.effects().get(Poison::SPEC.kind).unwrap().percent_left(),
        3.0 / 5.0
    );

    ent.apply_effect(Poison).unwrap();
    let poison = ent.effects().get(Poison::SPEC.kind).unwrap();
    assert_eq!(poison.remaining(), 8.0);
    assert_eq!(poison.percent_left(), 8.0 / 5.0);

    ent.update(1.0).unwrap();
    ent.update(10.0).unwrap();
    // 2 + 1 + 7 seconds at 5 damage per second.
    assert_eq!(ent.attributes().health, 50.0);
    assert!(ent.effects().is_empty());
}

#[test]
fn multi_charge_expires_one_charge_at_a_time() {
    let mut ent = actor(Attributes::new(100.0));
    ent.apply_effect(ManaLeak).unwrap();
    assert_eq!(ent.attributes().mana, 50.0);

    ent.update(1.0).unwrap();
    ent.apply_effect(ManaLeak).unwrap();
    assert_eq!(ent.attributes().mana, 25.0);
    // The running timer is kept.
    assert_eq!(ent.effects().get(ManaLeak::SPEC.kind).unwrap().remaining(), 1.0);

    ent.update(1.0).unwrap();
    assert_eq!(ent.attributes().mana, 50.0);
    assert_eq!(ent.effects().get(ManaLeak::SPEC.kind).unwrap().count(), Some(1));

    ent.apply_effect(ManaLeak).unwrap();
    assert_eq!(ent.attributes().mana, 25.0);

    ent.update(6.0).unwrap();
    assert_eq!(ent.attributes().mana, 100.0);
    assert!(ent.effects().is_empty());

    ent.apply_effect(ManaLeak).unwrap();
    assert_eq!(ent.attributes().mana, 50.0);
    assert_eq!(ent.effects().get(ManaLeak::SPEC.kind).unwrap().count(), Some(1));
}

#[test]
fn stacking_shares_one_timer() {
    let mut ent = actor(Attributes::new(100.0).with_armor(10.0));
    ent.apply_effect(Corrosion).unwrap();
    assert_eq!(ent.attributes().armor, 9.0);

    ent.update(1.0).unwrap();
    ent.apply_effect(Corrosion).unwrap();
    assert_eq!(ent.attributes().armor, 8.0);

    ent.update(1.0).unwrap();
    ent.apply_effect(Corrosion).unwrap();
    assert_eq!(ent.attributes().armor, 7.0);
    assert_eq!(ent.effects().get(Corrosion::SPEC.kind).unwrap().count(), Some(3));

    ent.update(6.0).unwrap();
    assert_eq!(ent.attributes().armor, 10.0);
    assert!(ent.effects().is_empty());
}

#[test]
fn permanent_stacks_never_expire() {
    let mut ent = actor(Attributes::new(100.0).with_armor(10.0));
    ent.apply_effect(BonusDamage).unwrap();
    assert_eq!(ent.attributes().attack_damage, 12.0);

    ent.update(999_999_999.0).unwrap();
    assert_eq!(ent.attributes().attack_damage, 12.0);

    ent.apply_effect(BonusDamage).unwrap();
    assert_eq!(
        ent.effects().get(BonusDamage::SPEC.kind).unwrap().percent_left(),
        1.0
    );
    ent.apply_effect(BonusDamage).unwrap();
    assert_eq!(ent.attributes().attack_damage, 16.0);
    assert_eq!(
        ent.effects().get(BonusDamage::SPEC.kind).unwrap().percent_left(),
        1.0
    );

    ent.apply_dispel(groups::PURGE).unwrap();
    assert_eq!(ent.attributes().attack_damage, 10.0);
    assert!(ent.effects().is_empty());
}

#[test]
fn override_replaces_previous_instance() {
    let mut ent = actor(Attributes::new(100.0));
    ent.apply_effect(Stun).unwrap();
    ent.update(1.5).unwrap();

    let first = ent.effects().get(Stun::SPEC.kind).unwrap().id();
    ent.apply_effect(Stun).unwrap();
    let stun = ent.effects().get(Stun::SPEC.kind).unwrap();
    assert_ne!(stun.id(), first);
    assert_eq!(stun.remaining(), 2.0);
    assert!(ent.attributes().stunned);

    ent.update(2.0).unwrap();
    assert!(!ent.attributes().stunned);
    assert!(ent.effects().is_empty());
}

#[test]
fn charges_round_trip_to_baseline() {
    let mut ent = actor(Attributes::new(100.0).with_mana(80.0));
    for _ in 0..3 {
        ent.apply_effect(ManaLeak).unwrap();
    }
    assert_eq!(ent.attributes().mana, 80.0 * 0.5_f64.powi(3));
    assert_eq!(ent.effects().get(ManaLeak::SPEC.kind).unwrap().count(), Some(3));

    // One oversized step expires all three charges in sequence.
    ent.update(100.0).unwrap();
    assert_eq!(ent.attributes().mana, 80.0);
    assert!(ent.effects().is_empty());
}
