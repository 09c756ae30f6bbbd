//! Effect state machine.
//!
//! An [`EffectInstance`] pairs the mutable bookkeeping of one applied effect
//! ([`EffectState`]) with its behavior. The registry drives it through three
//! entry points: `attach` (composition on apply), `tick` (time decay and the
//! timeout path) and `dispel`. Each returns a [`Lifecycle`] telling the
//! registry whether the instance stays resident.

use core::fmt;

use tracing::trace;

use crate::hooks::{CommandQueue, Effect, EffectContext};
use crate::kind::{EffectKind, EffectSpec};
use crate::variant::Variant;

/// Identity of one applied instance, unique within its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable bookkeeping of one instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectState {
    /// Seconds left, or [`crate::PERMANENT`].
    pub remaining: f64,
    /// Stack/charge count, present only for counted variants.
    pub count: Option<u32>,
}

impl EffectState {
    /// Fraction of `max_duration` remaining; 1.0 for permanent effects.
    ///
    /// May exceed 1.0 for extended effects.
    pub fn percent_left(&self, max_duration: f64) -> f64 {
        if self.remaining.is_infinite() {
            1.0
        } else {
            self.remaining / max_duration
        }
    }
}

/// Whether an instance stays in the registry after a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Resident,
    /// The instance must be removed and receive `on_remove`.
    Finished,
}

/// The live, registry-owned state of one applied effect.
pub struct EffectInstance<H> {
    id: InstanceId,
    spec: &'static EffectSpec,
    state: EffectState,
    behavior: Box<dyn Effect<H>>,
}

impl<H> fmt::Debug for EffectInstance<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectInstance")
            .field("id", &self.id)
            .field("kind", &self.spec.kind)
            .field("variant", &self.spec.variant)
            .field("state", &self.state)
            .field("behavior", &self.behavior)
            .finish()
    }
}

impl<H> EffectInstance<H> {
    pub(crate) fn new(id: InstanceId, behavior: Box<dyn Effect<H>>) -> Self {
        let spec = behavior.spec();
        Self {
            id,
            spec,
            state: EffectState {
                remaining: spec.max_duration,
                count: None,
            },
            behavior,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn kind(&self) -> EffectKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static EffectSpec {
        self.spec
    }

    pub fn variant(&self) -> Variant {
        self.spec.variant
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn remaining(&self) -> f64 {
        self.state.remaining
    }

    pub fn max_duration(&self) -> f64 {
        self.spec.max_duration
    }

    /// Stack/charge count, `None` for single-charge variants.
    pub fn count(&self) -> Option<u32> {
        self.state.count
    }

    pub fn percent_left(&self) -> f64 {
        self.state.percent_left(self.spec.max_duration)
    }

    pub fn dispel_groups(&self) -> &'static [&'static str] {
        self.spec.dispel_groups
    }

    pub fn is_permanent(&self) -> bool {
        self.state.remaining.is_infinite()
    }

    pub fn behavior(&self) -> &dyn Effect<H> {
        self.behavior.as_ref()
    }

    /// Composes this (new) instance with the previous one of its kind.
    pub(crate) fn attach(
        &mut self,
        previous: Option<&EffectState>,
        host: &mut H,
        queue: &mut CommandQueue<H>,
    ) {
        let composition = self.spec.variant.compose(self.spec.max_duration, previous);
        self.state = EffectState {
            remaining: composition.remaining,
            count: composition.count,
        };

        if composition.fire_on_apply {
            self.with_context(host, queue, |effect, cx| effect.on_apply(cx));
        }
    }

    /// Consumes `dt` seconds of the timer.
    pub(crate) fn tick(&mut self, dt: f64, host: &mut H, queue: &mut CommandQueue<H>) -> Lifecycle {
        if self.state.remaining.is_infinite() {
            self.with_context(host, queue, |effect, cx| effect.on_update(cx, dt));
            return Lifecycle::Resident;
        }

        match self.spec.variant {
            Variant::MultiCharge => self.tick_charges(dt, host, queue),
            Variant::Override | Variant::Refresh | Variant::Extend | Variant::Stacking => {
                self.tick_single(dt, host, queue)
            }
        }
    }

    /// One shared timer; time beyond what is left is discarded.
    fn tick_single(&mut self, dt: f64, host: &mut H, queue: &mut CommandQueue<H>) -> Lifecycle {
        let passed = dt.min(self.state.remaining);
        self.state.remaining -= passed;
        trace!(kind = %self.spec.kind, passed, remaining = self.state.remaining, "effect tick");
        self.with_context(host, queue, |effect, cx| effect.on_update(cx, passed));

        if self.state.remaining <= 0.0 {
            self.time_out(host, queue)
        } else {
            Lifecycle::Resident
        }
    }

    /// Charges expire one after another, so leftover time keeps flowing into
    /// the next charge within the same call.
    fn tick_charges(&mut self, mut dt: f64, host: &mut H, queue: &mut CommandQueue<H>) -> Lifecycle {
        while dt > 0.0 {
            let passed = dt.min(self.state.remaining);
            self.state.remaining -= passed;
            dt -= passed;
            trace!(kind = %self.spec.kind, passed, remaining = self.state.remaining, "charge tick");
            self.with_context(host, queue, |effect, cx| effect.on_update(cx, passed));

            if self.state.remaining <= 0.0 && self.time_out(host, queue) == Lifecycle::Finished {
                return Lifecycle::Finished;
            }
        }
        Lifecycle::Resident
    }

    fn time_out(&mut self, host: &mut H, queue: &mut CommandQueue<H>) -> Lifecycle {
        let expiry = self.spec.variant.expire(self.state.count);
        self.with_context(host, queue, |effect, cx| effect.on_timeout(cx));
        for _ in 0..expiry.clears {
            self.with_context(host, queue, |effect, cx| effect.on_clear(cx));
        }

        if let Some(left) = expiry.charges_left {
            self.state.count = Some(left);
        }
        if expiry.is_final() {
            Lifecycle::Finished
        } else {
            self.state.remaining = self.spec.max_duration;
            Lifecycle::Resident
        }
    }

    /// Dispel path: a single full clear regardless of the stack count.
    pub(crate) fn dispel(&mut self, group: &str, host: &mut H, queue: &mut CommandQueue<H>) -> Lifecycle {
        self.with_context(host, queue, |effect, cx| effect.on_dispel(cx, group));
        self.with_context(host, queue, |effect, cx| effect.on_clear(cx));
        Lifecycle::Finished
    }

    /// Fires `on_remove` on an instance already detached from the registry.
    pub(crate) fn remove(mut self, host: &mut H, queue: &mut CommandQueue<H>) {
        self.with_context(host, queue, |effect, cx| effect.on_remove(cx));
    }

    fn with_context(
        &mut self,
        host: &mut H,
        queue: &mut CommandQueue<H>,
        hook: impl FnOnce(&mut dyn Effect<H>, &mut EffectContext<'_, H>),
    ) {
        let mut cx = EffectContext::new(host, self.state, queue);
        hook(self.behavior.as_mut(), &mut cx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::PERMANENT;

    #[derive(Debug, Default)]
    struct Counters {
        updates: Vec<f64>,
        timeouts: u32,
        clears: u32,
    }

    #[derive(Debug)]
    struct Probe(&'static EffectSpec);

    impl Effect<Counters> for Probe {
        fn spec(&self) -> &'static EffectSpec {
            self.0
        }

        fn on_update(&mut self, cx: &mut EffectContext<'_, Counters>, passed: f64) {
            cx.host_mut().updates.push(passed);
        }

        fn on_timeout(&mut self, cx: &mut EffectContext<'_, Counters>) {
            cx.host_mut().timeouts += 1;
        }

        fn on_clear(&mut self, cx: &mut EffectContext<'_, Counters>) {
            cx.host_mut().clears += 1;
        }
    }

    const SINGLE: EffectSpec = EffectSpec::new("single", Variant::Refresh, 3.0);
    const CHARGES: EffectSpec = EffectSpec::new("charges", Variant::MultiCharge, 2.0);
    const FOREVER: EffectSpec = EffectSpec::new("forever", Variant::Stacking, PERMANENT);

    fn attached(spec: &'static EffectSpec, host: &mut Counters) -> EffectInstance<Counters> {
        let mut instance = EffectInstance::new(InstanceId(0), Box::new(Probe(spec)));
        instance.attach(None, host, &mut Vec::new());
        instance
    }

    #[test]
    fn single_timer_discards_overflow() {
        let mut host = Counters::default();
        let mut instance = attached(&SINGLE, &mut host);

        assert_eq!(instance.tick(1.0, &mut host, &mut Vec::new()), Lifecycle::Resident);
        assert_eq!(instance.tick(10.0, &mut host, &mut Vec::new()), Lifecycle::Finished);

        assert_eq!(host.updates, vec![1.0, 2.0]);
        assert_eq!(host.timeouts, 1);
        assert_eq!(host.clears, 1);
    }

    #[test]
    fn zero_delta_still_updates_single_timer() {
        let mut host = Counters::default();
        let mut instance = attached(&SINGLE, &mut host);

        assert_eq!(instance.tick(0.0, &mut host, &mut Vec::new()), Lifecycle::Resident);
        assert_eq!(host.updates, vec![0.0]);
        assert_eq!(instance.remaining(), 3.0);
    }

    #[test]
    fn oversized_tick_expires_charges_in_sequence() {
        let mut host = Counters::default();
        let mut instance = attached(&CHARGES, &mut host);
        let previous = instance.state();

        let mut second = EffectInstance::new(InstanceId(1), Box::new(Probe(&CHARGES)));
        second.attach(Some(&previous), &mut host, &mut Vec::new());
        assert_eq!(second.count(), Some(2));

        // 2.0 for the first charge, 1.5 into the second.
        assert_eq!(second.tick(3.5, &mut host, &mut Vec::new()), Lifecycle::Resident);
        assert_eq!(second.count(), Some(1));
        assert_eq!(second.remaining(), 0.5);
        assert_eq!(host.clears, 1);

        assert_eq!(second.tick(5.0, &mut host, &mut Vec::new()), Lifecycle::Finished);
        assert_eq!(second.count(), Some(0));
        assert_eq!(host.timeouts, 2);
        assert_eq!(host.clears, 2);
        assert_eq!(host.updates, vec![2.0, 1.5, 0.5]);

        instance.remove(&mut host, &mut Vec::new());
    }

    #[test]
    fn permanent_instance_never_times_out() {
        let mut host = Counters::default();
        let mut instance = attached(&FOREVER, &mut host);

        for dt in [1.0, 1e12, f64::INFINITY] {
            assert_eq!(instance.tick(dt, &mut host, &mut Vec::new()), Lifecycle::Resident);
        }
        assert!(instance.is_permanent());
        assert_eq!(instance.percent_left(), 1.0);
        assert_eq!(host.timeouts, 0);
    }

    /// Records the state its hooks observe.
    #[derive(Debug)]
    struct Observer(&'static EffectSpec);

    #[derive(Debug, Default)]
    struct Seen {
        states: Vec<EffectState>,
        counts: Vec<Option<u32>>,
    }

    impl Effect<Seen> for Observer {
        fn spec(&self) -> &'static EffectSpec {
            self.0
        }

        fn on_update(&mut self, cx: &mut EffectContext<'_, Seen>, _passed: f64) {
            let state = cx.state();
            cx.host_mut().states.push(state);
        }

        fn on_timeout(&mut self, cx: &mut EffectContext<'_, Seen>) {
            let count = cx.count();
            cx.host_mut().counts.push(count);
        }
    }

    const GROUPED: EffectSpec =
        EffectSpec::new("grouped", Variant::MultiCharge, 2.0).with_dispel_groups(&["magic"]);

    #[test]
    fn hooks_observe_current_state() {
        let mut host = Seen::default();
        let mut first = EffectInstance::new(InstanceId(0), Box::new(Observer(&GROUPED)));
        first.attach(None, &mut host, &mut Vec::new());
        let mut instance = EffectInstance::new(InstanceId(1), Box::new(Observer(&GROUPED)));
        instance.attach(Some(&first.state()), &mut host, &mut Vec::new());

        assert_eq!(instance.dispel_groups(), &["magic"]);
        assert!(format!("{:?}", instance.behavior()).contains("grouped"));

        instance.tick(2.5, &mut host, &mut Vec::new());
        assert_eq!(
            host.states,
            vec![
                EffectState { remaining: 0.0, count: Some(2) },
                EffectState { remaining: 1.5, count: Some(1) },
            ]
        );
        assert_eq!(host.counts, vec![Some(2)]);
    }

    #[test]
    fn dispel_clears_exactly_once() {
        let mut host = Counters::default();
        let mut instance = attached(&FOREVER, &mut host);

        assert_eq!(
            instance.dispel("purge", &mut host, &mut Vec::new()),
            Lifecycle::Finished
        );
        assert_eq!(host.clears, 1);
        assert_eq!(host.timeouts, 0);
    }
}
