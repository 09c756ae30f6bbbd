//! Per-entity effect registry.
//!
//! The registry is the sole owner of effect instances and enforces at most
//! one active instance per [`EffectKind`]. Entries are kept in insertion
//! order, which is also the order `advance` and `dispel` visit them in.
//! Re-applying a kind replaces the entry in place, so it keeps its slot.
//!
//! Hooks queue follow-up commands instead of calling back into the registry.
//! After each instance finishes its hook sequence the queue is drained
//! (depth-first, bounded by [`RegistryConfig::max_command_depth`]).

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::EffectError;
use crate::hooks::{Command, CommandQueue, Effect};
use crate::instance::{EffectInstance, InstanceId, Lifecycle};
use crate::kind::EffectKind;
use crate::snapshot::EffectSnapshot;

/// Mapping from effect kind to the single active instance of that kind.
///
/// `H` is the host attribute type effects read and write in their hooks.
/// Every mutating operation borrows the host for its duration.
pub struct EffectRegistry<H> {
    effects: IndexMap<EffectKind, EffectInstance<H>>,
    config: RegistryConfig,
    next_id: u64,
}

impl<H> core::fmt::Debug for EffectRegistry<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("effects", &self.effects)
            .field("config", &self.config)
            .finish()
    }
}

impl<H> Default for EffectRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EffectRegistry<H> {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            effects: IndexMap::new(),
            config,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Applies `effect`, composing it with any active instance of its kind.
    ///
    /// The new instance always becomes the registry entry. Whether its
    /// `on_apply` fires and how its duration/count are seeded is decided by
    /// its [`crate::Variant`].
    pub fn apply(
        &mut self,
        host: &mut H,
        effect: impl Effect<H> + 'static,
    ) -> Result<InstanceId, EffectError> {
        self.apply_boxed(host, Box::new(effect))
    }

    /// Same as [`Self::apply`] for an already boxed effect.
    ///
    /// An error only reports commands queued by the hooks that could not run.
    /// The effect itself stays applied, so retrying would apply it twice.
    pub fn apply_boxed(
        &mut self,
        host: &mut H,
        effect: Box<dyn Effect<H>>,
    ) -> Result<InstanceId, EffectError> {
        let mut queue = CommandQueue::new();
        let id = self.attach(host, effect, &mut queue)?;
        self.run_commands(host, queue, 1)?;
        Ok(id)
    }

    /// Advances every resident effect by `dt` seconds.
    ///
    /// Visits the instances resident when the call starts, in insertion
    /// order. Instances removed or replaced earlier in the same call (by their
    /// own timeout or by a queued command) are skipped.
    ///
    /// A failing command chain does not stop the pass: every instance is
    /// still advanced and the first error is returned afterwards.
    pub fn advance(&mut self, host: &mut H, dt: f64) -> Result<(), EffectError> {
        let dt = self.config.delta_policy.admit(dt)?;
        let mut first_error = None;

        for (kind, id) in self.resident(|_| true) {
            let mut queue = CommandQueue::new();
            let lifecycle = match self.effects.get_mut(&kind) {
                Some(instance) if instance.id() == id => instance.tick(dt, host, &mut queue),
                _ => continue,
            };
            if lifecycle == Lifecycle::Finished {
                debug!(%kind, %id, "effect expired");
                self.finish(kind, host, &mut queue);
            }
            if let Err(err) = self.run_commands(host, queue, 1) {
                warn!(%kind, %id, %err, "deferred effect commands failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Dispels every resident effect whose kind declares `group`.
    ///
    /// Returns how many instances were dispelled. No match is not an error.
    /// Like [`Self::advance`], a failing command chain is reported only after
    /// every matching instance was dispelled.
    pub fn dispel(&mut self, host: &mut H, group: &str) -> Result<usize, EffectError> {
        self.dispel_at(host, group, 0)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectInstance<H>> {
        self.effects.get(&kind)
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.contains_key(&kind)
    }

    /// Active instances in insertion order.
    pub fn effects(&self) -> impl Iterator<Item = &EffectInstance<H>> {
        self.effects.values()
    }

    pub fn kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.effects.keys().copied()
    }

    pub fn snapshot(&self) -> Vec<EffectSnapshot> {
        self.effects.values().map(EffectSnapshot::from).collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn next_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn attach(
        &mut self,
        host: &mut H,
        effect: Box<dyn Effect<H>>,
        queue: &mut CommandQueue<H>,
    ) -> Result<InstanceId, EffectError> {
        let spec = effect.spec();
        spec.validate()?;

        let id = self.next_instance_id();
        let mut instance = EffectInstance::new(id, effect);
        let previous = self.effects.get(&spec.kind).map(EffectInstance::state);
        instance.attach(previous.as_ref(), host, queue);

        debug!(
            kind = %spec.kind,
            variant = %spec.variant,
            %id,
            remaining = instance.remaining(),
            count = ?instance.count(),
            replaced = previous.is_some(),
            "effect applied"
        );
        // The previous instance, if any, is dropped without hooks.
        self.effects.insert(spec.kind, instance);
        Ok(id)
    }

    /// Snapshot of `(kind, id)` pairs matching `filter`, in insertion order.
    fn resident(
        &self,
        filter: impl Fn(&EffectInstance<H>) -> bool,
    ) -> Vec<(EffectKind, InstanceId)> {
        self.effects
            .iter()
            .filter(|(_, instance)| filter(instance))
            .map(|(kind, instance)| (*kind, instance.id()))
            .collect()
    }

    fn dispel_at(&mut self, host: &mut H, group: &str, depth: usize) -> Result<usize, EffectError> {
        let mut dispelled = 0;
        let mut first_error = None;

        for (kind, id) in self.resident(|instance| instance.spec().has_group(group)) {
            let mut queue = CommandQueue::new();
            match self.effects.get_mut(&kind) {
                Some(instance) if instance.id() == id => {
                    instance.dispel(group, host, &mut queue);
                }
                _ => continue,
            }
            debug!(%kind, %id, group, "effect dispelled");
            self.finish(kind, host, &mut queue);
            dispelled += 1;
            if let Err(err) = self.run_commands(host, queue, depth + 1) {
                warn!(%kind, %id, %err, "deferred effect commands failed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(dispelled), Err)
    }

    /// Detaches a finished instance and fires its `on_remove`.
    fn finish(&mut self, kind: EffectKind, host: &mut H, queue: &mut CommandQueue<H>) {
        if let Some(instance) = self.effects.shift_remove(&kind) {
            instance.remove(host, queue);
        }
    }

    fn run_commands(
        &mut self,
        host: &mut H,
        queue: CommandQueue<H>,
        depth: usize,
    ) -> Result<(), EffectError> {
        if queue.is_empty() {
            return Ok(());
        }
        if depth > self.config.max_command_depth {
            return Err(EffectError::CommandChainTooDeep { depth });
        }

        let mut first_error = None;
        for command in queue {
            let result = match command {
                Command::Dispel(group) => self.dispel_at(host, &group, depth).map(drop),
                Command::Apply(effect) => {
                    let mut nested = CommandQueue::new();
                    self.attach(host, effect, &mut nested)
                        .and_then(|_| self.run_commands(host, nested, depth + 1))
                }
            };
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Entity that embeds an [`EffectRegistry`] next to the attributes its
/// effects act on.
///
/// Implementors only provide the split borrow; the registry operations come
/// for free.
pub trait Affected {
    type Host;

    fn effects(&self) -> &EffectRegistry<Self::Host>;

    fn split_effects(&mut self) -> (&mut EffectRegistry<Self::Host>, &mut Self::Host);

    fn apply_effect(
        &mut self,
        effect: impl Effect<Self::Host> + 'static,
    ) -> Result<InstanceId, EffectError>
    where
        Self: Sized,
    {
        let (registry, host) = self.split_effects();
        registry.apply(host, effect)
    }

    fn update_effects(&mut self, dt: f64) -> Result<(), EffectError> {
        let (registry, host) = self.split_effects();
        registry.advance(host, dt)
    }

    fn apply_dispel(&mut self, group: &str) -> Result<usize, EffectError> {
        let (registry, host) = self.split_effects();
        registry.dispel(host, group)
    }
}
