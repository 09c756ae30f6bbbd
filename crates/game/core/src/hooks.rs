//! Effect behavior: the hook set and the context hooks run in.
//!
//! A concrete effect kind is data plus a fixed set of callbacks. Every hook
//! defaults to a no-op so kinds only override what they need.
//!
//! Hooks never see the registry. Anything that would touch it (dispelling a
//! group, applying another effect) is queued on the [`EffectContext`] and
//! executed by the registry once the current instance has finished its hook
//! sequence. Because of this a hook can never re-enter the instance that is
//! running it, and each termination hook fires at most once.

use core::fmt;

use crate::instance::EffectState;
use crate::kind::EffectSpec;

/// Behavior of one effect kind against host attributes `H`.
///
/// # Hook order
///
/// - apply: `on_apply` (when the variant fires it)
/// - tick: `on_update`, then on expiry `on_timeout` + `on_clear` (once per
///   stack for stacking effects), then `on_remove` if the instance is done
/// - dispel: `on_dispel`, `on_clear` (exactly once), `on_remove`
pub trait Effect<H>: fmt::Debug {
    /// Static metadata of this kind.
    fn spec(&self) -> &'static EffectSpec;

    /// The effect was applied (see [`crate::Variant`] for when this fires).
    fn on_apply(&mut self, _cx: &mut EffectContext<'_, H>) {}

    /// Time passed while the effect was active.
    fn on_update(&mut self, _cx: &mut EffectContext<'_, H>, _passed: f64) {}

    /// The effect is being dispelled through `group`.
    fn on_dispel(&mut self, _cx: &mut EffectContext<'_, H>, _group: &str) {}

    /// The timer reached zero.
    fn on_timeout(&mut self, _cx: &mut EffectContext<'_, H>) {}

    /// The effect's changes to the host should be reversed.
    fn on_clear(&mut self, _cx: &mut EffectContext<'_, H>) {}

    /// The instance left the registry.
    fn on_remove(&mut self, _cx: &mut EffectContext<'_, H>) {}
}

/// Registry operation requested from inside a hook.
pub(crate) enum Command<H> {
    Dispel(String),
    Apply(Box<dyn Effect<H>>),
}

impl<H> fmt::Debug for Command<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispel(group) => f.debug_tuple("Dispel").field(group).finish(),
            Self::Apply(effect) => f.debug_tuple("Apply").field(&effect.spec().kind).finish(),
        }
    }
}

/// Commands queued by the hooks of one instance.
pub(crate) type CommandQueue<H> = Vec<Command<H>>;

/// Context passed to every hook.
///
/// Bundles mutable access to the host, a read-only copy of the instance's
/// bookkeeping and the deferred command queue.
pub struct EffectContext<'a, H> {
    host: &'a mut H,
    state: EffectState,
    commands: &'a mut CommandQueue<H>,
}

impl<'a, H> EffectContext<'a, H> {
    pub(crate) fn new(
        host: &'a mut H,
        state: EffectState,
        commands: &'a mut CommandQueue<H>,
    ) -> Self {
        Self {
            host,
            state,
            commands,
        }
    }

    pub fn host(&self) -> &H {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Bookkeeping of the instance as of this hook call.
    pub fn state(&self) -> EffectState {
        self.state
    }

    /// Seconds left on the instance's timer.
    pub fn remaining(&self) -> f64 {
        self.state.remaining
    }

    /// Stack/charge count, `None` for single-charge variants.
    pub fn count(&self) -> Option<u32> {
        self.state.count
    }

    /// Stack count for magnitude scaling; single-charge variants count as one.
    pub fn stacks(&self) -> u32 {
        self.state.count.unwrap_or(1)
    }

    /// Queues `dispel(group)` on the owning registry.
    ///
    /// Runs after the current instance finishes its hook sequence. If the
    /// current instance already left the registry by then it is not touched.
    pub fn dispel(&mut self, group: impl Into<String>) {
        self.commands.push(Command::Dispel(group.into()));
    }

    /// Queues `apply(effect)` on the owning registry.
    pub fn apply(&mut self, effect: impl Effect<H> + 'static) {
        self.commands.push(Command::Apply(Box::new(effect)));
    }
}
