//! Scenario scripts: an actor, the effects it starts with and timed events.

use std::path::Path;

use aura_core::{Affected, EffectError};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::attributes::Attributes;
use crate::effects::EffectName;
use crate::loaders::{LoadResult, read_file};

/// Something that happens to the actor at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    Apply(EffectName),
    Dispel(String),
    Damage(f64),
}

impl ScenarioAction {
    pub fn perform(&self, actor: &mut Actor) -> Result<(), EffectError> {
        match self {
            Self::Apply(name) => {
                actor.apply_named(*name)?;
            }
            Self::Dispel(group) => {
                actor.apply_dispel(group)?;
            }
            Self::Damage(value) => actor.take_damage(*value)?,
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    /// Elapsed seconds at which the event fires.
    pub at: f64,
    pub action: ScenarioAction,
}

/// A scripted run of the effect engine against one actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub actor: Attributes,
    /// Effects applied before the first step.
    #[serde(default)]
    pub initial: Vec<EffectName>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    /// Names accepted by [`Self::builtin`].
    pub const BUILTIN: [&'static str; 2] = ["venom", "skirmish"];

    /// Parses a scenario from RON source.
    pub fn parse(source: &str) -> LoadResult<Self> {
        ron::from_str(source).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }

    /// Loads one of the scenarios embedded in the crate.
    pub fn builtin(name: &str) -> LoadResult<Self> {
        let source = match name {
            "venom" => include_str!("../../data/scenarios/venom.ron"),
            "skirmish" => include_str!("../../data/scenarios/skirmish.ron"),
            other => anyhow::bail!(
                "Unknown built-in scenario `{}` (expected one of {:?})",
                other,
                Self::BUILTIN
            ),
        };
        Self::parse(source)
    }

    /// Creates the actor with its initial effects applied.
    pub fn spawn(&self) -> Result<Actor, EffectError> {
        let mut actor = Actor::new(self.name.clone(), self.actor.clone());
        for name in &self.initial {
            actor.apply_named(*name)?;
        }
        Ok(actor)
    }

    /// Events with `from < at <= to`, in script order.
    pub fn due(&self, from: f64, to: f64) -> impl Iterator<Item = &ScenarioEvent> {
        self.events
            .iter()
            .filter(move |event| event.at > from && event.at <= to)
    }

    /// Time of the last scripted event.
    pub fn last_event_at(&self) -> f64 {
        self.events.iter().map(|event| event.at).fold(0.0, f64::max)
    }
}

/// Loader for scenario scripts stored on disk.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Scenario::parse(&content)
    }
}
