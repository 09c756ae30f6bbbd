//! Fixed-step scenario runner.

use std::fmt;

use anyhow::{Context, Result};
use aura_content::{Actor, Attributes, Scenario, ScenarioLoader};
use aura_core::{Affected, EffectSnapshot};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ClientConfig, ScenarioSource};

/// State of the actor after one step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub elapsed: f64,
    pub attributes: Attributes,
    pub effects: Vec<EffectSnapshot>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>3}] t={:.2}s hp={:.1}",
            self.step, self.elapsed, self.attributes.health
        )?;
        if self.effects.is_empty() {
            return write!(f, " (no effects)");
        }
        for (i, effect) in self.effects.iter().enumerate() {
            let sep = if i == 0 { " | " } else { ", " };
            write!(f, "{sep}{effect}")?;
        }
        Ok(())
    }
}

/// Outcome of a whole run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub scenario: String,
    pub steps: usize,
    pub elapsed: f64,
    /// False when the step cap cut the run short.
    pub settled: bool,
    pub attributes: Attributes,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.attributes;
        writeln!(
            f,
            "{}: {} steps, {:.2}s{}",
            self.scenario,
            self.steps,
            self.elapsed,
            if self.settled { "" } else { " (step cap reached)" }
        )?;
        write!(
            f,
            "HP {:.1}/{:.1}{} | mana {:.1} | armor {:.1} | attack {:.1}",
            a.health,
            a.max_health,
            if a.alive { "" } else { " (dead)" },
            a.mana,
            a.armor,
            a.attack_damage
        )
    }
}

/// One scenario stepped against its actor.
pub struct Simulation {
    scenario: Scenario,
    actor: Actor,
    time_step: f64,
    elapsed: f64,
    steps: usize,
}

impl Simulation {
    pub fn new(scenario: Scenario, time_step: f64) -> Result<Self> {
        let actor = scenario
            .spawn()
            .with_context(|| format!("Failed to spawn scenario `{}`", scenario.name))?;
        Ok(Self {
            scenario,
            actor,
            time_step,
            elapsed: 0.0,
            steps: 0,
        })
    }

    /// No effects left and no events still to come.
    pub fn is_settled(&self) -> bool {
        self.actor.effects().is_empty() && self.elapsed >= self.scenario.last_event_at()
    }

    /// Advances the actor one step, then fires the events that fell due.
    pub fn step(&mut self) -> Result<StepReport> {
        let previous = self.elapsed;
        self.actor.update(self.time_step)?;
        self.elapsed += self.time_step;
        self.steps += 1;

        for event in self.scenario.due(previous, self.elapsed) {
            debug!(at = event.at, action = ?event.action, "scenario event");
            event.action.perform(&mut self.actor)?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> StepReport {
        StepReport {
            step: self.steps,
            elapsed: self.elapsed,
            attributes: self.actor.attributes().clone(),
            effects: self.actor.effects().snapshot(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            scenario: self.scenario.name.clone(),
            steps: self.steps,
            elapsed: self.elapsed,
            settled: self.is_settled(),
            attributes: self.actor.attributes().clone(),
        }
    }
}

pub fn load_scenario(source: &ScenarioSource) -> Result<Scenario> {
    match source {
        ScenarioSource::Builtin(name) => Scenario::builtin(name),
        ScenarioSource::File(path) => ScenarioLoader::load(path),
    }
}

/// Runs the configured scenario, handing every step to `emit`.
pub fn run(config: &ClientConfig, mut emit: impl FnMut(&StepReport) -> Result<()>) -> Result<Summary> {
    config.validate()?;
    let scenario = load_scenario(&config.scenario)?;
    info!(
        scenario = %scenario.name,
        time_step = config.time_step,
        max_steps = config.max_steps,
        "Starting simulation"
    );

    let mut simulation = Simulation::new(scenario, config.time_step)?;
    emit(&simulation.report())?;

    while !simulation.is_settled() && simulation.steps < config.max_steps {
        let report = simulation.step()?;
        emit(&report)?;
    }

    let summary = simulation.summary();
    info!(steps = summary.steps, settled = summary.settled, "Simulation finished");
    Ok(summary)
}
