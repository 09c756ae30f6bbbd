//! Driver configuration.
use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Where the scenario to run comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioSource {
    Builtin(String),
    File(PathBuf),
}

impl ScenarioSource {
    /// A `.ron` argument names a file, anything else a built-in scenario.
    pub fn parse(value: &str) -> Self {
        if value.ends_with(".ron") {
            Self::File(PathBuf::from(value))
        } else {
            Self::Builtin(value.to_owned())
        }
    }
}

/// Settings of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Seconds advanced per step.
    pub time_step: f64,
    /// Hard cap on the number of steps.
    pub max_steps: usize,
    pub scenario: ScenarioSource,
    /// Print per-step snapshots as JSON lines instead of logging them.
    pub json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0,
            max_steps: 1_000,
            scenario: ScenarioSource::Builtin("venom".to_owned()),
            json: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AURA_TIME_STEP` - Seconds per step (default: 1.0)
    /// - `AURA_MAX_STEPS` - Step cap (default: 1000)
    /// - `AURA_SCENARIO` - Built-in name or `.ron` path (default: venom)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(step) = read_env::<f64>("AURA_TIME_STEP") {
            config.time_step = step;
        }
        if let Some(steps) = read_env::<usize>("AURA_MAX_STEPS") {
            config.max_steps = steps;
        }
        if let Ok(scenario) = env::var("AURA_SCENARIO") {
            config.scenario = ScenarioSource::parse(&scenario);
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            bail!("time step must be a positive number of seconds, got {}", self.time_step);
        }
        if self.max_steps == 0 {
            bail!("max steps must be at least 1");
        }
        Ok(())
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_source_by_extension() {
        assert_eq!(
            ScenarioSource::parse("skirmish"),
            ScenarioSource::Builtin("skirmish".into())
        );
        assert_eq!(
            ScenarioSource::parse("data/fight.ron"),
            ScenarioSource::File(PathBuf::from("data/fight.ron"))
        );
    }

    #[test]
    fn rejects_degenerate_steps() {
        assert!(ClientConfig::default().validate().is_ok());

        for time_step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ClientConfig {
                time_step,
                ..ClientConfig::default()
            };
            assert!(config.validate().is_err());
        }

        let config = ClientConfig {
            max_steps: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
