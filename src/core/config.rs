//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. The config is an explicit value
//! passed to `World` and the oracle layer, so tests can vary rates and
//! thresholds per run.

/// Configuration for the simulation systems
///
/// These values have been tuned so that an unattended agent declines to
/// the critical band over a few minutes of wall time, giving the decision
/// oracle enough rounds to intervene.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the run's RNG (initial need levels)
    ///
    /// Two runs with the same seed spawn identical agent populations.
    pub seed: u64,

    /// Wall-clock milliseconds between simulation ticks
    ///
    /// At 16ms the loop advances at roughly 60 ticks per second, matching
    /// the cadence the decay rates were tuned against.
    pub tick_interval_ms: u64,

    /// Ticks between decision-oracle queries
    ///
    /// At 90 ticks (~1.5s of wall time) the oracle sees agent state often
    /// enough to catch a need before it crosses from LOW to DYING.
    pub think_interval: u64,

    /// Distance an agent covers per tick while following a path
    pub move_speed: f32,

    /// Amount each need drops per tick
    ///
    /// At 0.006 a need at the top of its range takes ~1600 ticks to reach
    /// zero without zone effects, which is slow enough that a single missed
    /// oracle round is never fatal.
    pub need_decay: f32,

    /// Need level below which health starts draining
    pub critical_threshold: f32,

    /// Need level below which the oracle prompt flags the agent as LOW
    ///
    /// Must sit above `critical_threshold`: LOW is the early-warning band.
    pub low_threshold: f32,

    /// Upper bound for agent health
    pub max_health: f32,

    /// Health lost per tick for each need below the critical threshold
    pub health_drain_per_critical: f32,

    /// Health regained per tick while no need is critical
    pub health_regen: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tick_interval_ms: 16,
            think_interval: 90,
            move_speed: 5.0,
            need_decay: 0.006,
            critical_threshold: 2.5,
            low_threshold: 4.0,
            max_health: 100.0,
            health_drain_per_critical: 0.03,
            health_regen: 0.01,
        }
    }
}

impl SimConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.critical_threshold >= self.low_threshold {
            return Err(format!(
                "critical_threshold ({}) should be < low_threshold ({})",
                self.critical_threshold, self.low_threshold
            ));
        }

        if self.need_decay <= 0.0 {
            return Err("need_decay must be positive".into());
        }

        if self.move_speed <= 0.0 {
            return Err("move_speed must be positive".into());
        }

        if self.think_interval == 0 {
            return Err("think_interval must be at least 1 tick".into());
        }

        if self.max_health <= 0.0 {
            return Err("max_health must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = SimConfig {
            critical_threshold: 5.0,
            low_threshold: 4.0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_think_interval_rejected() {
        let config = SimConfig {
            think_interval: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
