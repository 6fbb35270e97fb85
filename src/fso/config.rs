//! Run configuration for the firebug swarm search.

use serde::{Deserialize, Serialize};

use crate::error::{PackingError, Result};

/// Default inner exploration iterations per outer S1 iteration.
pub const DEFAULT_L1: usize = 34;
/// Default inner exploitation iterations per outer S1 iteration.
pub const DEFAULT_L2: usize = 11;

/// Firebug Swarm Optimization parameters.
///
/// # Example
/// ```
/// use u_binpack::fso::FsoConfig;
///
/// let config = FsoConfig::default()
///     .with_agents(10, 4)
///     .with_iterations(5, 5)
///     .with_seeds(1, 2);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.evaluation_budget(), 10 * 4 + 5 * (34 * 10 * 4 + 11 * 10) + 5 * 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsoConfig {
    /// Number of male agents (M).
    pub male_agents: usize,
    /// Female candidate vectors per male (F).
    pub female_agents: usize,
    /// Outer iterations of the exploration/exploitation stage (S1).
    pub s1_iterations: usize,
    /// Iterations of the convergence stage (S2).
    pub s2_iterations: usize,
    /// Exploration passes per S1 iteration (L1).
    pub l1: usize,
    /// Exploitation passes per S1 iteration (L2).
    pub l2: usize,
    /// Upper bound of the uniform range for initial keys, `[0, range)`.
    pub init_key_range: f64,
    /// Seed of the population-initialization stream.
    pub init_seed: u64,
    /// Seed of the search-coefficient stream.
    pub search_seed: u64,
}

impl Default for FsoConfig {
    fn default() -> Self {
        Self {
            male_agents: 20,
            female_agents: 5,
            s1_iterations: 30,
            s2_iterations: 20,
            l1: DEFAULT_L1,
            l2: DEFAULT_L2,
            init_key_range: 5.0,
            init_seed: 12345,
            search_seed: 98765,
        }
    }
}

impl FsoConfig {
    /// Sets male and female agent counts.
    pub fn with_agents(mut self, male_agents: usize, female_agents: usize) -> Self {
        self.male_agents = male_agents;
        self.female_agents = female_agents;
        self
    }

    /// Sets the S1 and S2 outer iteration counts.
    pub fn with_iterations(mut self, s1: usize, s2: usize) -> Self {
        self.s1_iterations = s1;
        self.s2_iterations = s2;
        self
    }

    /// Sets the inner loop counts L1 and L2.
    pub fn with_inner_loops(mut self, l1: usize, l2: usize) -> Self {
        self.l1 = l1;
        self.l2 = l2;
        self
    }

    /// Sets the initial key range.
    pub fn with_init_key_range(mut self, range: f64) -> Self {
        self.init_key_range = range;
        self
    }

    /// Sets both RNG seeds.
    pub fn with_seeds(mut self, init_seed: u64, search_seed: u64) -> Self {
        self.init_seed = init_seed;
        self.search_seed = search_seed;
        self
    }

    /// Total number of agents (M * F).
    pub fn total_agents(&self) -> usize {
        self.male_agents * self.female_agents
    }

    /// Number of decode+score evaluations a full run performs, excluding
    /// the final decode.
    pub fn evaluation_budget(&self) -> usize {
        let m = self.male_agents;
        let f = self.female_agents;
        m * f + self.s1_iterations * (self.l1 * m * f + self.l2 * m) + self.s2_iterations * m
    }

    /// Checks the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.male_agents == 0 {
            return Err(PackingError::invalid_config("male_agents must be positive"));
        }
        if self.female_agents == 0 {
            return Err(PackingError::invalid_config(
                "female_agents must be positive",
            ));
        }
        if !self.init_key_range.is_finite() || self.init_key_range <= 0.0 {
            return Err(PackingError::invalid_config(format!(
                "init_key_range must be positive and finite, got {}",
                self.init_key_range
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = FsoConfig::default();
        assert_eq!(c.male_agents, 20);
        assert_eq!(c.female_agents, 5);
        assert_eq!(c.l1, 34);
        assert_eq!(c.l2, 11);
        assert_eq!(c.total_agents(), 100);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_agents() {
        let c = FsoConfig::default().with_agents(0, 5);
        assert!(matches!(
            c.validate(),
            Err(PackingError::InvalidConfig { .. })
        ));
        let c = FsoConfig::default().with_agents(5, 0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_range() {
        assert!(FsoConfig::default()
            .with_init_key_range(0.0)
            .validate()
            .is_err());
        assert!(FsoConfig::default()
            .with_init_key_range(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_iterations_allowed() {
        let c = FsoConfig::default().with_iterations(0, 0);
        assert!(c.validate().is_ok());
        assert_eq!(c.evaluation_budget(), 100);
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let c: FsoConfig = serde_json::from_str(r#"{"male_agents": 4, "search_seed": 7}"#).unwrap();
        assert_eq!(c.male_agents, 4);
        assert_eq!(c.search_seed, 7);
        assert_eq!(c.female_agents, 5);
        assert_eq!(c.l1, DEFAULT_L1);
    }
}
