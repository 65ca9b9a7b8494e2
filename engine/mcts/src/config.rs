//! MCTS configuration parameters.

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/rollout/backpropagate iterations per search.
    pub iterations: u32,

    /// Exploration factor `c` in the UCB1 score
    /// `reward / visits + c * sqrt(ln(2 * parent_visits) / visits)`.
    /// 0.0 disables exploration (pure exploitation).
    pub exploration_factor: f64,

    /// Number of independent root-parallel trees. 1 = single-threaded search.
    /// The iteration budget is split across workers.
    pub workers: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 3000,
            exploration_factor: 2.0,
            workers: 1,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            exploration_factor: 2.0,
            workers: 1,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration factor.
    pub fn with_exploration_factor(mut self, c: f64) -> Self {
        self.exploration_factor = c;
        self
    }

    /// Builder pattern: set number of root-parallel workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check the parameters describe a runnable search.
    pub fn validate(&self) -> Result<(), String> {
        if self.iterations == 0 {
            return Err("iterations must be at least 1".to_string());
        }
        // The root starts with one visit and gains one per iteration
        if self.iterations == u32::MAX {
            return Err(format!("iterations must be below {}", u32::MAX));
        }
        if !self.exploration_factor.is_finite() || self.exploration_factor < 0.0 {
            return Err(format!(
                "exploration_factor must be a finite value >= 0, got {}",
                self.exploration_factor
            ));
        }
        if self.workers == 0 {
            return Err("workers must be at least 1".to_string());
        }
        Ok(())
    }
}
