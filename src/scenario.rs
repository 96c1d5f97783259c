//! Scenario runner for side-by-side projections
//!
//! Each scenario is an independent projection with no shared state, so a
//! batch runs in parallel on the rayon thread pool.

use crate::assumptions::AssumptionSet;
use crate::error::Result;
use crate::projection::{ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;

/// A named variation of the base assumptions
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub assumptions: AssumptionSet,
}

/// Projection output for one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub result: ProjectionResult,
}

/// Runs many scenarios derived from a shared base
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(AssumptionSet::default_example());
/// let scenarios: Vec<_> = [0.0, 0.05, 0.10]
///     .iter()
///     .map(|&g| runner.scenario(format!("growth {g}"), |a| a.revenue.unit_growth = g))
///     .collect();
/// let results = runner.run_batch(&scenarios)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: AssumptionSet,
}

impl ScenarioRunner {
    pub fn new(base_assumptions: AssumptionSet) -> Self {
        Self { base_assumptions }
    }

    /// Build a scenario by adjusting a copy of the base assumptions
    pub fn scenario(&self, name: impl Into<String>, adjust: impl FnOnce(&mut AssumptionSet)) -> Scenario {
        let mut assumptions = self.base_assumptions.clone();
        adjust(&mut assumptions);
        Scenario {
            name: name.into(),
            assumptions,
        }
    }

    /// Run the base case
    pub fn run_base(&self) -> Result<ProjectionResult> {
        Ok(ProjectionEngine::new(self.base_assumptions.clone())?.project())
    }

    /// Run scenarios in parallel, preserving input order
    ///
    /// Fails on the first scenario with an invalid horizon.
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Result<Vec<ScenarioResult>> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| {
                let engine = ProjectionEngine::new(scenario.assumptions.clone())?;
                Ok(ScenarioResult {
                    name: scenario.name.clone(),
                    result: engine.project(),
                })
            })
            .collect()
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut AssumptionSet {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(AssumptionSet::default_example())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProFormaError;

    #[test]
    fn test_batch_preserves_order_and_matches_single_runs() {
        let runner = ScenarioRunner::default();
        let scenarios: Vec<Scenario> = [0.0, 0.05, 0.10, 0.20]
            .iter()
            .map(|&g| runner.scenario(format!("units +{}", g), |a| a.revenue.unit_growth = g))
            .collect();

        let results = runner.run_batch(&scenarios).unwrap();
        assert_eq!(results.len(), 4);
        for (scenario, output) in scenarios.iter().zip(&results) {
            assert_eq!(scenario.name, output.name);
            let single = ProjectionEngine::new(scenario.assumptions.clone()).unwrap().project();
            assert_eq!(single, output.result);
        }

        // Higher unit growth means higher final-year sales
        let final_sales: Vec<f64> = results.iter().map(|r| r.result.income[4].sales).collect();
        assert!(final_sales.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_scenario_fails_batch() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![
            runner.scenario("base", |_| {}),
            runner.scenario("empty", |a| a.years = 0),
        ];
        assert!(matches!(
            runner.run_batch(&scenarios),
            Err(ProFormaError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn test_base_unaffected_by_scenarios() {
        let runner = ScenarioRunner::default();
        let _ = runner.scenario("longer", |a| a.years = 10);
        assert_eq!(runner.assumptions().years, 5);
        assert_eq!(runner.run_base().unwrap().years(), 5);
    }
}
