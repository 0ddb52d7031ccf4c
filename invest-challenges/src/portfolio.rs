use crate::{profits_equal, SolveError, SolveResult};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate investment. `cost` is in cents, `profit` is the absolute gain in euros.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Investment {
    pub name: String,
    pub cost: u64,
    pub profit: f64,
}

impl Investment {
    pub fn new(name: impl Into<String>, cost: u64, profit: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            profit,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub num_investments: usize,
    pub budget: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Solution {
    pub names: Vec<String>,
    pub total_cost: u64,
    pub total_profit: f64,
}

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a solution from positional indices into `investments`, in the given order.
    pub fn from_indices(investments: &[Investment], items: &[usize]) -> SolveResult<Self> {
        let mut solution = Self::new();
        for &i in items {
            let investment = &investments[i];
            solution.names.push(investment.name.clone());
            solution.total_cost = checked_cost(solution.total_cost, investment.cost)?;
            solution.total_profit += investment.profit;
        }
        Ok(solution)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub investments: Vec<Investment>,
    pub budget: u64,
}

impl Challenge {
    pub fn new(investments: Vec<Investment>, budget: u64) -> Self {
        Self {
            investments,
            budget,
        }
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Self {
        let mut rng = SmallRng::from_seed(seed.clone());

        // Prices in [1, 100] euros with cent precision, yields in [0.01%, 40%]
        let investments = (0..track.num_investments)
            .map(|i| {
                let cost: u64 = rng.gen_range(100..=10_000);
                let percent = rng.gen_range(1..=4_000) as f64 / 100.0;
                let profit = cost as f64 / 100.0 * percent / 100.0;
                Investment::new(format!("Share-{:04}", i + 1), cost, profit)
            })
            .collect();

        Self {
            investments,
            budget: track.budget,
        }
    }

    pub fn validate(&self) -> SolveResult<()> {
        validate_investments(&self.investments)
    }

    pub fn verify_solution(&self, solution: &Solution) -> SolveResult<()> {
        let selected: HashSet<&str> = solution.names.iter().map(String::as_str).collect();
        if selected.len() != solution.names.len() {
            return Err(SolveError::InvariantViolation(
                "Duplicate investments selected.".to_string(),
            ));
        }
        for name in &selected {
            if !self.investments.iter().any(|inv| inv.name == *name) {
                return Err(SolveError::InvariantViolation(format!(
                    "Investment ({}) is not in the catalog",
                    name
                )));
            }
        }

        let (total_cost, total_profit) = self
            .investments
            .iter()
            .filter(|inv| selected.contains(inv.name.as_str()))
            .try_fold((0u64, 0f64), |(c, p), inv| {
                Ok::<_, SolveError>((checked_cost(c, inv.cost)?, p + inv.profit))
            })?;

        if total_cost > self.budget {
            return Err(SolveError::InvariantViolation(format!(
                "Total cost ({}) exceeded budget ({})",
                total_cost, self.budget
            )));
        }
        if total_cost != solution.total_cost {
            return Err(SolveError::InvariantViolation(format!(
                "Reported cost ({}) does not match selected investments ({})",
                solution.total_cost, total_cost
            )));
        }
        if !profits_equal(total_profit, solution.total_profit) {
            return Err(SolveError::InvariantViolation(format!(
                "Reported profit ({}) does not match selected investments ({})",
                solution.total_profit, total_profit
            )));
        }
        Ok(())
    }
}

fn checked_cost(total: u64, cost: u64) -> SolveResult<u64> {
    total.checked_add(cost).ok_or_else(|| {
        SolveError::InvariantViolation(format!("Total cost overflowed adding {}", cost))
    })
}

/// Rejects catalogs the solvers cannot work with: non-finite or negative profits and
/// duplicated names.
pub fn validate_investments(investments: &[Investment]) -> SolveResult<()> {
    let mut names = HashSet::with_capacity(investments.len());
    for inv in investments {
        if !inv.profit.is_finite() || inv.profit < 0.0 {
            return Err(SolveError::Input(format!(
                "Investment ({}) has invalid profit {}",
                inv.name, inv.profit
            )));
        }
        if !names.insert(inv.name.as_str()) {
            return Err(SolveError::Input(format!(
                "Investment ({}) appears more than once",
                inv.name
            )));
        }
    }
    Ok(())
}
