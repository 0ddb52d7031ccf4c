//! 0/1 knapsack over the integral budget axis.
//!
//! `best_profit[w]` holds the best profit achievable spending at most `w` cents. Investments
//! are folded in one at a time, sweeping `w` downwards so each one is counted at most once.
//! Instead of copying the winning subset into every cell, one bit per (investment, level)
//! records whether that investment improved the level, and the subset is recovered by a
//! single backwards walk once the table is complete.
//!
//! Levels above the total cost of the affordable investments all hold the same profit, so the
//! table stops there instead of at the budget.

use invest_challenges::{
    profits_equal, validate_investments, Investment, Solution, SolveError, SolveResult,
};
use tracing::debug;

/// Bit-packed `num_investments x num_levels` matrix.
#[derive(Debug, Clone)]
struct ChoiceTable {
    bits: Vec<u64>,
    num_levels: usize,
}

impl ChoiceTable {
    fn new(num_investments: usize, num_levels: usize) -> SolveResult<Self> {
        let num_bits = num_investments.checked_mul(num_levels).ok_or_else(|| {
            SolveError::Input(format!(
                "Choice table for {} investments over {} budget levels is too large",
                num_investments, num_levels
            ))
        })?;
        Ok(Self {
            bits: vec![0u64; (num_bits + 63) / 64],
            num_levels,
        })
    }

    fn set(&mut self, item: usize, level: usize) {
        let idx = item * self.num_levels + level;
        self.bits[idx / 64] |= 1 << (idx % 64);
    }

    fn get(&self, item: usize, level: usize) -> bool {
        let idx = item * self.num_levels + level;
        self.bits[idx / 64] & (1 << (idx % 64)) != 0
    }
}

#[derive(Debug, Clone)]
pub struct ProfitTable {
    best_profit: Vec<f64>,
    choices: ChoiceTable,
}

impl ProfitTable {
    pub fn build(investments: &[Investment], budget: u64) -> SolveResult<Self> {
        let affordable_cost = investments
            .iter()
            .filter(|inv| inv.cost <= budget)
            .fold(0u64, |total, inv| total.saturating_add(inv.cost));
        let top_level = budget.min(affordable_cost);
        let num_levels = usize::try_from(top_level)
            .ok()
            .and_then(|b| b.checked_add(1))
            .ok_or_else(|| {
                SolveError::Input(format!("Budget ({}) is too large to index", budget))
            })?;
        let max_level = num_levels - 1;

        let mut best_profit = vec![0f64; num_levels];
        let mut choices = ChoiceTable::new(investments.len(), num_levels)?;
        debug!(
            "Building profit table: {} investments x {} budget levels",
            investments.len(),
            num_levels
        );

        for (t, investment) in investments.iter().enumerate() {
            let cost = match usize::try_from(investment.cost) {
                Ok(cost) if cost <= max_level => cost,
                // Never affordable
                _ => continue,
            };
            for w in (cost..=max_level).rev() {
                let candidate = best_profit[w - cost] + investment.profit;
                if candidate > best_profit[w] {
                    best_profit[w] = candidate;
                    choices.set(t, w);
                }
            }
        }

        Ok(Self {
            best_profit,
            choices,
        })
    }

    /// Best profit per budget level, indexed by cents spent, up to the smaller of the budget and
    /// the total cost of the affordable investments.
    pub fn best_profit(&self) -> &[f64] {
        &self.best_profit
    }

    pub fn max_profit(&self) -> f64 {
        self.best_profit[self.best_profit.len() - 1]
    }

    /// Indices of the investments achieving [`ProfitTable::max_profit`], ascending.
    pub fn selected(&self, investments: &[Investment]) -> Vec<usize> {
        let mut level = self.best_profit.len() - 1;
        let mut items = Vec::new();
        for t in (0..investments.len()).rev() {
            if self.choices.get(t, level) {
                items.push(t);
                level -= investments[t].cost as usize;
            }
        }
        items.reverse();
        items
    }
}

pub fn solve_dp(investments: &[Investment], budget: u64) -> SolveResult<Solution> {
    validate_investments(investments)?;
    let table = ProfitTable::build(investments, budget)?;
    let solution = Solution::from_indices(investments, &table.selected(investments))?;

    if solution.total_cost > budget {
        return Err(SolveError::InvariantViolation(format!(
            "Total cost ({}) exceeded budget ({})",
            solution.total_cost, budget
        )));
    }
    if !profits_equal(solution.total_profit, table.max_profit()) {
        return Err(SolveError::InvariantViolation(format!(
            "Reconstructed profit ({}) does not match table profit ({})",
            solution.total_profit,
            table.max_profit()
        )));
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Investment> {
        vec![
            Investment::new("A", 20, 5.0),
            Investment::new("B", 30, 8.0),
            Investment::new("C", 50, 14.0),
        ]
    }

    #[test]
    fn test_sample_scenario() {
        let solution = solve_dp(&sample(), 50).unwrap();
        assert_eq!(solution.names, vec!["C".to_string()]);
        assert_eq!(solution.total_cost, 50);
        assert!(profits_equal(solution.total_profit, 14.0));
    }

    #[test]
    fn test_empty_catalog_and_zero_budget() {
        let solution = solve_dp(&[], 100).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.total_profit, 0.0);

        let solution = solve_dp(&sample(), 0).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.total_cost, 0);
        assert_eq!(solution.total_profit, 0.0);
    }

    #[test]
    fn test_nothing_affordable() {
        let solution = solve_dp(&sample(), 19).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.total_profit, 0.0);
    }

    #[test]
    fn test_each_investment_used_once() {
        // An unbounded knapsack would take A five times
        let investments = vec![Investment::new("A", 10, 3.0), Investment::new("B", 50, 4.0)];
        let solution = solve_dp(&investments, 50).unwrap();
        assert_eq!(solution.names, vec!["B".to_string()]);
        assert!(profits_equal(solution.total_profit, 4.0));

        let solution = solve_dp(&investments, 60).unwrap();
        assert_eq!(solution.names, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(solution.total_cost, 60);
    }

    #[test]
    fn test_best_profit_is_monotone() {
        let investments = vec![
            Investment::new("A", 7, 2.5),
            Investment::new("B", 3, 1.0),
            Investment::new("C", 12, 6.0),
            Investment::new("D", 5, 0.5),
            Investment::new("E", 9, 4.25),
        ];
        let table = ProfitTable::build(&investments, 30).unwrap();
        assert_eq!(table.best_profit().len(), 31);
        assert_eq!(table.best_profit()[0], 0.0);
        for pair in table.best_profit().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(profits_equal(table.max_profit(), 12.75));
    }

    #[test]
    fn test_levels_stop_at_affordable_cost() {
        let investments = vec![Investment::new("A", 7, 2.5), Investment::new("B", 3, 1.0)];
        let table = ProfitTable::build(&investments, 40).unwrap();
        assert_eq!(table.best_profit().len(), 11);
        assert!(profits_equal(table.max_profit(), 3.5));

        let solution = solve_dp(&investments, u64::MAX).unwrap();
        assert_eq!(solution.names, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(solution.total_cost, 10);
    }

    #[test]
    fn test_huge_budget_without_affordable_investments() {
        let solution = solve_dp(&[], u64::MAX - 1).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.total_cost, 0);
        assert_eq!(solution.total_profit, 0.0);

        let solution = solve_dp(&[Investment::new("A", u64::MAX, 1.0)], u64::MAX - 1).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_reconstruction_walks_back_pointers() {
        let investments = vec![
            Investment::new("A", 4, 5.0),
            Investment::new("B", 3, 4.0),
            Investment::new("C", 2, 3.0),
            Investment::new("D", 1, 1.0),
        ];
        let table = ProfitTable::build(&investments, 6).unwrap();
        let items = table.selected(&investments);
        // A + C and B + C + D both reach 8
        let total: f64 = items.iter().map(|&i| investments[i].profit).sum();
        let cost: u64 = items.iter().map(|&i| investments[i].cost).sum();
        assert!(profits_equal(total, 8.0));
        assert!(cost <= 6);
    }

    #[test]
    fn test_zero_cost_investment() {
        let investments = vec![Investment::new("Free", 0, 2.0), Investment::new("A", 5, 1.0)];
        let solution = solve_dp(&investments, 4).unwrap();
        assert_eq!(solution.names, vec!["Free".to_string()]);
        assert!(profits_equal(solution.total_profit, 2.0));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let investments = vec![Investment::new("A", 1, 1.0), Investment::new("A", 2, 1.0)];
        assert!(matches!(
            solve_dp(&investments, 10),
            Err(SolveError::Input(_))
        ));
    }
}
