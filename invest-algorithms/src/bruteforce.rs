//! Exhaustive search over every subset of the catalog.
//!
//! Subsets are encoded as `u64` masks where bit `j` selects investment `j`. Masks are visited
//! in increasing order and the first feasible mask with the highest profit wins. The work is
//! O(N * 2^N), so catalogs larger than [`BruteForce::max_investments`] are rejected before
//! any enumeration starts.
//!
//! The mask range can be split into contiguous chunks that are evaluated on worker threads.
//! Chunk bests are reduced in range order with the same strict comparison, so the returned
//! subset does not depend on the number of chunks or workers.

use futures::stream::{self, StreamExt};
use invest_challenges::{validate_investments, Investment, Solution, SolveError, SolveResult};
use std::{ops::Range, sync::Arc};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Masks are `u64`, so 2^63 is the largest range that can be counted.
pub const MAX_ENUMERABLE_INVESTMENTS: usize = 63;
pub const DEFAULT_MAX_INVESTMENTS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub mask: u64,
    pub cost: u64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub range: Range<u64>,
    pub best: Option<Candidate>,
    pub combinations_processed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BruteForce {
    pub max_investments: usize,
    pub num_chunks: usize,
    pub num_workers: usize,
}

impl Default for BruteForce {
    fn default() -> Self {
        Self {
            max_investments: DEFAULT_MAX_INVESTMENTS,
            num_chunks: 1,
            num_workers: 1,
        }
    }
}

impl BruteForce {
    pub fn solve(&self, investments: &[Investment], budget: u64) -> SolveResult<Solution> {
        validate_investments(investments)?;
        self.check_capacity(investments.len())?;

        let total = 1u64 << investments.len();
        let ranges = partition(total, self.num_chunks);
        let chunks = if self.num_workers <= 1 {
            ranges
                .into_iter()
                .map(|range| process_chunk(investments, budget, range))
                .collect()
        } else {
            run_chunks(
                Arc::new(investments.to_vec()),
                budget,
                ranges,
                self.num_workers,
            )?
        };
        combine(investments, budget, total, chunks)
    }

    pub fn check_capacity(&self, num_investments: usize) -> SolveResult<()> {
        let max_investments = self.max_investments.min(MAX_ENUMERABLE_INVESTMENTS);
        if num_investments > max_investments {
            return Err(SolveError::ExhaustedResource {
                num_investments,
                max_investments,
            });
        }
        Ok(())
    }
}

pub fn solve_bruteforce(investments: &[Investment], budget: u64) -> SolveResult<Solution> {
    BruteForce::default().solve(investments, budget)
}

pub fn solve_bruteforce_parallel(
    investments: &[Investment],
    budget: u64,
    num_chunks: usize,
    num_workers: usize,
) -> SolveResult<Solution> {
    BruteForce {
        num_chunks,
        num_workers,
        ..BruteForce::default()
    }
    .solve(investments, budget)
}

/// Returns the total cost and profit of the investments selected by `mask`, or `None` when
/// the cost does not fit in a `u64`.
pub fn evaluate_mask(investments: &[Investment], mask: u64) -> Option<(u64, f64)> {
    let mut cost = 0u64;
    let mut profit = 0f64;
    for (j, investment) in investments.iter().enumerate() {
        if mask & (1 << j) != 0 {
            cost = cost.checked_add(investment.cost)?;
            profit += investment.profit;
        }
    }
    Some((cost, profit))
}

pub fn process_chunk(investments: &[Investment], budget: u64, range: Range<u64>) -> ChunkResult {
    let mut best: Option<Candidate> = None;
    let mut combinations_processed = 0u64;

    for mask in range.clone() {
        if let Some((cost, profit)) = evaluate_mask(investments, mask) {
            if cost <= budget && best.map_or(true, |b| profit > b.profit) {
                best = Some(Candidate { mask, cost, profit });
            }
        }
        combinations_processed += 1;
    }

    ChunkResult {
        range,
        best,
        combinations_processed,
    }
}

/// Splits `[0, total)` into `num_chunks` contiguous ranges. The last range absorbs the
/// remainder, so some leading ranges are empty when `num_chunks > total`.
pub fn partition(total: u64, num_chunks: usize) -> Vec<Range<u64>> {
    let num_chunks = num_chunks.max(1) as u64;
    let chunk_size = total / num_chunks;
    (0..num_chunks)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i < num_chunks - 1 {
                (i + 1) * chunk_size
            } else {
                total
            };
            start..end
        })
        .collect()
}

/// Evaluates `ranges` on the blocking pool of a fresh runtime, at most `num_workers` at a
/// time. Results come back in the order of `ranges`.
///
/// Must not be called from within a tokio runtime.
fn run_chunks(
    investments: Arc<Vec<Investment>>,
    budget: u64,
    ranges: Vec<Range<u64>>,
    num_workers: usize,
) -> SolveResult<Vec<ChunkResult>> {
    let runtime = Runtime::new().map_err(|e| SolveError::Worker(e.to_string()))?;

    runtime.block_on(async {
        let results = stream::iter(ranges.into_iter().enumerate())
            .map(|(i, range)| {
                let investments = Arc::clone(&investments);
                debug!(
                    "Chunk {}: processing combinations {} to {}",
                    i,
                    range.start,
                    range.end.saturating_sub(1)
                );
                tokio::task::spawn_blocking(move || process_chunk(&investments, budget, range))
            })
            .buffered(num_workers.max(1))
            .collect::<Vec<_>>()
            .await;

        results
            .into_iter()
            .map(|result| result.map_err(|e| SolveError::Worker(e.to_string())))
            .collect()
    })
}

fn combine(
    investments: &[Investment],
    budget: u64,
    total: u64,
    chunks: Vec<ChunkResult>,
) -> SolveResult<Solution> {
    let mut expected_start = 0u64;
    for chunk in &chunks {
        if chunk.range.start != expected_start || chunk.range.end < chunk.range.start {
            return Err(SolveError::InvariantViolation(format!(
                "Chunk {:?} does not continue from combination {}",
                chunk.range, expected_start
            )));
        }
        expected_start = chunk.range.end;
    }

    let processed: u64 = chunks.iter().map(|c| c.combinations_processed).sum();
    info!(
        "Total combinations processed: {} (expected {})",
        processed, total
    );
    if processed != total || expected_start != total {
        return Err(SolveError::InvariantViolation(format!(
            "Processed {} combinations, expected {}",
            processed, total
        )));
    }

    let mut best: Option<Candidate> = None;
    for candidate in chunks.iter().filter_map(|c| c.best) {
        if best.map_or(true, |b| candidate.profit > b.profit) {
            best = Some(candidate);
        }
    }

    let items: Vec<usize> = match best {
        Some(candidate) => (0..investments.len())
            .filter(|&j| candidate.mask & (1 << j) != 0)
            .collect(),
        None => Vec::new(),
    };
    let solution = Solution::from_indices(investments, &items)?;
    if solution.total_cost > budget {
        return Err(SolveError::InvariantViolation(format!(
            "Total cost ({}) exceeded budget ({})",
            solution.total_cost, budget
        )));
    }
    Ok(solution)
}
