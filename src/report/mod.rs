//! Timing and comparison harness around the two median strategies.

pub mod fixtures;

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    ledger::{flatten, Ledger},
    median::{results_agree, MedianStrategy, Strategy, AGREEMENT_TOLERANCE},
    workload::{generate_ledger, Distribution},
};

/// One timed median computation, flattening included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub strategy: Strategy,
    pub result: Option<f64>,
    pub elapsed: Duration,
}

impl Measurement {
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }
}

/// Flattens the ledger and computes its median with `strategy`, timing both.
pub fn measure(strategy: Strategy, ledger: &Ledger) -> Measurement {
    let start = Instant::now();
    let amounts = flatten(ledger);
    let result = strategy.median(&amounts);
    let elapsed = start.elapsed();
    debug!(%strategy, count = amounts.len(), ?result, ?elapsed, "median measured");
    Measurement {
        strategy,
        result,
        elapsed,
    }
}

/// Side-by-side run of both strategies on one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub sort: Measurement,
    pub quickselect: Measurement,
    pub agree: bool,
}

impl Comparison {
    /// How many times faster quickselect was than sorting; `None` when the
    /// quickselect run was too fast to time.
    pub fn speedup(&self) -> Option<f64> {
        speedup(self.sort.elapsed, self.quickselect.elapsed)
    }
}

pub fn compare(ledger: &Ledger, tolerance: f64) -> Comparison {
    let sort = measure(Strategy::Sort, ledger);
    let quickselect = measure(Strategy::QuickSelect, ledger);
    let agree = results_agree(sort.result, quickselect.result, tolerance);
    if !agree {
        warn!(sort = ?sort.result, quickselect = ?quickselect.result, "strategies disagree");
    }
    Comparison {
        sort,
        quickselect,
        agree,
    }
}

fn speedup(baseline: Duration, candidate: Duration) -> Option<f64> {
    let candidate = candidate.as_secs_f64();
    (candidate > 0.0).then(|| baseline.as_secs_f64() / candidate)
}

/// Which synthetic datasets to time.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkPlan {
    pub sizes: Vec<usize>,
    pub distributions: Vec<Distribution>,
    /// Seed for dataset generation; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub tolerance: f64,
}

impl Default for BenchmarkPlan {
    fn default() -> Self {
        Self {
            sizes: vec![1_000, 10_000, 100_000],
            distributions: Distribution::ALL.to_vec(),
            seed: None,
            tolerance: AGREEMENT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub size: usize,
    pub distribution: Distribution,
    pub comparison: Comparison,
}

impl BenchmarkRow {
    pub fn speedup(&self) -> Option<f64> {
        self.comparison.speedup()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkReport {
    pub fn all_agree(&self) -> bool {
        self.rows.iter().all(|row| row.comparison.agree)
    }

    /// Mean speedup for each size, in plan order.
    pub fn average_speedup_by_size(&self) -> Vec<(usize, f64)> {
        let mut sizes: Vec<usize> = Vec::new();
        for row in &self.rows {
            if !sizes.contains(&row.size) {
                sizes.push(row.size);
            }
        }
        sizes
            .into_iter()
            .filter_map(|size| {
                average(self.rows.iter().filter(|row| row.size == size)).map(|avg| (size, avg))
            })
            .collect()
    }

    /// Mean speedup for each distribution, in plan order.
    pub fn average_speedup_by_distribution(&self) -> Vec<(Distribution, f64)> {
        let mut distributions: Vec<Distribution> = Vec::new();
        for row in &self.rows {
            if !distributions.contains(&row.distribution) {
                distributions.push(row.distribution);
            }
        }
        distributions
            .into_iter()
            .filter_map(|distribution| {
                average(self.rows.iter().filter(|row| row.distribution == distribution))
                    .map(|avg| (distribution, avg))
            })
            .collect()
    }

    pub fn overall_average(&self) -> Option<f64> {
        average(self.rows.iter())
    }

    /// Row where quickselect gained the most.
    pub fn best(&self) -> Option<&BenchmarkRow> {
        self.timed_rows()
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, row)| row)
    }

    /// Row where quickselect gained the least.
    pub fn worst(&self) -> Option<&BenchmarkRow> {
        self.timed_rows()
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, row)| row)
    }

    fn timed_rows(&self) -> impl Iterator<Item = (f64, &BenchmarkRow)> {
        self.rows
            .iter()
            .filter_map(|row| row.speedup().map(|speedup| (speedup, row)))
    }
}

fn average<'a>(rows: impl Iterator<Item = &'a BenchmarkRow>) -> Option<f64> {
    let (sum, count) = rows
        .filter_map(BenchmarkRow::speedup)
        .fold((0.0, 0usize), |(sum, count), speedup| (sum + speedup, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Generates every (size, distribution) dataset in the plan and compares both
/// strategies on it.
pub fn run_benchmark(plan: &BenchmarkPlan) -> BenchmarkReport {
    let mut rng = match plan.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut rows = Vec::with_capacity(plan.sizes.len() * plan.distributions.len());
    for &size in &plan.sizes {
        for &distribution in &plan.distributions {
            let ledger = generate_ledger(size, distribution, &mut rng);
            let comparison = compare(&ledger, plan.tolerance);
            info!(
                size,
                %distribution,
                sort_ms = comparison.sort.millis(),
                quickselect_ms = comparison.quickselect.millis(),
                agree = comparison.agree,
                "benchmark row"
            );
            rows.push(BenchmarkRow {
                size,
                distribution,
                comparison,
            });
        }
    }

    BenchmarkReport { rows }
}
