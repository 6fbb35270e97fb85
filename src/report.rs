//! Packing quality metrics and result reports.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Bins | Number of bins opened |
//! | Lower bound | `ceil(Σw / C)` (L1 bound) |
//! | Gap | Bins above the lower bound |
//! | Total free | Sum of unused capacity |
//! | Avg fill | Mean of per-bin fill ratios |
//! | Score | Packing score (lower = better) |
//!
//! # Reference
//! Martello & Toth (1990), "Knapsack Problems", Ch. 8: Bin Packing

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::fso::{FsoResult, Improvement};
use crate::models::{BinAssignment, PackingInstance};

/// Packing performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingSummary {
    /// Bins opened.
    pub bins: usize,
    /// L1 lower bound on bins.
    pub lower_bound: usize,
    /// `bins - lower_bound`.
    pub gap: usize,
    /// Sum of free capacity over all bins.
    pub total_free: u64,
    /// Mean fill ratio (0.0..=1.0).
    pub avg_fill: f64,
    /// Packing score of the assignment.
    pub score: f64,
    /// Search wall-clock time in seconds.
    pub elapsed_secs: f64,
}

impl PackingSummary {
    /// Computes the summary of an assignment.
    ///
    /// # Arguments
    /// * `instance` - The packed instance (for capacity and bound).
    /// * `assignment` - The decoded solution.
    /// * `elapsed` - Time spent searching.
    pub fn calculate(
        instance: &PackingInstance,
        assignment: &BinAssignment,
        elapsed: Duration,
    ) -> Self {
        let bins = assignment.bin_count();
        let lower_bound = instance.lower_bound();
        let ratios = assignment.fill_ratios(instance.capacity);
        let avg_fill = if ratios.is_empty() {
            0.0
        } else {
            ratios.iter().sum::<f64>() / ratios.len() as f64
        };

        Self {
            bins,
            lower_bound,
            gap: bins.saturating_sub(lower_bound),
            total_free: assignment.total_free(),
            avg_fill,
            score: assignment.score,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Whether the bin count matches the lower bound (provably optimal).
    pub fn is_optimal(&self) -> bool {
        self.gap == 0
    }
}

/// Writes the plain-text result report.
///
/// ```text
/// <==== RESULTS ====>
/// Best solution found by FSO: BinAssignment (Score = .., Bins = ..)
/// <--- Bin Solution --->
/// Bin 1: [5, 14, 11]
/// ...
/// Free capacities in each bin: [0, 3, ...]
/// Time taken: 0.012s
/// ```
pub fn write_text_report<W: Write>(writer: &mut W, result: &FsoResult) -> Result<()> {
    writeln!(writer, "<==== RESULTS ====>")?;
    writeln!(writer, "Best solution found by FSO: {}", result.best)?;
    writeln!(writer, "<--- Bin Solution --->")?;
    for (idx, bin) in result.best.bins.iter().enumerate() {
        writeln!(writer, "Bin {}: {:?}", idx + 1, bin)?;
    }
    writeln!(
        writer,
        "Free capacities in each bin: {:?}",
        result.best.free_capacities
    )?;
    writeln!(writer, "Time taken: {:.3}s", result.elapsed.as_secs_f64())?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    capacity: u64,
    items: usize,
    summary: PackingSummary,
    bins: &'a [Vec<u64>],
    free_capacities: &'a [u64],
    best_score: Option<f64>,
    evaluations: usize,
    improvements: &'a [Improvement],
}

/// Writes the result as pretty-printed JSON.
///
/// Non-finite scores (unscored empty instance) are written as `null`.
pub fn write_json_report<W: Write>(
    writer: &mut W,
    instance: &PackingInstance,
    result: &FsoResult,
) -> Result<()> {
    let report = JsonReport {
        capacity: instance.capacity,
        items: instance.len(),
        summary: PackingSummary::calculate(instance, &result.best, result.elapsed),
        bins: &result.best.bins,
        free_capacities: &result.best.free_capacities,
        best_score: result.best_score.is_finite().then_some(result.best_score),
        evaluations: result.evaluations,
        improvements: &result.improvements,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
