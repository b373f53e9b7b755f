//! Fit summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use std::time::Duration;

use crate::pipeline::{BatchResult, FeatureFailure};

/// One row of the summary table
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub feature: String,
    pub samples: usize,
    pub skipped: usize,
    pub bin_count: usize,
    pub empty_bins: usize,
    /// Smallest and largest bin mean over non-empty bins
    pub mean_range: (f64, f64),
    pub score: f64,
}

/// Summary of a binning run
#[derive(Debug, Default)]
pub struct FitSummary {
    pub rows: Vec<FeatureRow>,
    pub failures: Vec<FeatureFailure>,
    pub load_time: Option<Duration>,
    pub fit_time: Option<Duration>,
    pub save_time: Option<Duration>,
}

impl FitSummary {
    pub fn from_batch(batch: &BatchResult) -> Self {
        let rows = batch
            .fits
            .iter()
            .map(|fit| {
                let state = &fit.fitted;
                let mean_range = state
                    .means
                    .iter()
                    .zip(&state.counts)
                    .filter(|(_, count)| **count > 0)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (&m, _)| {
                        (lo.min(m), hi.max(m))
                    });
                FeatureRow {
                    feature: fit.feature.clone(),
                    samples: fit.samples,
                    skipped: fit.skipped,
                    bin_count: state.bin_count,
                    empty_bins: state.empty_bins(),
                    mean_range,
                    score: state.score,
                }
            })
            .collect();

        Self {
            rows,
            failures: batch.failures.clone(),
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_fit_time(&mut self, elapsed: Duration) {
        self.fit_time = Some(elapsed);
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    /// Render the per-feature table
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Samples").add_attribute(Attribute::Bold),
            Cell::new("Skipped").add_attribute(Attribute::Bold),
            Cell::new("Bins").add_attribute(Attribute::Bold),
            Cell::new("Empty").add_attribute(Attribute::Bold),
            Cell::new("Mean range").add_attribute(Attribute::Bold),
            Cell::new("Log-L").add_attribute(Attribute::Bold),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.feature),
                Cell::new(row.samples).set_alignment(CellAlignment::Right),
                Cell::new(row.skipped)
                    .set_alignment(CellAlignment::Right)
                    .fg(if row.skipped > 0 { Color::Yellow } else { Color::White }),
                Cell::new(row.bin_count)
                    .set_alignment(CellAlignment::Right)
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                Cell::new(row.empty_bins)
                    .set_alignment(CellAlignment::Right)
                    .fg(if row.empty_bins > 0 { Color::Yellow } else { Color::White }),
                Cell::new(format!("{:.4} – {:.4}", row.mean_range.0, row.mean_range.1)),
                Cell::new(format!("{:.2}", row.score)).set_alignment(CellAlignment::Right),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("BINNING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        let timings = [
            ("Load", self.load_time),
            ("Fit", self.fit_time),
            ("Save", self.save_time),
        ];
        let timing_line: Vec<String> = timings
            .iter()
            .filter_map(|(label, t)| t.map(|d| format!("{} {:.2}s", label, d.as_secs_f64())))
            .collect();
        if !timing_line.is_empty() {
            println!();
            println!("    {}", style(timing_line.join("  ·  ")).dim());
        }

        if !self.failures.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILED FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for failure in &self.failures {
                println!(
                    "      {} {}: {}",
                    style("•").dim(),
                    style(&failure.feature).yellow(),
                    failure.error
                );
            }
        }
    }
}
