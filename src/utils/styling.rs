//! Terminal styling utilities for the CLI

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::BinningConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

const BOX_WIDTH: usize = 56;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("▁▃▅▇ optibin ▇▅▃▁").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Likelihood-optimal binning regression").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: &Path,
    target: &str,
    features: &[String],
    output: &Path,
    config: &BinningConfig,
) {
    let line = "─".repeat(BOX_WIDTH - 2);
    let feature_label = if features.is_empty() {
        "all numeric columns".to_string()
    } else {
        features.join(", ")
    };

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(BOX_WIDTH - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:    {:<37}│", FOLDER, truncate_path(input, 36));
    println!("    │  {} Target:   {:<37}│", TARGET, truncate_string(target, 36));
    println!("    │  {} Features: {:<37}│", CHART, truncate_string(&feature_label, 36));
    println!("    │  {} Output:   {:<37}│", SAVE, truncate_path(output, 36));
    println!("    ├{}┤", line);
    println!(
        "    │  Max bins:     {:<38}│",
        style(config.max_bins).yellow()
    );
    println!(
        "    │  Sweep points: {:<38}│",
        style(config.sweep_points).yellow()
    );
    println!(
        "    │  Criterion:    {:<38}│",
        style(config.criterion.to_string()).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Optibin binning complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
