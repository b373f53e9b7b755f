//! Optibin: Binning Regression CLI Tool
//!
//! Fits a likelihood-optimal binning of a target against each numeric
//! predictor and writes per-row predictions plus a JSON report.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use optibin::cli::Cli;
use optibin::pipeline::{
    add_prediction_columns, estimated_memory_mb, fit_features, load_dataset,
    numeric_feature_columns, save_dataset,
};
use optibin::report::{export_binning_report, ExportParams, FitSummary};
use optibin::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let config = cli.binning_config();
    config.validate()?;

    let output_path = cli.output_path();
    let report_path = cli.report_path();

    if !quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&cli.input, &cli.target, &cli.features, &output_path, &config);
    }

    // Step 1: Load dataset
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...", quiet);
    let mut df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    if !quiet {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        println!("      Estimated memory: {:.2} MB", estimated_memory_mb(&df));
    }
    let load_elapsed = step_start.elapsed();
    if !quiet {
        print_step_time(load_elapsed);
    }

    // Verify target and predictor columns exist
    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !column_names.contains(&cli.target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            cli.target,
            column_names
        );
    }

    let features = if cli.features.is_empty() {
        numeric_feature_columns(&df, &cli.target)
    } else {
        if let Some(missing) = cli.features.iter().find(|f| !column_names.contains(*f)) {
            anyhow::bail!(
                "Feature column '{}' not found in dataset. Available columns: {:?}",
                missing,
                column_names
            );
        }
        cli.features.clone()
    };

    if features.is_empty() {
        anyhow::bail!("No numeric predictor columns found besides target '{}'", cli.target);
    }

    // Step 2: Fit bins for every predictor
    if !quiet {
        print_step_header(1, "Optimal Bin Fitting");
        print_count("predictor(s) to fit", features.len(), None);
    }

    let step_start = Instant::now();
    let batch = fit_features(&df, &features, &cli.target, &config, !quiet)?;
    let fit_elapsed = step_start.elapsed();

    if !quiet {
        if batch.failures.is_empty() {
            print_success("All predictors fitted");
        } else {
            print_warning(&format!(
                "{} predictor(s) could not be fitted",
                batch.failures.len()
            ));
        }
        print_step_time(fit_elapsed);
    }

    if batch.fits.is_empty() {
        for failure in &batch.failures {
            eprintln!("{}: {}", failure.feature, failure.error);
        }
        anyhow::bail!("No predictor could be fitted");
    }

    // Step 3: Save predictions
    if !quiet {
        print_step_header(2, "Save Predictions");
    }

    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...", quiet);
    add_prediction_columns(&mut df, &batch.fits)?;
    save_dataset(&mut df, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    let save_elapsed = step_start.elapsed();
    if !quiet {
        print_step_time(save_elapsed);
    }

    // Step 4: Export report
    if let Some(report_path) = &report_path {
        if !quiet {
            print_step_header(3, "Export Report");
        }
        let spinner = create_spinner("Writing binning report...", quiet);
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            target_column: &cli.target,
            config,
        };
        match export_binning_report(&batch, report_path, &params) {
            Ok(()) => finish_with_success(
                &spinner,
                &format!("Report saved to {}", report_path.display()),
            ),
            Err(e) => finish_with_warning(&spinner, &format!("Report not written: {:#}", e)),
        }
    } else if !quiet {
        print_info("Report export disabled");
    }

    if !quiet {
        let mut summary = FitSummary::from_batch(&batch);
        summary.set_load_time(load_elapsed);
        summary.set_fit_time(fit_elapsed);
        summary.set_save_time(save_elapsed);
        summary.display();

        print_completion();
    }

    Ok(())
}
