// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application);
// this layer routes and prints.
//
// Three commands are supported:
//   1. `train`    — clean the data, fit and save the model
//   2. `predict`  — load the model and predict an average score
//   3. `describe` — print descriptive statistics of the data
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DescribeArgs, PredictArgs, TrainArgs};

use crate::application::config::PipelineConfig;
use crate::application::describe_use_case::EdaReport;

#[derive(Parser, Debug)]
#[command(
    name = "student-performance",
    version,
    about = "Analyse student exam scores and predict the average score from the three subjects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Describe(args) => run_describe(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let config = PipelineConfig::try_from(args)?;
    tracing::info!("Starting training on '{}'", config.data_path.display());

    let (model, report) = TrainUseCase::new(config.clone()).execute()?;

    println!("Model trained on {} rows ({} held out).", report.n_train, report.n_test);
    println!("  intercept: {:.6}", model.intercept);
    for (name, c) in model.feature_names.iter().zip(&model.coefficients) {
        println!("  {name}: {c:.6}");
    }
    if let Some(m) = report.holdout {
        println!("Holdout: MSE {:.4}, RMSE {:.4}, R² {:.4}", m.mse, m.rmse, m.r2);
    }
    println!("Model saved at '{}'", config.model_path.display());
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let config   = args.common.resolve()?;
    let use_case = PredictUseCase::new(config)?;

    let bounds = if args.no_bounds {
        None
    } else {
        match use_case.feature_bounds() {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!("Input ranges unavailable, using values unchecked: {:#}", e);
                None
            }
        }
    };

    let given: BTreeMap<String, f64> = args.given().into_iter().collect();
    let input = use_case.build_input(&given, bounds.as_ref())?;
    let prediction = use_case.predict(&input)?;

    for name in use_case.feature_names() {
        if let Some(v) = input.get(name) {
            println!("  {name}: {v:.2}");
        }
    }
    println!("Predicted average score: {prediction:.2}");
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    use crate::application::describe_use_case::DescribeUseCase;

    let config = args.common.resolve()?;
    let report = DescribeUseCase::new(config, args.group_columns()).execute()?;
    print_report(&report);
    Ok(())
}

fn print_report(r: &EdaReport) {
    println!("Rows: {}\n", r.rows);

    println!("Descriptive statistics:");
    println!(
        "{:<16} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in &r.summaries {
        println!(
            "{:<16} {:>7} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>9.3}",
            s.name, s.count, s.mean, s.std, s.min, s.q25, s.q50, s.q75, s.max
        );
    }

    if let Some(h) = &r.histogram {
        println!("\nDistribution of average scores:");
        let peak = h.counts.iter().copied().max().unwrap_or(0).max(1);
        for (i, count) in h.counts.iter().enumerate() {
            let bar = "#".repeat(count * 40 / peak);
            println!("  {:>6.1} – {:>6.1} {:>5} {}", h.edges[i], h.edges[i + 1], count, bar);
        }
    }

    for b in &r.breakdowns {
        println!("\nAverage score by {}:", b.column);
        for g in &b.groups {
            println!("  {:<24} {:>5} rows  {:>7.2}", g.group, g.count, g.mean);
        }
    }

    println!("\nCorrelation:");
    print!("{:<16}", "");
    for n in &r.correlation.names {
        print!(" {n:>14}");
    }
    println!();
    for (n, row) in r.correlation.names.iter().zip(&r.correlation.values) {
        print!("{n:<16}");
        for v in row {
            match v {
                Some(v) => print!(" {v:>14.3}"),
                None    => print!(" {:>14}", "-"),
            }
        }
        println!();
    }
}
