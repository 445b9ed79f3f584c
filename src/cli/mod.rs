// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `init`  — write a fresh checkpoint
//   2. `train` — continue training it on a CSV of question pairs
//   3. `score` — score one pair with the saved checkpoint
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InitArgs, ScoreArgs, TrainArgs};
use std::io::{self, Write};

use crate::application::{
    init_use_case::InitUseCase,
    score_use_case::{ScoreConfig, ScoreUseCase},
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::domain::error::PipelineError;
use crate::domain::traits::DuplicateScorer;
use crate::ml::backend::{CpuBackend, DeviceKind, GpuBackend};

#[derive(Parser, Debug)]
#[command(
    name = "question-twin",
    version = "0.1.0",
    about = "Train a twin-network duplicate-question classifier on hashed word embeddings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init(args)  => run_init(args),
            Commands::Train(args) => run_train(args),
            Commands::Score(args) => run_score(args),
        }
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let path = InitUseCase::new(args.into()).execute()?;
    println!("Initial model written to {}", path.display());
    Ok(())
}

/// A missing checkpoint ends the run quietly: nothing is trained
/// and the exit status stays 0.
fn run_train(args: TrainArgs) -> Result<()> {
    let config = TrainConfig::try_from(args)?;
    tracing::info!("Starting training on '{}'", config.input_path);

    let stdout  = io::stdout();
    let mut out = stdout.lock();

    match TrainUseCase::new(config).execute(&mut out) {
        Ok(report) => {
            tracing::info!(
                "Finished {} epochs, final loss {:.4}, weights in '{}'",
                report.history.len(),
                report.final_loss().unwrap_or(f64::NAN),
                report.checkpoint.display()
            );
            Ok(())
        }
        Err(e) if e
            .downcast_ref::<PipelineError>()
            .is_some_and(PipelineError::is_missing_checkpoint) =>
        {
            writeln!(out, "No saved model file found")?;
            tracing::warn!("{e} (run `init` to create one)");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let config = ScoreConfig::from(&args);

    let p = match config.device {
        DeviceKind::Cpu => ScoreUseCase::<CpuBackend>::new(&config, DeviceKind::cpu_device())?
            .score(&args.question1, &args.question2)?,
        DeviceKind::Gpu => ScoreUseCase::<GpuBackend>::new(&config, DeviceKind::gpu_device())?
            .score(&args.question1, &args.question2)?,
    };

    println!("Duplicate probability: {:.4}", p);
    Ok(())
}
