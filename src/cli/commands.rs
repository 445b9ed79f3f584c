// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `init`, `train` and `score`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{
    init_use_case::InitConfig,
    score_use_case::ScoreConfig,
    train_use_case::{parse_epochs, TrainConfig},
};
use crate::domain::error::PipelineError;
use crate::ml::backend::DeviceKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a freshly initialised checkpoint to start training from
    Init(InitArgs),

    /// Continue training the checkpoint on a question-pair CSV file
    Train(TrainArgs),

    /// Score one question pair with the saved checkpoint
    Score(ScoreArgs),
}

/// Compute device for the model
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DeviceArg {
    /// ndarray backend on the CPU
    Cpu,
    /// wgpu backend on the default GPU adapter
    Gpu,
}

impl From<DeviceArg> for DeviceKind {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu => DeviceKind::Cpu,
            DeviceArg::Gpu => DeviceKind::Gpu,
        }
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the checkpoint into
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Seed for the weight initialiser
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Replace an existing checkpoint
    #[arg(long)]
    pub force: bool,
}

impl From<InitArgs> for InitConfig {
    fn from(a: InitArgs) -> Self {
        InitConfig {
            checkpoint_dir: a.checkpoint_dir,
            seed:           a.seed,
            force:          a.force,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with question1, question2 and is_duplicate columns
    #[arg(long, default_value = "questions.csv")]
    pub input: String,

    /// Directory holding model.mpk.gz (created by `init`)
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of full passes over the data; asked on stdin when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub epochs: Option<String>,

    /// Number of pairs per optimiser step
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.005)]
    pub lr: f64,

    /// Seed of the per-epoch shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = DeviceArg::Gpu)]
    pub device: DeviceArg,
}

/// The epoch flag is a raw string so that "0", "-1" and "ten" all
/// surface as InvalidArgument instead of a clap usage error.
impl TryFrom<TrainArgs> for TrainConfig {
    type Error = PipelineError;

    fn try_from(a: TrainArgs) -> Result<Self, Self::Error> {
        let config = TrainConfig {
            input_path:     a.input,
            checkpoint_dir: a.checkpoint_dir,
            epochs:         a.epochs.as_deref().map(parse_epochs).transpose()?,
            batch_size:     a.batch_size,
            lr:             a.lr,
            seed:           a.seed,
            device:         a.device.into(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// First question
    #[arg(long)]
    pub question1: String,

    /// Second question
    #[arg(long)]
    pub question2: String,

    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    #[arg(long, value_enum, default_value_t = DeviceArg::Gpu)]
    pub device: DeviceArg,
}

impl From<&ScoreArgs> for ScoreConfig {
    fn from(a: &ScoreArgs) -> Self {
        ScoreConfig {
            checkpoint_dir: a.checkpoint_dir.clone(),
            device:         a.device.into(),
        }
    }
}
