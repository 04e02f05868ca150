//! Thermoprep: FLIR ADAS thermal dataset preparation.
//!
//! Thermoprep turns the FLIR ADAS release (COCO-style JSON annotations
//! plus 8-bit thermal images) into a single-class "person" YOLO dataset:
//! it materializes image/label pairs, re-splits them with a seeded
//! class-balanced stratified split, reports the positive/negative
//! balance, writes the Ultralytics dataset descriptor, and wraps the
//! external detector training CLIs.
//!
//! # Modules
//!
//! - [`coco`]: COCO JSON reading and per-image annotation indexing
//! - [`bbox`]: pixel XYWH ↔ normalized YOLO box conversion
//! - [`labels`]: YOLO label and prediction file text format
//! - [`materialize`]: COCO → YOLO tree conversion
//! - [`manifest`] / [`split`]: dataset manifest and stratified splitting
//! - [`balance`]: positive/negative balance reporting
//! - [`dataset_yaml`]: Ultralytics dataset descriptor
//! - [`inspect`]: textual ground-truth vs prediction comparison
//! - [`train`]: external training CLI wrappers
//! - [`error`]: error types for thermoprep operations

pub mod balance;
pub mod bbox;
pub mod coco;
pub mod dataset_yaml;
pub mod error;
pub mod inspect;
pub mod labels;
pub mod manifest;
pub mod materialize;
pub mod split;
pub mod train;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use error::ThermoprepError;

/// The thermoprep CLI application.
#[derive(Parser)]
#[command(name = "thermoprep")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert FLIR ADAS COCO annotations into YOLO image/label pairs.
    Convert(ConvertArgs),
    /// Build a class-balanced stratified train/val split.
    Split(SplitArgs),
    /// Report positive/negative balance per split.
    Balance(BalanceArgs),
    /// Write the Ultralytics dataset descriptor YAML.
    WriteYaml(WriteYamlArgs),
    /// Compare ground-truth labels with model predictions for given stems.
    Inspect(InspectArgs),
    /// Invoke an external detector training CLI.
    Train(TrainArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Raw FLIR ADAS root (contains <split>/thermal_annotations.json).
    #[arg(long, default_value = "data/raw/flir_adas")]
    raw_root: PathBuf,

    /// Processed output root.
    #[arg(long, default_value = "data/processed/flir_thermal_person")]
    proc_root: PathBuf,

    /// Raw splits to convert.
    #[arg(long, value_delimiter = ',', default_values_t = vec!["train".to_string(), "val".to_string()])]
    splits: Vec<String>,

    /// COCO category id of the target class.
    #[arg(long, default_value_t = coco::PERSON_CATEGORY_ID)]
    category_id: u64,
}

/// Arguments for the split subcommand.
#[derive(clap::Args)]
struct SplitArgs {
    /// Processed dataset root produced by `convert`.
    #[arg(long, default_value = "data/processed/flir_thermal_person")]
    proc_root: PathBuf,

    /// Output root for the re-balanced split.
    #[arg(long, default_value = "data/processed/flir_thermal_person_fair")]
    out_root: PathBuf,

    /// Train fraction, applied per class with truncating division.
    #[arg(long, default_value_t = split::DEFAULT_SPLIT_RATIO)]
    ratio: f64,

    /// RNG seed; re-runs with the same seed reproduce the split exactly.
    #[arg(long, default_value_t = split::DEFAULT_SEED)]
    seed: u64,

    /// Image file extension paired with each label stem.
    #[arg(long, default_value = "jpeg")]
    image_ext: String,
}

/// Arguments for the balance subcommand.
#[derive(clap::Args)]
struct BalanceArgs {
    /// Processed dataset root to check.
    #[arg(long, default_value = "data/processed/flir_thermal_person_fair")]
    proc_dir: PathBuf,

    /// Splits to report.
    #[arg(long, value_delimiter = ',', default_values_t = vec!["train".to_string(), "val".to_string()])]
    splits: Vec<String>,
}

/// Arguments for the write-yaml subcommand.
#[derive(clap::Args)]
struct WriteYamlArgs {
    /// Dataset root the descriptor points at.
    #[arg(long, default_value = "data/processed/flir_thermal_person")]
    proc_root: PathBuf,

    /// Descriptor file name inside the dataset root.
    #[arg(long, default_value = dataset_yaml::DEFAULT_YAML_NAME)]
    file_name: String,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Image stems to inspect (e.g. FLIR_00355).
    #[arg(required = true)]
    stems: Vec<String>,

    /// Directory of materialized images.
    #[arg(long)]
    images_dir: PathBuf,

    /// Directory of ground-truth label files.
    #[arg(long)]
    labels_dir: PathBuf,

    /// Prediction directory; repeat once per model.
    #[arg(long = "pred-dir")]
    pred_dirs: Vec<PathBuf>,

    /// Image file extension for the dimension probe.
    #[arg(long, default_value = "jpeg")]
    image_ext: String,
}

/// Arguments for the train subcommand.
#[derive(clap::Args)]
struct TrainArgs {
    /// Training backend.
    #[arg(long, value_enum, default_value_t = train::TrainBackend::Yolov8)]
    backend: train::TrainBackend,

    /// Dataset descriptor YAML passed to the trainer.
    #[arg(long, default_value = "data/processed/flir_thermal_person_fair/data_fair.yaml")]
    data: PathBuf,

    /// Model argument; defaults to the backend's standard model.
    #[arg(long)]
    model: Option<String>,

    /// Training epochs.
    #[arg(long, default_value_t = 100)]
    epochs: u32,

    /// Training image size.
    #[arg(long, default_value_t = 640)]
    imgsz: u32,

    /// Results project directory.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Run name inside the project directory.
    #[arg(long, default_value = "exp")]
    name: String,

    /// Print the command without launching the trainer.
    #[arg(long)]
    dry_run: bool,
}

/// Run the thermoprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ThermoprepError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Split(args)) => run_split(args),
        Some(Commands::Balance(args)) => run_balance(args),
        Some(Commands::WriteYaml(args)) => run_write_yaml(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Train(args)) => run_train(args),
        None => {
            println!("thermoprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("FLIR ADAS thermal dataset preparation.");
            println!();
            println!("Run 'thermoprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), ThermoprepError> {
    for split in &args.splits {
        let report =
            materialize::convert_split(split, &args.raw_root, &args.proc_root, args.category_id)?;
        println!("{}", report);
    }
    Ok(())
}

/// Execute the split subcommand.
fn run_split(args: SplitArgs) -> Result<(), ThermoprepError> {
    split::validate_ratio(args.ratio)?;

    let label_dirs = [
        args.proc_root.join("labels/train"),
        args.proc_root.join("labels/val"),
    ];
    let entries = manifest::scan_label_pool(&label_dirs)?;
    if entries.is_empty() {
        println!(
            "No label files found under {}; nothing to split.",
            args.proc_root.display()
        );
    }

    let images = manifest::scan_images(&args.proc_root.join("images"), &args.image_ext);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let (train_lbls, val_lbls) = split::stratified_split(&entries, args.ratio, &mut rng);

    split::copy_split_files(
        &train_lbls,
        &images,
        &args.out_root.join("images/train"),
        &args.out_root.join("labels/train"),
        &args.image_ext,
    )?;
    split::copy_split_files(
        &val_lbls,
        &images,
        &args.out_root.join("images/val"),
        &args.out_root.join("labels/val"),
        &args.image_ext,
    )?;

    // Sizes as selected, before any copy-time loss.
    let report = split::SplitReport {
        train: train_lbls.len(),
        val: val_lbls.len(),
    };
    println!("{}", report);
    Ok(())
}

/// Execute the balance subcommand.
fn run_balance(args: BalanceArgs) -> Result<(), ThermoprepError> {
    for split in &args.splits {
        let label_dir = args.proc_dir.join("labels").join(split);
        let counts = balance::count_pos_neg(&label_dir)?;
        let report = balance::BalanceReport {
            split: split.clone(),
            counts,
        };
        println!("{}", report);
    }
    Ok(())
}

/// Execute the write-yaml subcommand.
fn run_write_yaml(args: WriteYamlArgs) -> Result<(), ThermoprepError> {
    let path = dataset_yaml::write_dataset_yaml(&args.proc_root, &args.file_name)?;
    println!("Wrote: {}", path.display());
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), ThermoprepError> {
    let opts = inspect::InspectOptions {
        images_dir: args.images_dir,
        labels_dir: args.labels_dir,
        pred_dirs: args.pred_dirs,
        image_ext: args.image_ext,
    };
    let report = inspect::inspect_stems(&args.stems, &opts)?;
    print!("{}", report);
    Ok(())
}

/// Execute the train subcommand.
fn run_train(args: TrainArgs) -> Result<(), ThermoprepError> {
    let project = args.project.unwrap_or_else(|| match args.backend {
        train::TrainBackend::Yolov8 => PathBuf::from("results/yolov8n_fair"),
        train::TrainBackend::RtDetr => PathBuf::from("results/flir_person_rtdetr-l"),
    });

    let cfg = train::TrainConfig {
        backend: args.backend,
        data: args.data,
        model: args
            .model
            .unwrap_or_else(|| args.backend.default_model().to_string()),
        epochs: args.epochs,
        imgsz: args.imgsz,
        project,
        name: args.name,
    };

    if args.dry_run {
        let (program, cmd_args) = train::build_command(&cfg);
        println!("Running: {}", train::render_command(&program, &cmd_args));
        return Ok(());
    }

    train::run_training(&cfg)
}
