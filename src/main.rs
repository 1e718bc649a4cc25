//! ECU Guard - Command line entry point
//!
//! Modes: generate fixtures, train a tree, evaluate a saved model, or run the
//! sliding-window rules over a telemetry stream.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ecu_guard::config::AppConfig;
use ecu_guard::constants::{default_model_path, APP_NAME, APP_VERSION};
use ecu_guard::logic::dataset::{self, load_numbered_records, load_records, read_rows, split_train_test};
use ecu_guard::logic::ecu_rules::ecu_window_detector;
use ecu_guard::logic::features::{EcuRecord, LayoutInfo, FEATURE_LAYOUT};
use ecu_guard::logic::generator::{save_csv, Generator};
use ecu_guard::logic::model::{save_model, DecisionTreeModel, ModelDocument};
use ecu_guard::logic::tree::{render_tree, ConfusionMatrix};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "ecu-guard", version, about = "Vehicle telemetry anomaly detection")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "ECU_GUARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a synthetic labelled dataset
    Generate {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 1600)]
        normal: usize,
        #[arg(long, default_value_t = 400)]
        anomaly: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Train a decision tree and save it
    Train {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        model: Option<PathBuf>,
        #[arg(long)]
        max_depth: Option<usize>,
        #[arg(long)]
        train_ratio: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the trained tree
        #[arg(long)]
        print: bool,
    },
    /// Score a saved model against a labelled dataset
    Evaluate {
        #[arg(long)]
        model: Option<PathBuf>,
        #[arg(long)]
        data: PathBuf,
    },
    /// Run the ECU window rules over a stream file
    Stream {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        window: Option<usize>,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Generate { output, normal, anomaly, seed } => {
            let mut generator = match seed.or(config.seed) {
                Some(seed) => Generator::new(seed),
                None => Generator::from_entropy(),
            };
            let rows = generator.generate(normal, anomaly);
            save_csv(&rows, &output)?;
            println!("Wrote {} rows to {}", rows.len(), output.display());
        }
        Command::Train { data, model, max_depth, train_ratio, seed, print } => {
            if let Some(depth) = max_depth {
                config.max_depth = depth;
            }
            if let Some(ratio) = train_ratio {
                config.train_ratio = ratio;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.validate()?;
            train(&config, &data, &model.unwrap_or_else(default_model_path), print)?;
        }
        Command::Evaluate { model, data } => {
            evaluate(&config, &model.unwrap_or_else(default_model_path), &data)?;
        }
        Command::Stream { data, window } => {
            if let Some(window) = window {
                config.window_size = window;
            }
            config.validate()?;
            stream(&config, &data)?;
        }
    }

    Ok(())
}

fn load_training_data(config: &AppConfig, path: &Path) -> Result<Vec<EcuRecord>, Box<dyn std::error::Error>> {
    let rows = read_rows(BufReader::new(File::open(path)?), true)?;
    Ok(load_records(&rows, EcuRecord::from_training_row, config.load_policy)?)
}

fn print_scores(matrix: &ConfusionMatrix) {
    println!("Accuracy:  {:.2}%", matrix.accuracy());
    println!("Precision: {:.3}", matrix.precision());
    println!("Recall:    {:.3}", matrix.recall());
    println!("F1:        {:.3}", matrix.f1());
}

fn train(config: &AppConfig, data: &Path, model_path: &Path, print: bool) -> CliResult {
    let records = load_training_data(config, data)?;
    log::info!(
        "Loaded {} records ({:.1}% attacks)",
        records.len(),
        dataset::attack_proportion(&records) * 100.0
    );

    let (train, test) = split_train_test(&records, config.train_ratio, &mut config.rng());
    let model = DecisionTreeModel::new(config.tree_builder().build(&train));

    print_scores(&model.confusion(&test));

    let doc = ModelDocument::new(model.root(), &LayoutInfo::current(), config.max_depth, train.len())?;
    save_model(&doc, model_path)?;
    println!("Model saved to {}", model_path.display());

    if print {
        print!("{}", render_tree(model.root(), FEATURE_LAYOUT));
    }
    Ok(())
}

fn evaluate(config: &AppConfig, model_path: &Path, data: &Path) -> CliResult {
    let model = DecisionTreeModel::load(model_path)?;
    let records = load_training_data(config, data)?;

    print_scores(&model.confusion(&records));
    Ok(())
}

fn stream(config: &AppConfig, data: &Path) -> CliResult {
    let rows = read_rows(BufReader::new(File::open(data)?), false)?;
    let records = load_numbered_records(&rows, EcuRecord::from_stream_row, config.load_policy)?;
    let mut detector = ecu_window_detector::<EcuRecord>(config.window_size, config.rule_threshold);

    let mut anomalies = 0usize;
    for (line, record) in records {
        match detector.add_data(record) {
            Ok(true) => {
                println!("has anomaly at line {}", line);
                anomalies += 1;
            }
            Ok(false) => {}
            Err(e) => log::error!("Line {}: {}", line, e),
        }
    }

    if anomalies == 0 {
        println!("no anomaly found");
    } else {
        println!("{} anomalies in {} rows", anomalies, rows.len());
    }
    Ok(())
}
