// reset; cargo run -- ./claims/2024-01_tanaka.xlsx ./claims/2024-01_suzuki.xlsx
// reset; cargo run -- --config commute.toml --status problem --csv-dir ./out ./claims/*.xlsx

use clap::{Parser, ValueEnum};
use commute_lib::{
    CommuteValidator, FileOutcome, ValidationConfig, Verdict, accept_workbook_paths,
    display::{export_to_csv, filter_by_status, render_table},
    utils::logger::init_cli_logger,
    validate_files,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusFilter {
    Ok,
    Attention,
    Problem,
}

impl From<StatusFilter> for Verdict {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Ok => Verdict::Acceptable,
            StatusFilter::Attention => Verdict::Attention,
            StatusFilter::Problem => Verdict::Problem,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "commute-checker")]
#[command(about = "A tool to check commuting cost claims in Excel files")]
#[command(version)]
struct Args {
    /// Claim workbooks (.xlsx / .xls). Other files and repeated file names are ignored.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML file overriding columns, commuting marker, coverage ratio and amount bounds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Optional sheet name to read (if not specified, reads the first sheet)
    #[arg(long)]
    sheet_name: Option<String>,

    /// Only show files with this status
    #[arg(long, value_enum)]
    status: Option<StatusFilter>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Directory to write one CSV of extracted rows per readable file
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let arguments = Args::parse();
    init_cli_logger(arguments.verbose);

    let mut config = match &arguments.config {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::default(),
    };
    if arguments.sheet_name.is_some() {
        config.sheet_name = arguments.sheet_name.clone();
    }
    let epoch_offset_days = config.date_epoch_offset_days;
    let errors_log = config.errors_log.clone();
    let validator = CommuteValidator::new(config)?;

    let paths = accept_workbook_paths(arguments.files.iter().cloned());
    if paths.is_empty() {
        anyhow::bail!("No .xlsx or .xls files were given");
    }
    tracing::info!(files = paths.len(), "validating claim files");

    let outcomes = validate_files(&paths, &validator);

    if let Some(csv_dir) = &arguments.csv_dir {
        std::fs::create_dir_all(csv_dir)?;
        for result in outcomes.iter().filter_map(FileOutcome::result) {
            let csv_path = csv_dir.join(result.name()).with_extension("csv");
            export_to_csv(result, &csv_path, epoch_offset_days)?;
            println!("✅ CSV file created: {}", csv_path.display());
        }
    }

    let shown: Vec<&FileOutcome> = match arguments.status {
        Some(status) => filter_by_status(&outcomes, status.into()),
        None => outcomes.iter().collect(),
    };

    if arguments.json {
        let results: Vec<serde_json::Value> = shown
            .iter()
            .map(|outcome| match outcome {
                FileOutcome::Validated(result) => serde_json::to_value(result),
                FileOutcome::Unreadable { name, error } => Ok(serde_json::json!({
                    "name": name,
                    "error": error.to_string(),
                })),
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for outcome in &shown {
            match outcome {
                FileOutcome::Validated(result) => {
                    println!("{}", render_table(result, epoch_offset_days));
                    for finding in result.findings() {
                        println!("  - {finding}");
                    }
                }
                FileOutcome::Unreadable { error, .. } => {
                    eprintln!("❌ {error}");
                }
            }
        }
    }

    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.status() != Some(Verdict::Acceptable))
        .count();
    if failed == 0 {
        println!("✅ Validation completed!");
    } else {
        println!("❌ {} of {} files need review", failed, outcomes.len());
        if let Some(log_path) = errors_log {
            eprintln!("❌ Check {} for details.", log_path.display());
        }
        std::process::exit(1);
    }

    Ok(())
}
