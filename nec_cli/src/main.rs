//! # NEC Calculator CLI
//!
//! Runs box fill, conduit fill and dwelling load calculations from JSON
//! records, or every calculation in a saved project, and prints a report.
//!
//! ```text
//! nec_cli box-fill j1.json
//! cat feeder.json | nec_cli --json conduit-fill
//! RUST_LOG=nec_core=debug nec_cli project job.json
//! ```

mod report;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use nec_core::calculations::{box_fill, conduit_fill, dwelling_load};
use nec_core::calculations::{BoxFillInput, ConduitFillInput, DwellingLoadInput};
use nec_core::{CalcError, GlobalSettings, Project};

/// NEC box fill, conduit fill and dwelling load calculator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print JSON results instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a box against NEC 314.16
    BoxFill {
        /// JSON input file; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },
    /// Check raceway fill against NEC Chapter 9
    ConduitFill {
        /// JSON input file; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },
    /// Size a dwelling service per NEC Article 220
    DwellingLoad {
        /// JSON input file; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },
    /// Run every calculation in a saved project
    Project {
        /// Project file; reads stdin when omitted or "-"
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = GlobalSettings::default();

    match cli.command {
        Commands::BoxFill { input } => {
            let input: BoxFillInput = read_record(input.as_ref())?;
            let result = box_fill::calculate(&input).map_err(|e| calc_failure(e, cli.json))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::box_fill(&result, &settings);
            }
        }
        Commands::ConduitFill { input } => {
            let input: ConduitFillInput = read_record(input.as_ref())?;
            let result = conduit_fill::calculate(&input).map_err(|e| calc_failure(e, cli.json))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::conduit_fill(&result, &settings);
            }
        }
        Commands::DwellingLoad { input } => {
            let input: DwellingLoadInput = read_record(input.as_ref())?;
            let result = dwelling_load::calculate(&input).map_err(|e| calc_failure(e, cli.json))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::dwelling_load(&result, &settings);
            }
        }
        Commands::Project { input } => {
            let contents = read_source(input.as_ref())?;
            let project = Project::from_json(&contents).context("Failed to load project")?;
            run_project(&project, cli.json)?;
        }
    }

    Ok(())
}

fn run_project(project: &Project, json: bool) -> Result<()> {
    tracing::info!(items = project.item_count(), job = %project.meta.job_id, "running project");
    let results = project.run_all();

    if json {
        let entries: Vec<_> = results
            .iter()
            .map(|(id, result)| match result {
                Ok(output) => serde_json::json!({ "id": id, "result": output }),
                Err(err) => serde_json::json!({ "id": id, "error": err, "code": err.error_code() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    report::project_header(project);
    for (id, result) in &results {
        let label = project.get_item(id).map(|item| item.label()).unwrap_or_default();
        match result {
            Ok(output) => report::output(output, &project.settings),
            Err(err) => report::failure(label, err),
        }
    }
    report::project_summary(&results);
    Ok(())
}

/// Print a calculation error the way the caller asked for, then hand it to anyhow.
fn calc_failure(err: CalcError, json: bool) -> anyhow::Error {
    if json {
        if let Ok(body) = serde_json::to_string_pretty(&err) {
            eprintln!("{}", body);
        }
    }
    anyhow::Error::new(err).context("Calculation failed")
}

fn read_record<T: DeserializeOwned>(path: Option<&PathBuf>) -> Result<T> {
    let contents = read_source(path)?;
    serde_json::from_str(&contents).context("Input is not a valid calculation record")
}

fn read_source(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut contents = String::new();
            std::io::stdin()
                .read_to_string(&mut contents)
                .context("Failed to read stdin")?;
            Ok(contents)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["nec_cli", "--json", "box-fill", "j1.json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::BoxFill { input: Some(ref p) } if p == &PathBuf::from("j1.json")));

        let cli = Cli::parse_from(["nec_cli", "dwelling-load"]);
        assert!(!cli.json);
        assert!(matches!(cli.command, Commands::DwellingLoad { input: None }));

        let cli = Cli::parse_from(["nec_cli", "project", "-", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn test_read_record_from_file() {
        let path = std::env::temp_dir().join(format!("nec_cli_box_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "label": "J-1", "box_volume_in3": 18.0, "components": [] }"#).unwrap();
        let input: BoxFillInput = read_record(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(input.label, "J-1");
    }

    #[test]
    fn test_missing_file_has_context() {
        let path = PathBuf::from("/nonexistent/nec_cli/input.json");
        let err = read_record::<BoxFillInput>(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
