use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use jira_release_notes::boundary::RunReporter;
use jira_release_notes::handler::{self, Response};
use jira_release_notes::services::LiveServices;
use jira_release_notes::{config, logging, ui};

#[derive(Parser)]
#[command(
    name = "jira-release-notes",
    version,
    about = "Publish release notes built from git tags and Jira tickets"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Log level or filter directive")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build release notes between two tags and publish them
    Generate {
        #[arg(short, long, help = "Event JSON file (reads stdin when omitted)")]
        event: Option<PathBuf>,

        #[arg(long, help = "Read commits and tags from a local clone")]
        repo_path: Option<PathBuf>,
    },
    /// Mark a Jira release version as released today
    CloseVersion {
        #[arg(short, long, help = "Event JSON file (reads stdin when omitted)")]
        event: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    logging::init_logging(&config.logging, args.log_level.as_deref());

    let response = match args.command {
        Command::Generate { event, repo_path } => {
            let raw = read_event(event.as_ref())?;
            let services = LiveServices::new(config.clone(), repo_path);
            let reporter = RunReporter::new();

            ui::display_status("Building release notes...");
            let response = handler::create_release_notes(raw, &config, &services, &reporter);

            for warning in reporter.warnings() {
                ui::display_boundary_warning(&warning);
            }
            ui::display_response("Release notes published", &response);
            response
        }
        Command::CloseVersion { event } => {
            let raw = read_event(event.as_ref())?;
            let services = LiveServices::new(config.clone(), None);

            let response = handler::mark_version_released(raw, &config, &services);
            ui::display_response("Release version closed", &response);
            response
        }
    };

    print_response(&response)?;
    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_event(path: Option<&PathBuf>) -> Result<Value> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&text).context("event is not valid JSON")
}

fn print_response(response: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(response)?);
    Ok(())
}
