//! swassign CLI - Auto-assign switch container children by name matching
//!
//! Connects to a running Wwise instance over WAAPI, scores every child of the
//! targeted switch containers against the switches of their group, assigns
//! the best matches, and asks before overwriting assignments that disagree
//! with the computed expectation.

use clap::{Parser, ValueEnum};
use dialoguer::Confirm;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use swassign::config::UserConfig;
use swassign::core::{order_for_report, AssignTask, ContainerRun, NameBook, Strategy};
use swassign::report::{report_summary, report_task, run_matrix_text, ConsoleReporter, Reporter};
use swassign::waapi::{ObjectKind, WaapiClient, DEFAULT_WAAPI_URL};
use tracing::{debug, error, info};

/// Auto-assign switch container children to switches by name matching
#[derive(Parser)]
#[command(name = "swassign-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root path, checked against the project WAAPI is connected to
    #[arg(long)]
    project_root: PathBuf,

    /// Object ID to handle
    #[arg(long)]
    object_id: String,

    /// Method to match switch and child names
    #[arg(long, value_enum, default_value = "tfidf")]
    match_method: MatchMethod,

    /// Also handle descendant switch containers
    #[arg(long)]
    recursive: bool,

    /// User config file path
    #[arg(long)]
    user_config: PathBuf,

    /// WAAPI HTTP endpoint
    #[arg(long, default_value = DEFAULT_WAAPI_URL)]
    waapi_url: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Name-matching method choices
#[derive(Clone, Copy, ValueEnum)]
enum MatchMethod {
    /// Frequency-weighted word overlap
    Tfidf,
    /// Edit distance over raw names
    Levenshtein,
    /// Strict word inclusion
    Inclusion,
}

impl From<MatchMethod> for Strategy {
    fn from(method: MatchMethod) -> Self {
        match method {
            MatchMethod::Tfidf => Strategy::Tfidf,
            MatchMethod::Levenshtein => Strategy::Levenshtein,
            MatchMethod::Inclusion => Strategy::Inclusion,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = Strategy::from(cli.match_method);

    info!(path = %cli.user_config.display(), "Loading user config");
    let config = UserConfig::load(&cli.user_config)?;
    // Save back so files from older versions pick up new keys.
    config.save(&cli.user_config)?;

    info!(url = %cli.waapi_url, "Connecting to WAAPI");
    let mut client = WaapiClient::connect(&cli.waapi_url)?;

    // Refuse to touch a different project than the caller expects.
    let project = client.project_info()?;
    if normalized(&cli.project_root) != normalized(Path::new(&project.directories.root)) {
        return Err(format!(
            "Project root not match. WAAPI is connected to: {}",
            project.directories.root
        )
        .into());
    }
    info!(root = %project.directories.root, project = %project.name, "WAAPI project verified");

    let containers = collect_containers(&client, &cli.object_id, cli.recursive)?;
    info!(count = containers.len(), "Start handling switch containers");

    let mut reporter = ConsoleReporter;
    let mut finished: Vec<ContainerRun> = Vec::new();

    for container in containers {
        info!(container = %container.name, "Handling switch container");
        let mut run = ContainerRun::prepare(&mut client, container, &config, strategy);

        if let Some(matrix) = run_matrix_text(&run) {
            reporter.result(&format!("Matching matrix:\n{}", matrix));
        }

        run.reconcile(&mut client);
        for task in order_for_report(&run.tasks) {
            report_task(&mut reporter, &run.names, task);
        }

        let conflicts = run.conflict_count();
        if conflicts > 0 {
            reporter.warn(&format!(
                "Found {} unexpected assignments. Overwrite them?",
                conflicts
            ));
            let overwrite = Confirm::new()
                .with_prompt("Overwrite unexpected assignments")
                .default(false)
                .interact()
                .unwrap_or(false);
            if overwrite {
                run.reconcile_overwrite(&mut client);
            } else {
                debug!(container = %run.context.container.name, "Overwrite declined");
            }
        }

        finished.push(run);
    }

    // Global outcome list across all containers, best statuses first.
    info!("Print all assign results");
    let mut outcome: Vec<(&NameBook, &AssignTask)> = finished
        .iter()
        .flat_map(|run| run.tasks.iter().map(move |task| (&run.names, task)))
        .collect();
    outcome.sort_by(|a, b| b.1.status.cmp(&a.1.status));
    for (names, task) in &outcome {
        report_task(&mut reporter, names, task);
    }
    report_summary(&mut reporter, outcome.iter().map(|(_, task)| *task));

    Ok(())
}

/// Resolve the root object and, when recursive, every descendant switch
/// container.
fn collect_containers(
    client: &WaapiClient,
    object_id: &str,
    recursive: bool,
) -> Result<Vec<swassign::WwiseObject>, Box<dyn std::error::Error>> {
    let waql = format!("from project where id = \"{}\"", object_id);
    let roots = client.query_waql(&waql)?;
    let Some(root) = roots.into_iter().next() else {
        return Err(format!("Object {} not found", object_id).into());
    };

    let mut containers = Vec::new();
    if root.kind == ObjectKind::SwitchContainer {
        debug!(container = %root.name, "Collect root switch container");
        containers.push(root);
    }
    if recursive {
        let waql = format!(
            "from object \"{}\" select descendants where type = \"SwitchContainer\"",
            object_id
        );
        for descendant in client.query_waql(&waql)? {
            debug!(container = %descendant.name, "Collect descendant switch container");
            containers.push(descendant);
        }
    }
    Ok(containers)
}

/// Component-wise path normalization for the project-root comparison.
fn normalized(path: &Path) -> PathBuf {
    path.components().collect()
}
