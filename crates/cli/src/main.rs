use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookplate_batch::driver::Generator;
use bookplate_core::config::BatchConfig;
use bookplate_core::id::ImageId;
use bookplate_core::prompts::PromptTable;

fn cli() -> Command {
    Command::new("bookplate")
        .about("Batch-generate book illustrations through a local ComfyUI server")
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("ComfyUI base URL (overrides COMFYUI_URL)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for generated images (overrides OUTPUT_DIR)"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Per-job polling deadline (overrides POLL_TIMEOUT_SECS)"),
        )
        .arg(
            Arg::new("interval-secs")
                .long("interval-secs")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Sleep between history checks (overrides POLL_INTERVAL_SECS)"),
        )
        .arg(
            Arg::new("delay-secs")
                .long("delay-secs")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Pause between batch entries (overrides INTER_JOB_DELAY_SECS)"),
        )
        .arg(
            Arg::new("prompts")
                .long("prompts")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("JSON prompt table to use instead of the built-in one"),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .value_name("IDS")
                .help("Comma-separated identifiers to (re)generate, e.g. 1,2,og"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .help("Fixed sampler seed for reproducible output"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Print the prompt table and exit"),
        )
}

/// Apply CLI flag overrides on top of the environment-derived config.
fn apply_overrides(mut config: BatchConfig, matches: &ArgMatches) -> BatchConfig {
    if let Some(url) = matches.get_one::<String>("url") {
        config.server_url = url.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config.output_dir = dir.clone();
    }
    if let Some(&secs) = matches.get_one::<u64>("timeout-secs") {
        config.poll_timeout = Duration::from_secs(secs);
    }
    if let Some(&secs) = matches.get_one::<u64>("interval-secs") {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(&secs) = matches.get_one::<u64>("delay-secs") {
        config.inter_job_delay = Duration::from_secs(secs);
    }
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = cli().get_matches();
    let config = apply_overrides(BatchConfig::from_env(), &matches);

    let table = match matches.get_one::<PathBuf>("prompts") {
        Some(path) => match PromptTable::load(path) {
            Ok(table) => table,
            Err(error) => {
                tracing::error!(path = %path.display(), %error, "Cannot load prompt table");
                return ExitCode::FAILURE;
            }
        },
        None => PromptTable::builtin(),
    };

    let table = match matches.get_one::<String>("only") {
        Some(raw) => {
            let ids: Vec<ImageId> = raw.split(',').map(str::trim).map(ImageId::parse).collect();
            if let Some(unknown) = ids.iter().find(|id| !table.contains(id)) {
                tracing::error!(id = %unknown, "Identifier not present in the prompt table");
                return ExitCode::FAILURE;
            }
            table.filter(&ids)
        }
        None => table,
    };

    if matches.get_flag("list") {
        for entry in &table {
            println!("{}: {}", entry.id, entry.text);
        }
        return ExitCode::SUCCESS;
    }

    let seed = matches.get_one::<i64>("seed").copied();

    tracing::info!(
        server_url = %config.server_url,
        output_dir = %config.output_dir.display(),
        total = table.len(),
        "Starting illustration batch",
    );

    let generator = Generator::new(config);

    // Connectivity check: the only failure fatal to the whole run.
    match generator.api().system_stats().await {
        Ok(stats) => {
            tracing::info!(
                comfyui_version = %stats.system.comfyui_version,
                pytorch_version = %stats.system.pytorch_version,
                "Connected to ComfyUI",
            );
        }
        Err(error) => {
            tracing::error!(
                server_url = %generator.api().api_url(),
                %error,
                "Cannot reach ComfyUI",
            );
            return ExitCode::FAILURE;
        }
    }

    let report = generator.run(&table, seed).await;

    for (id, error) in report.failed() {
        tracing::error!(%id, %error, "Failed entry");
    }
    tracing::info!(
        generated = report.succeeded().len(),
        failed = report.failed().len(),
        attempted = report.attempted(),
        "Batch complete",
    );

    // Partial failure exits nonzero so CI invocations notice.
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
