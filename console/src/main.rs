//! GraphFlow Workload Console - Entry Point
//!
//! Generates workload-definition documents for model-serving jobs and
//! walks the intake -> confirm -> submit flow against the cluster
//! scheduler.

use std::collections::HashMap;
use std::env;

use gfconsole::config::Settings;
use gfconsole::errors::ConsoleError;
use gfconsole::flow::confirm::{ConfirmEntry, ConfirmScreen};
use gfconsole::flow::intake;
use gfconsole::handoff::FileCarrier;
use gfconsole::logs::{init_logging, LogOptions};
use gfconsole::models::request::DeploymentRequest;
use gfconsole::scheduler::client::SchedulerClient;
use gfconsole::utils::version_info;

use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info()).unwrap());
        return;
    }

    // Retrieve the settings file
    let config_path = cli_args
        .get("config")
        .cloned()
        .unwrap_or_else(|| "gfconsole.json".to_string());
    let settings = match Settings::load(&config_path).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file {}: {}", config_path, e);
            return;
        }
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let result = if cli_args.contains_key("generate") {
        run_generate(&cli_args)
    } else if cli_args.contains_key("intake") {
        run_intake(&cli_args, &settings).await
    } else if cli_args.contains_key("confirm") {
        run_confirm(&cli_args, &settings).await
    } else {
        print_usage();
        Ok(())
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("gfconsole - GraphFlow workload console");
    println!();
    println!("Usage:");
    println!("  gfconsole --generate <fields>          validate and print a workload definition");
    println!("  gfconsole --intake <fields>            validate and hand off a deployment request");
    println!("  gfconsole --confirm [--submit]         compile the pending request, optionally submit");
    println!("  gfconsole --version                    print version info");
    println!();
    println!("Fields:");
    println!("  --module-name= --op-type= --model-path= --model-md5= --model-count=");
    println!("  --prefetch= --model-concurrency= --logic-worker-num=");
    println!("  --deploy-ip= --extra-env=              (optional)");
    println!();
    println!("Common flags: --config=<path> --namespace=<ns>");
}

/// Build a deployment request from CLI field flags
fn request_from_args(cli_args: &HashMap<String, String>) -> DeploymentRequest {
    let field = |key: &str| cli_args.get(key).cloned().unwrap_or_default();
    DeploymentRequest {
        module_name: field("module-name"),
        op_type: field("op-type"),
        model_path: field("model-path"),
        model_md5: field("model-md5"),
        model_count: field("model-count"),
        prefetch: field("prefetch"),
        model_concurrency: field("model-concurrency"),
        deploy_ip: field("deploy-ip"),
        samosa_logic_worker_num: field("logic-worker-num"),
        extra_env: field("extra-env"),
    }
}

/// Offline mode: validate the request and print the compiled definition
fn run_generate(cli_args: &HashMap<String, String>) -> Result<(), ConsoleError> {
    let request = request_from_args(cli_args);
    gfconsole::models::request::validate(&request)?;
    print!("{}", gfconsole::compile::compile(&request));
    Ok(())
}

/// Intake screen: validate and write the request to the handoff carrier
async fn run_intake(
    cli_args: &HashMap<String, String>,
    settings: &Settings,
) -> Result<(), ConsoleError> {
    let carrier = FileCarrier::new(settings.carrier_path.clone());
    let request = request_from_args(cli_args);
    let navigation = intake::submit(&carrier, &request).await?;
    println!("Request handed off; next: {}", navigation);
    Ok(())
}

/// Confirm screen: compile the pending request and optionally submit it
async fn run_confirm(
    cli_args: &HashMap<String, String>,
    settings: &Settings,
) -> Result<(), ConsoleError> {
    let carrier = FileCarrier::new(settings.carrier_path.clone());
    let client = SchedulerClient::new(
        &settings.scheduler.base_url,
        settings.scheduler.acl_token.clone(),
    )?;
    let namespace = cli_args
        .get("namespace")
        .cloned()
        .unwrap_or_else(|| settings.scheduler.namespace.clone());

    let screen = ConfirmScreen::new();
    let visit = screen.begin_visit().await;
    let entry = match screen
        .enter(&client, &carrier, Some(namespace.as_str()), visit)
        .await
    {
        Ok(entry) => entry,
        // Recoverable aborts map to a safe screen instead of a failure
        Err(ConsoleError::AuthorizationDenied(reason)) => {
            println!("{}; redirecting to: {}", reason, gfconsole::flow::Navigation::JobList);
            return Ok(());
        }
        Err(ConsoleError::HandoffCorrupt(reason)) => {
            println!(
                "Handoff unreadable ({}); return to: {}",
                reason,
                gfconsole::flow::Navigation::Intake
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let mut draft = match entry {
        ConfirmEntry::Ready(draft) => draft,
        ConfirmEntry::NoPendingRequest => {
            println!("No pending deployment request; run --intake first");
            return Ok(());
        }
    };

    println!("{}", draft.spec().unwrap_or_default());

    if cli_args.contains_key("submit") {
        let navigation = screen
            .submit_draft(&client, &mut draft, Some(namespace.as_str()))
            .await?;
        println!("Submitted; next: {}", navigation);
    } else {
        screen.leave(&mut draft).await;
        println!("Draft discarded (pass --submit to submit)");
    }

    Ok(())
}
