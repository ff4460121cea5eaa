//! IPTV Source Benchmark - Main CLI Application
//!
//! Tests each source behind the IPTV proxy in turn and reports playlist
//! latency, connection time and sustained bitrate.

use clap::Parser;
use iptv_source_bench::{
    cli::Cli,
    client::ProxyClient,
    config::{display_config_summary, load_config, EnvManager},
    error::{AppError, ErrorReporter, Result},
    executor::{BenchmarkRunner, ExecutionConfig},
    logging::LoggerFactory,
    models::Config,
    output::{OutputCoordinator, OutputFormatterFactory},
    PKG_NAME, VERSION,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();
    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    let config = match prepare(cli) {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => exit_with(&reporter, &e),
    };

    let reporter = ErrorReporter::from_config(&config);
    if let Err(e) = run_benchmark(config).await {
        exit_with(&reporter, &e);
    }
}

fn exit_with(reporter: &ErrorReporter, error: &AppError) -> ! {
    reporter.report_error(error);
    process::exit(error.exit_code());
}

/// Handle the one-shot flags, then resolve the configuration
fn prepare(cli: Cli) -> Result<Option<Config>> {
    if cli.env_help {
        println!("{}", EnvManager::display_env_help());
        return Ok(None);
    }

    if let Some(path) = &cli.init_env {
        EnvManager::save_example_env_file(path)?;
        println!("Wrote example configuration to {}", path.display());
        return Ok(None);
    }

    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Built: {}", env!("BUILD_TIME"));
        if let Some(commit) = option_env!("GIT_COMMIT") {
            println!("Commit: {}", commit);
        }
        println!("Debug mode enabled");
        println!("{}", cli.get_config_summary());
    }

    let config = load_config(cli)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        println!("{}", display_config_summary(&config));
        println!();
    }

    Ok(Some(config))
}

/// Run every source once
async fn run_benchmark(config: Config) -> Result<()> {
    if !config.enable_color {
        colored::control::set_override(false);
    }

    let factory = LoggerFactory::new(config.clone());
    let logger = factory.create_logger("RUN").await;
    logger.add_context_field("proxy".to_string(), &config.proxy_url).await;

    let execution = ExecutionConfig::from(&config);
    let client = ProxyClient::new(&execution)?.with_logger(factory.create_network_logger().await);

    let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
    let coordinator = OutputCoordinator::new(formatter);

    let runner = BenchmarkRunner::new(execution, Arc::new(client), Arc::new(coordinator))
        .with_logger(logger);
    runner.run().await;

    Ok(())
}
