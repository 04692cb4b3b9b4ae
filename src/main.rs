use anyhow::Context;
use clap::Parser;
use einvoice_fetch::app;
use einvoice_fetch::core::ConfigProvider;
use einvoice_fetch::utils::logger;
use einvoice_fetch::utils::validation::Validate;
use einvoice_fetch::{CliConfig, FetchError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // init logging
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting einvoice-fetch");

    // a TOML file, when given, replaces flags and environment
    match args.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => execute(&config, &args).await,
                Err(e) => abort(e),
            }
        }
        None => execute(&args, &args).await,
    }
}

async fn execute<C: ConfigProvider + Validate>(config: &C, args: &CliConfig) -> anyhow::Result<()> {
    // credentials and sec file are checked before any network activity
    let identifiers = match app::preflight(config) {
        Ok(identifiers) => identifiers,
        Err(e) => abort(e),
    };
    tracing::info!("{} identifiers loaded from {}", identifiers.len(), config.sec_file());

    // dry run: show the requests only
    if args.dry_run {
        tracing::info!("DRY RUN MODE - no requests will be sent");
        let urls = match app::dry_run_urls(config, &identifiers) {
            Ok(urls) => urls,
            Err(e) => abort(e),
        };
        for (identifier, url) in identifiers.iter().zip(urls) {
            println!("{} -> GET {}", identifier, url);
        }
        return Ok(());
    }

    // per-identifier failures are already counted in the summary
    let summary = match app::fetch_all(config, &identifiers).await {
        Ok(summary) => summary,
        Err(e) => abort(e),
    };

    // optional JSON report
    if let Some(report) = args.report.as_deref() {
        app::write_report(report, &summary)
            .with_context(|| format!("failed to write run report to {}", report))?;
        tracing::info!("Run report written to {}", report);
    }

    Ok(())
}

fn abort(e: FetchError) -> ! {
    tracing::error!("Aborting: {}", e);
    tracing::error!("Suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e);
    std::process::exit(1);
}
