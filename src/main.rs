use clap::Parser;
use gem_pricer::core::ConfigProvider;
use gem_pricer::utils::error::ErrorSeverity;
use gem_pricer::utils::{logger, validation::{validate_socket_addr, Validate}};
use gem_pricer::{CliConfig, PricerError, PricingService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gem-pricer v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let addr = validate_socket_addr("server.bind", config.bind_address())?;

    let service = match PricingService::bootstrap(&config).await {
        Ok(service) => service,
        Err(e) => exit_with(e),
    };

    let summary = service.summary();
    tracing::info!(
        "✅ Model ready ({} trees over {} features), {} reference rows",
        summary.model.n_estimators,
        summary.model.features,
        summary.reference_rows
    );

    gem_pricer::server::start_server(addr, Arc::new(service)).await?;
    Ok(())
}

fn exit_with(e: PricerError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2, // network or data, worth a retry
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
