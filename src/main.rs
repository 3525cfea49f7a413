use clap::Parser;
use hotel_popularity::app::display::{
    render_entries, render_holdout, render_load_error, render_rejected, render_report,
};
use hotel_popularity::app::form::{parse_entry_arg, run_form, submit_and_report};
use hotel_popularity::core::classifier::evaluate_holdout;
use hotel_popularity::core::export::export_report;
use hotel_popularity::core::ConfigProvider;
use hotel_popularity::utils::error::ErrorSeverity;
use hotel_popularity::utils::{logger, validation::Validate};
use hotel_popularity::{CliConfig, ListingEngine, ListingPipeline, LocalStorage, SessionState};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hotel-popularity");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = ListingPipeline::new(storage, config);
    let engine = ListingEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = match engine.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "❌ Dataset load failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", render_load_error(&e.load_error()));
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    println!("{}", render_report(&outcome.report));

    let config = engine.pipeline().config();

    if let Some(settings) = config.classifier() {
        match evaluate_holdout(&outcome.catalog.listings, &settings) {
            Ok(holdout) => println!("{}\n", render_holdout(&holdout)),
            Err(e) => {
                tracing::warn!("Classifier evaluation skipped: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
            }
        }
    }

    // One session per run; it ends when the process exits.
    let rules = config.entry_rules();
    let mut session = SessionState::new();
    let mut stdout = std::io::stdout();

    for raw in &cli.entries {
        match parse_entry_arg(raw) {
            Ok(form) => {
                submit_and_report(&mut stdout, &mut session, form, &rules)?;
            }
            Err(e) => println!("{}", render_rejected(&e.to_string())),
        }
    }

    if cli.interactive {
        let mut input = std::io::stdin().lock();
        run_form(&mut input, &mut stdout, &mut session, &rules)?;
    }

    if !session.is_empty() {
        print!("{}", render_entries(session.entries()));

        if let Some(dir) = config.export_path() {
            let combined = session.combined_with(&outcome.catalog.listings);
            export_report(engine.pipeline().storage(), dir, &outcome.report, &combined).await?;
        }
    }

    Ok(())
}
