use clap::Parser;
use date_planner::app::planner::{build_session, collect_input};
use date_planner::utils::error::PlanError;
use date_planner::utils::{logger, validation::Validate};
use date_planner::{CliConfig, ConfigProvider, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting date-planner");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let result = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut file_config) => {
                    if config.monitor {
                        file_config.monitoring = Some(date_planner::config::toml_config::MonitoringConfig {
                            enabled: true,
                        });
                    }
                    run(&file_config).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&config).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<(), PlanError> {
    config.validate()?;

    let session = build_session(config)?;
    let input = collect_input(config)?;
    let outcome = session.run(input.as_ref()).await?;

    println!("{}", outcome.explanation);
    println!("📁 Plan saved to: {}", outcome.output_path);
    tracing::info!("✅ Planned {} activities", outcome.itinerary.len());
    Ok(())
}
