use clap::Parser;
use qa_forum::app::commands;
use qa_forum::utils::error::{ErrorSeverity, ForumError};
use qa_forum::utils::{logger, validation::Validate};
use qa_forum::{CliConfig, ForumStore, TomlConfig};

fn report_and_exit(e: &ForumError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

/// Loads `--config` when given and lets the command line flags override it.
fn load_toml_config(cli: &CliConfig) -> Result<Option<TomlConfig>, ForumError> {
    let Some(path) = &cli.config else {
        return Ok(None);
    };

    let mut config = TomlConfig::from_file(path)?;
    cli.override_toml(&mut config);
    config.validate()?;
    Ok(Some(config))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let toml_config = match load_toml_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report_and_exit(&e);
        }
    };

    match &toml_config {
        Some(config) => logger::init_logger(config.log_format(), cli.verbose || config.verbose_logging()),
        None => logger::init_cli_logger(cli.verbose),
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_and_exit(&e);
    }

    let store = match &toml_config {
        Some(config) => ForumStore::from_config(config),
        None => ForumStore::from_config(&cli),
    };
    let store = match store {
        Ok(store) => store,
        Err(e) => report_and_exit(&e),
    };

    if let ForumStore::Memory(_) = store {
        tracing::warn!("No --store or --endpoint given; using an empty in-memory store");
    }

    let default_order = toml_config
        .as_ref()
        .and_then(|c| c.default_order())
        .map(str::to_string);

    match commands::run(cli.command, store, default_order.as_deref()).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => report_and_exit(&e),
    }
}
