use anyhow::Context;
use globe_explorer::initialization::{
    ensure_directories, initialize_account_service, initialize_country_service,
    initialize_session, print_startup_info, validate_config,
};
use globe_explorer::{AppRunner, Cli, Config, ConfigError, SessionStore};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let level = cli.get_log_level().parse::<Level>().unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match Config::from_env(cli.account_api.clone()) {
        Ok(config) => config,
        Err(ConfigError::MissingEnvVar(var)) => {
            eprintln!("Missing required environment variable: {}", var);
            eprintln!("Please set all required variables in your .env file.");
            eprintln!("See .env.example for reference.");
            std::process::exit(1);
        }
        Err(ConfigError::InvalidValue(msg)) => {
            eprintln!("Invalid configuration value: {}", msg);
            std::process::exit(1);
        }
    };
    config.country_api_url = cli.get_country_api(config.country_api_url);
    config.page_size = cli.get_page_size(config.page_size);

    print_startup_info(&config, &cli);
    validate_config(&config)?;
    ensure_directories(&config).await.with_context(|| {
        format!("Failed to prepare session directory for {:?}", config.session_file)
    })?;

    let store = SessionStore::new(config.session_file.clone());
    let countries = initialize_country_service(&config)?;
    let account = initialize_account_service(&config, &store).await?;
    let session = initialize_session(account.clone());

    let runner = AppRunner::new(countries, account, session, store, config.page_size);
    if let Err(e) = runner.run(cli.command).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }

    Ok(())
}
