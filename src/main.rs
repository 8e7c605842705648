use clap::Parser;
use renewal_radar::config::{CliConfig, Command, OutputFormat};
use renewal_radar::core::insights::insights;
use renewal_radar::core::ConfigProvider;
use renewal_radar::domain::model::Contract;
use renewal_radar::domain::ports::ContractSource;
use renewal_radar::utils::{logger, validation::Validate};
use renewal_radar::{
    report, BriefGenerator, BundledContracts, GeminiClient, JsonFileContracts, Radar, RadarConfig,
    RadarError,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting renewal-radar");

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: CliConfig) -> Result<(), RadarError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            RadarConfig::from_file(path)?
        }
        None => RadarConfig::default(),
    };
    config.validate()?;

    let contracts = load_contracts(cli.data.as_deref().or(config.data_path())).await?;
    let mut radar = Radar::with_filter(contracts, config.initial_filter()?);

    match cli.command {
        Command::Radar {
            days,
            region,
            tile,
            format,
        } => {
            if let Some(days) = days {
                radar.set_days_horizon(days);
            }
            if let Some(region) = region {
                radar.set_region(region);
            }
            radar.toggle_tile(tile);

            let view = radar.view();
            let rendered = match format {
                OutputFormat::Table => report::render_table(view),
                OutputFormat::Json => report::render_json(view)?,
                OutputFormat::Csv => report::render_csv(view)?,
            };
            print!("{}", rendered);
        }
        Command::Detail { id } => {
            let contract = radar.find(&id)?;
            print!("{}", report::render_detail(contract, &insights(contract)));
        }
        Command::Brief { id, api_key } => {
            let contract = radar.find(&id)?;
            let credential = api_key
                .as_deref()
                .or(config.api_key())
                .unwrap_or_default()
                .to_string();
            let brief = generate(&config, contract, &credential).await?;
            println!("{}", brief);
        }
    }

    Ok(())
}

async fn load_contracts(path: Option<&str>) -> Result<Vec<Contract>, RadarError> {
    match path {
        Some(path) => JsonFileContracts::new(path).load().await,
        None => BundledContracts.load().await,
    }
}

async fn generate(
    config: &RadarConfig,
    contract: &Contract,
    credential: &str,
) -> Result<String, RadarError> {
    let client = GeminiClient::new(
        config.endpoint(),
        Duration::from_secs(config.timeout_seconds()),
    )?;
    let briefs = BriefGenerator::with_model(client, config.model());

    eprintln!("⏳ Generating strategy for {}...", contract.contract_name);
    Ok(briefs.generate_brief(contract, credential).await)
}
