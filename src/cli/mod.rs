use crate::{
    config::{provider_api_key, PlannerConfig, DEFAULT_ADDR},
    server::{self, AppState},
    types::ItineraryRequest,
    Provider,
};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};
use tracing::{error, info, warn};

fn shared_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("places")
                .short('p')
                .long("places")
                .value_name("PATH")
                .help("Place catalog JSON file (or set PLANNER_PLACES_PATH)"),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .value_name("PROVIDER")
                .help("Generation API: gemini or openai (or set PLANNER_PROVIDER)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model name (or set PLANNER_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set GOOGLE_API_KEY / OPENAI_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Generation API base URL (or set PLANNER_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Generation request timeout in seconds (or set PLANNER_TIMEOUT_SECS)"),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(usize))
                .help("Retries on 429/5xx from the generation API (or set PLANNER_MAX_RETRIES)"),
        )
        .arg(
            Arg::new("destination")
                .long("destination")
                .value_name("NAME")
                .help("Destination named in the prompt (or set PLANNER_DESTINATION)"),
        )
        .arg(
            Arg::new("primary")
                .long("primary")
                .value_name("ATTRACTION")
                .help("Attraction the plan must prioritise (or set PLANNER_PRIMARY_ATTRACTION)"),
        )
}

fn trip_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("N")
                .required(true)
                .help("Number of days"),
        )
        .arg(
            Arg::new("interests")
                .short('i')
                .long("interests")
                .value_name("LIST")
                .value_delimiter(',')
                .required(true)
                .help("Comma-separated interests, e.g. temples,food"),
        )
        .arg(
            Arg::new("start-date")
                .short('s')
                .long("start-date")
                .value_name("DATE")
                .required(true)
                .help("Trip start date, e.g. 2024-01-01"),
        )
}

fn command() -> Command {
    Command::new("itinerary-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate day-by-day travel itineraries from a place catalog with an LLM")
        .subcommand_required(true)
        .subcommand(
            shared_args(Command::new("serve").about("Run the HTTP API"))
                .arg(
                    Arg::new("addr")
                        .short('a')
                        .long("addr")
                        .value_name("HOST:PORT")
                        .help(format!("Listen address (or set PLANNER_ADDR, default {DEFAULT_ADDR})")),
                )
                .arg(
                    Arg::new("error-mode")
                        .long("error-mode")
                        .value_name("MODE")
                        .help("status (default): distinct HTTP codes; legacy: always 200 (or set PLANNER_ERROR_MODE)"),
                ),
        )
        .subcommand(trip_args(shared_args(
            Command::new("generate").about("Generate one itinerary and print it as JSON"),
        )))
        .subcommand(trip_args(shared_args(
            Command::new("prompt").about("Print the prompt that would be sent, without calling the model"),
        )))
}

/// Overlay command-line flags on the environment-derived config.
///
/// `lookup` resolves environment variables, as in [`PlannerConfig::from_env`].
fn apply_overrides(
    config: &mut PlannerConfig,
    matches: &ArgMatches,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(provider) = matches.get_one::<String>("provider") {
        let provider: Provider = provider.parse()?;
        if provider != config.provider {
            // the key read from the environment belonged to the other provider
            config.api_key = provider_api_key(&lookup, provider);
        }
        config.provider = provider;
    }
    if let Some(path) = matches.get_one::<String>("places") {
        config.places_path = PathBuf::from(path);
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = Some(model.clone());
    }
    if let Some(key) = matches.get_one::<String>("api-key") {
        config.api_key = Some(key.clone());
    }
    if let Some(url) = matches.get_one::<String>("base-url") {
        config.base_url = Some(url.clone());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*secs);
    }
    if let Some(retries) = matches.get_one::<usize>("retries") {
        config.max_retries = *retries;
    }
    if let Some(destination) = matches.get_one::<String>("destination") {
        config.destination = destination.clone();
    }
    if let Some(primary) = matches.get_one::<String>("primary") {
        config.primary_attraction = primary.clone();
    }
    // serve-only flags
    if let Ok(Some(addr)) = matches.try_get_one::<String>("addr") {
        config.addr = addr.clone();
    }
    if let Ok(Some(mode)) = matches.try_get_one::<String>("error-mode") {
        config.error_mode = mode.parse()?;
    }
    Ok(())
}

fn trip_request(matches: &ArgMatches) -> anyhow::Result<ItineraryRequest> {
    let days = matches
        .get_one::<String>("days")
        .context("--days is required")?;
    let interests = matches
        .get_many::<String>("interests")
        .context("--interests is required")?
        .map(|interest| interest.trim().to_string())
        .filter(|interest| !interest.is_empty())
        .collect();
    let start_date = matches
        .get_one::<String>("start-date")
        .context("--start-date is required")?;

    Ok(ItineraryRequest::new(days.as_str(), interests, start_date.as_str()))
}

/// CLI entry point for the itinerary-planner binary
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let (name, sub) = matches
        .subcommand()
        .context("a subcommand is required")?;

    let mut config = PlannerConfig::from_env()?;
    apply_overrides(&mut config, sub, |name| std::env::var(name).ok())?;

    match name {
        "serve" => {
            if config.api_key.is_none() {
                warn!(
                    "{} is not set; itinerary requests will fail until it is",
                    config.provider.api_key_env()
                );
            }
            info!(
                provider = %config.provider,
                places = %config.places_path.display(),
                error_mode = ?config.error_mode,
                "starting itinerary server"
            );

            let state = AppState::new(config.planner()).with_error_mode(config.error_mode);
            server::serve(&config.addr, state)
                .await
                .with_context(|| format!("server on {} failed", config.addr))?;
        }
        "generate" => {
            let request = trip_request(sub)?;
            match config.planner().plan(&request).await {
                Ok(itinerary) => println!("{}", serde_json::to_string_pretty(&itinerary)?),
                Err(e) => {
                    error!("Itinerary generation failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        "prompt" => {
            let request = trip_request(sub)?;
            println!("{}", config.planner().render_prompt(&request).await?);
        }
        other => anyhow::bail!("unknown subcommand `{other}`"),
    }

    Ok(())
}
