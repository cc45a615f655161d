use clap::{Parser, Subcommand};
use skycast_core::{
    Config, Units, WeatherSession,
    provider::{ProviderKind, mock::KNOWN_CITIES, provider_from_config},
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions, the 5-day forecast and statistics for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Display units, "metric" or "imperial".
        #[arg(long)]
        units: Option<String>,
    },

    /// Interactive dashboard: refresh, switch city, toggle units.
    Dashboard,

    /// Configure the forecast provider and credentials.
    Configure {
        /// Provider short name, e.g. "mock" or "openweather".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, units } => run_show(city, units).await,
            Command::Dashboard => run_dashboard().await,
            Command::Configure { provider } => run_configure(&provider),
        }
    }
}

fn build_session(config: &Config) -> anyhow::Result<WeatherSession> {
    let provider = provider_from_config(config)?;
    Ok(WeatherSession::new(provider).discard_stale_responses(config.discard_stale_responses))
}

async fn run_show(city: Option<String>, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let units = match units {
        Some(raw) => Units::try_from(raw.as_str())?,
        None => config.units,
    };
    let city = city.unwrap_or_else(|| config.city.clone());

    let session = build_session(&config)?;
    session.request_forecast(&city, units).await;
    print!("{}", output::render_dashboard(&session.snapshot()));

    Ok(())
}

async fn run_dashboard() -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = build_session(&config)?;

    session.request_forecast(&config.city, config.units).await;

    loop {
        print!("{}", output::render_dashboard(&session.snapshot()));

        let choice = inquire::Select::new(
            "Dashboard",
            vec!["Refresh", "Change city", "Toggle units", "Quit"],
        )
        .prompt()?;

        let snapshot = session.snapshot();
        match choice {
            "Refresh" => {
                session.request_forecast(&snapshot.city, snapshot.units).await;
            }
            "Change city" => {
                let Some(city) = pick_city(&session)? else {
                    continue;
                };
                // Selecting a city does not fetch by itself; kick off the
                // request explicitly with the current display units.
                session.change_city(&city);
                session.request_forecast(&city, snapshot.units).await;
            }
            "Toggle units" => {
                let next = match snapshot.units {
                    Units::Metric => Units::Imperial,
                    Units::Imperial => Units::Metric,
                };
                // Stored data stays Celsius; only the rendering changes.
                session.toggle_units(next);
            }
            _ => break,
        }
    }

    Ok(())
}

/// City picker over the known demo cities plus free-form input.
///
/// Returns `None` when the typed name was empty; the validation error is
/// surfaced through the session instead of aborting the loop.
fn pick_city(session: &WeatherSession) -> anyhow::Result<Option<String>> {
    const OTHER: &str = "Other…";

    let mut options: Vec<&str> = KNOWN_CITIES.to_vec();
    options.push(OTHER);

    let picked = inquire::Select::new("City", options).prompt()?;
    let city = if picked == OTHER {
        inquire::Text::new("City name:").prompt()?
    } else {
        picked.to_string()
    };

    let city = city.trim().to_string();
    if city.is_empty() {
        session.set_error("Please enter a city name.");
        return Ok(None);
    }

    session.clear_error();
    Ok(Some(city))
}

fn run_configure(provider: &str) -> anyhow::Result<()> {
    let kind = ProviderKind::try_from(provider)?;
    let mut config = Config::load()?;
    config.set_provider(kind);

    if kind == ProviderKind::OpenWeather {
        let api_key = inquire::Text::new("API key:").prompt()?;
        config.api_key = Some(api_key);
    }

    config.save()?;
    println!("Saved configuration for provider '{kind}'.");

    Ok(())
}
