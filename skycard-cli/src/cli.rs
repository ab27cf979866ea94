use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycard_core::{Config, Notification, Session, WeatherProvider, provider_from_config};
use tracing::debug;

use crate::render::render_card;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycard", version, about = "Current weather for a city, as a card")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,

        /// Print the weather record as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Look up cities one after another from a prompt.
    Interactive,

    /// Configure provider endpoints and result language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                show(provider.as_ref(), &city, json).await
            }
            Command::Interactive => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                interactive(provider.as_ref()).await
            }
            Command::Configure => configure(),
        }
    }
}

async fn show(provider: &dyn WeatherProvider, city: &str, json: bool) -> anyhow::Result<()> {
    let mut session = Session::new();

    let notification = session.submit(provider, city).await;

    match session.record() {
        Some(record) if json => {
            let out = serde_json::to_string_pretty(record)
                .context("Failed to serialize weather record")?;
            println!("{out}");
        }
        Some(record) => println!("{}", render_card(record)),
        None => match notification {
            Some(n) => bail!("{}", n.description.as_deref().unwrap_or(&n.title)),
            None => bail!("Lookup did not start"),
        },
    }

    Ok(())
}

const BACK: &str = "Back";
const QUIT: &str = "Quit";

/// Apply the choice made under a shown card. Returns `false` when the prompt loop should end.
fn after_card(session: &mut Session, choice: Option<&str>) -> bool {
    match choice {
        Some(BACK) => {
            session.back();
            true
        }
        _ => false,
    }
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    let mut session = Session::new();
    println!("Try: New York, London, Tokyo, Paris...");

    loop {
        if let Some(record) = session.record() {
            println!("{}", render_card(record));

            let choice = Select::new("Next:", vec![BACK, QUIT])
                .prompt_skippable()
                .context("Failed to read selection")?;

            if !after_card(&mut session, choice) {
                return Ok(());
            }
            continue;
        }

        let Some(city) = Text::new("City:")
            .with_placeholder("Enter city name...")
            .prompt_skippable()
            .context("Failed to read city name")?
        else {
            return Ok(());
        };

        debug!(city = %city, "submitting from prompt");
        println!("Loading...");
        if let Some(notification) = session.submit(provider, &city).await {
            notify(&notification);
        }
    }
}

fn notify(notification: &Notification) {
    if notification.is_error() {
        eprintln!("{notification}");
    } else {
        println!("{notification}");
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(config.geocoding_url())
        .prompt()
        .context("Failed to read geocoding endpoint")?;
    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(config.forecast_url())
        .prompt()
        .context("Failed to read forecast endpoint")?;
    let language = Text::new("Result language:")
        .with_default(config.language())
        .prompt()
        .context("Failed to read language")?;

    config.set_geocoding_url(&geocoding_url);
    config.set_forecast_url(&forecast_url);
    config.set_language(&language);

    // Reject endpoints the provider cannot use before writing them.
    provider_from_config(&config)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
