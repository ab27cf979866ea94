use crate::{
    Config, LookupError,
    model::{Place, WeatherRecord},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{info, warn};

pub mod open_meteo;

/// A source that can geocode a free-text place name and report current conditions there.
///
/// Implementations own their wire formats; callers only see [`Place`] and
/// [`WeatherRecord`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short provider name for logs.
    fn id(&self) -> &'static str;

    /// Resolve `query` to the best matching place.
    async fn resolve(&self, query: &str) -> Result<Place, LookupError>;

    /// Fetch and normalize current conditions at `place`.
    async fn fetch(&self, place: &Place) -> Result<WeatherRecord, LookupError>;
}

/// Geocode `query`, then fetch conditions for the place found.
///
/// The fetch is only issued once the place is known.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &str,
) -> Result<WeatherRecord, LookupError> {
    info!(provider = provider.id(), query, "looking up weather");

    let result = match provider.resolve(query).await {
        Ok(place) => provider.fetch(&place).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!(provider = provider.id(), query, error = %e, "weather lookup failed");
    }

    result
}

/// Construct the configured provider.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(Box::new(provider))
}
