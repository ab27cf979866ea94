use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    Config, LookupError,
    model::{CurrentConditions, Place, WeatherRecord},
};

use super::WeatherProvider;

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,weather_code,\
relative_humidity_2m,wind_speed_10m,surface_pressure";

/// Open-Meteo geocoding + forecast. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: Url,
    forecast_url: Url,
    language: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: Url, forecast_url: Url, language: impl Into<String>) -> Self {
        Self {
            geocoding_url,
            forecast_url,
            language: language.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoding_url = Url::parse(config.geocoding_url())
            .with_context(|| format!("Invalid geocoding URL: {}", config.geocoding_url()))?;
        let forecast_url = Url::parse(config.forecast_url())
            .with_context(|| format!("Invalid forecast URL: {}", config.forecast_url()))?;

        Ok(Self::new(geocoding_url, forecast_url, config.language()))
    }

    async fn search(&self, name: &str) -> Result<Option<Place>> {
        let res = self
            .http
            .get(self.geocoding_url.clone())
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (geocoding)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            anyhow::bail!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            );
        }

        let parsed: OmGeocodingResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        Ok(parsed.results.into_iter().flatten().next().map(Place::from))
    }

    async fn current(&self, place: &Place) -> Result<CurrentConditions, LookupError> {
        let latitude = place.latitude.to_string();
        let longitude = place.longitude.to_string();

        let res = self
            .http
            .get(self.forecast_url.clone())
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("wind_speed_unit", "ms"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::unavailable(format!("request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::unavailable(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(LookupError::unavailable(format!(
                "forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::unavailable(format!("invalid forecast JSON: {e}")))?;

        Ok(parsed.current.into())
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    results: Option<Vec<OmGeocodingResult>>,
}

impl From<OmGeocodingResult> for Place {
    fn from(r: OmGeocodingResult) -> Self {
        Place {
            name: r.name,
            country: r.country.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    relative_humidity_2m: i64,
    wind_speed_10m: f64,
    surface_pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

impl From<OmCurrent> for CurrentConditions {
    fn from(c: OmCurrent) -> Self {
        CurrentConditions {
            temperature_c: c.temperature_2m,
            apparent_temperature_c: c.apparent_temperature,
            weather_code: c.weather_code,
            relative_humidity_pct: c.relative_humidity_2m,
            wind_speed_mps: c.wind_speed_10m,
            surface_pressure_hpa: c.surface_pressure,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> &'static str {
        "open-meteo"
    }

    async fn resolve(&self, query: &str) -> Result<Place, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        match self.search(query).await {
            Ok(Some(place)) => {
                debug!(
                    "Resolved '{}' to {}, {} ({:.4}, {:.4})",
                    query, place.name, place.country, place.latitude, place.longitude
                );
                Ok(place)
            }
            Ok(None) => {
                debug!("No geocoding results for '{}'", query);
                Err(LookupError::not_found(query))
            }
            // Unreachable service and unknown place look the same to callers.
            Err(e) => {
                debug!("Geocoding '{}' failed: {:#}", query, e);
                Err(LookupError::not_found(query))
            }
        }
    }

    async fn fetch(&self, place: &Place) -> Result<WeatherRecord, LookupError> {
        let current = self.current(place).await?;
        debug!(?current, "Open-Meteo current conditions for {}", place.name);
        WeatherRecord::from_conditions(place, &current)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
