use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Visibility reported when the provider has no figure for it, in meters.
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

/// A geocoded place. Lives for the duration of one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Coarse weather condition shown on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "clear sky")]
    ClearSky,
    #[serde(rename = "partly cloudy")]
    PartlyCloudy,
    #[serde(rename = "foggy")]
    Foggy,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snowy")]
    Snowy,
    #[serde(rename = "stormy")]
    Stormy,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::ClearSky => "clear sky",
            Condition::PartlyCloudy => "partly cloudy",
            Condition::Foggy => "foggy",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
            Condition::Stormy => "stormy",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Exactly(i32),
    AtMost(i32),
}

impl Bound {
    fn matches(self, code: i32) -> bool {
        match self {
            Bound::Exactly(v) => code == v,
            Bound::AtMost(v) => code <= v,
        }
    }
}

/// Weather-code rules, evaluated top to bottom. Bands overlap on purpose:
/// 80..=82 is rainy again after the snowy band.
const CODE_RULES: &[(Bound, Condition, &str)] = &[
    (Bound::Exactly(0), Condition::ClearSky, "01d"),
    (Bound::AtMost(3), Condition::PartlyCloudy, "02d"),
    (Bound::AtMost(48), Condition::Foggy, "50d"),
    (Bound::AtMost(67), Condition::Rainy, "10d"),
    (Bound::AtMost(77), Condition::Snowy, "13d"),
    (Bound::AtMost(82), Condition::Rainy, "09d"),
    (Bound::AtMost(86), Condition::Snowy, "13d"),
];

const FALLBACK: (Condition, &str) = (Condition::Stormy, "11d");

/// Map a WMO weather code to its condition and icon token. First matching rule wins.
pub fn classify(code: i32) -> (Condition, &'static str) {
    CODE_RULES
        .iter()
        .find(|(bound, _, _)| bound.matches(code))
        .map(|(_, condition, icon)| (*condition, *icon))
        .unwrap_or(FALLBACK)
}

/// Raw current values as reported by a provider, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub weather_code: i32,
    pub relative_humidity_pct: i64,
    pub wind_speed_mps: f64,
    pub surface_pressure_hpa: f64,
}

/// Normalized record consumed by the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_speed: f64,
    pub visibility: f64,
    pub pressure: f64,
    pub icon: String,
}

impl WeatherRecord {
    /// Build a record for `place` from raw provider values.
    ///
    /// Humidity is carried over unchanged; a value outside 0..=100 or a
    /// non-finite temperature means the provider sent garbage.
    pub fn from_conditions(
        place: &Place,
        current: &CurrentConditions,
    ) -> Result<Self, LookupError> {
        let humidity = u8::try_from(current.relative_humidity_pct)
            .ok()
            .filter(|h| *h <= 100)
            .ok_or_else(|| {
                LookupError::unavailable(format!(
                    "relative humidity out of range: {}",
                    current.relative_humidity_pct
                ))
            })?;

        if !current.temperature_c.is_finite() || !current.apparent_temperature_c.is_finite() {
            return Err(LookupError::unavailable("temperature is not a finite number"));
        }

        let (condition, icon) = classify(current.weather_code);

        Ok(Self {
            city: place.name.clone(),
            country: place.country.clone(),
            temperature: current.temperature_c,
            feels_like: current.apparent_temperature_c,
            condition,
            humidity,
            wind_speed: current.wind_speed_mps,
            visibility: DEFAULT_VISIBILITY_M,
            pressure: current.surface_pressure_hpa,
            icon: icon.to_string(),
        })
    }
}
