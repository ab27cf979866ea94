//! Terminal rendering of a [`WeatherRecord`] as a summary card.

use skycard_core::WeatherRecord;

const CARD_WIDTH: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Sun,
    Cloud,
    Rain,
}

impl Glyph {
    fn symbol(self) -> &'static str {
        match self {
            Glyph::Sun => "☀",
            Glyph::Cloud => "☁",
            Glyph::Rain => "☂",
        }
    }
}

/// Card theme; picks the border texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Night,
    Rainy,
    Cloudy,
    Sunny,
}

impl Backdrop {
    fn border(self) -> char {
        match self {
            Backdrop::Night => '·',
            Backdrop::Rainy => '~',
            Backdrop::Cloudy => '-',
            Backdrop::Sunny => '=',
        }
    }
}

fn is_rain(condition: &str) -> bool {
    condition.contains("rain") || condition.contains("drizzle")
}

pub fn glyph(condition: &str) -> Glyph {
    let condition = condition.to_lowercase();
    if is_rain(&condition) {
        Glyph::Rain
    } else if condition.contains("cloud") {
        Glyph::Cloud
    } else {
        Glyph::Sun
    }
}

pub fn backdrop(condition: &str, icon: &str) -> Backdrop {
    let condition = condition.to_lowercase();
    if icon.contains('n') {
        Backdrop::Night
    } else if is_rain(&condition) {
        Backdrop::Rainy
    } else if condition.contains("cloud") {
        Backdrop::Cloudy
    } else {
        Backdrop::Sunny
    }
}

/// Whole degrees, halves rounded up.
pub fn degrees(value: f64) -> String {
    format!("{}°", (value + 0.5).floor())
}

pub fn visibility_km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

fn capitalize(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    let pad = CARD_WIDTH.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

pub fn render_card(record: &WeatherRecord) -> String {
    let label = record.condition.label();
    let rule = backdrop(label, &record.icon)
        .border()
        .to_string()
        .repeat(CARD_WIDTH);

    let heading = if record.country.is_empty() {
        record.city.clone()
    } else {
        format!("{}, {}", record.city, record.country)
    };

    let details = [
        ("Wind", format!("{} m/s", record.wind_speed)),
        ("Humidity", format!("{}%", record.humidity)),
        ("Visibility", visibility_km(record.visibility)),
        ("Pressure", format!("{} hPa", record.pressure)),
    ];

    let mut lines = vec![
        rule.clone(),
        centered(&heading),
        centered(&capitalize(label)),
        String::new(),
        centered(glyph(label).symbol()),
        centered(&degrees(record.temperature)),
        centered(&format!("Feels like {}", degrees(record.feels_like))),
        String::new(),
    ];
    lines.extend(
        details
            .iter()
            .map(|(name, value)| format!("  {name:<12}{value:>width$}", width = CARD_WIDTH - 16)),
    );
    lines.push(rule);

    lines.join("\n")
}
