use serde::{Deserialize, Serialize};

use crate::field::{DateField, LocationField};

/// The submittable request payload.
///
/// Only constructible from validated fields, so a draft in hand always
/// carries a "YYYY-MM-DD" date and a well-formed location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDraft {
    pub date: String,
    pub location: String,
    pub notes: String,
}

impl RequestDraft {
    /// Assemble a draft, or `None` while either field is invalid.
    pub fn from_fields(
        date: &DateField,
        location: &LocationField,
        notes: &str,
    ) -> Option<Self> {
        let date = date.iso_date()?;
        if !location.is_valid() {
            return None;
        }

        Some(Self {
            date,
            location: location.text().to_string(),
            notes: notes.to_string(),
        })
    }
}

/// A stored record as returned by the lookup endpoint.
///
/// `weather_data` is populated verbatim from whatever the backend captured
/// from its provider, so every nested field is optional: an absent value
/// renders as a blank, never a failure.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRecord {
    pub date: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub weather_data: Option<WeatherData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherData {
    pub current: Option<CurrentConditions>,
    pub location: Option<ResolvedLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub feelslike: Option<f64>,
    #[serde(default)]
    pub weather_descriptions: Vec<String>,
    #[serde(default)]
    pub weather_icons: Vec<String>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_dir: Option<String>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub pressure: Option<f64>,
    pub precip: Option<f64>,
    pub cloudcover: Option<f64>,
    pub observation_time: Option<String>,
    pub astro: Option<Astro>,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Astro {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub moon_phase: Option<String>,
    pub moon_illumination: Option<Metric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQuality {
    pub pm2_5: Option<Metric>,
    pub pm10: Option<Metric>,
    pub co: Option<Metric>,
    pub no2: Option<Metric>,
    pub o3: Option<Metric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolvedLocation {
    pub lat: Option<Metric>,
    pub lon: Option<Metric>,
    pub timezone_id: Option<String>,
}

/// A measurement the provider emits either as a number or as a quoted
/// number ("141.45"); both display the same way.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Number(n) => write!(f, "{n}"),
            Metric::Text(s) => f.write_str(s),
        }
    }
}
