use weatherdesk_core::WeatherRecord;
use weatherdesk_core::model::{AirQuality, Astro, CurrentConditions, ResolvedLocation};

/// Render a stored record for the terminal.
///
/// The summary mirrors the collapsed lookup view: date, location, notes, and
/// the headline measurements. `advanced` expands the remaining measurements,
/// the astro and air-quality blocks, and the resolved location. Absent
/// fields are omitted rather than rendered as placeholders.
pub fn render_record(record: &WeatherRecord, advanced: bool) -> String {
    let mut lines = Vec::new();

    push_line(&mut lines, "Date", Some(record.date.clone().unwrap_or_default()));
    push_line(&mut lines, "Location", Some(record.location.clone().unwrap_or_default()));
    let notes = match record.notes.as_deref() {
        None | Some("") => "None".to_string(),
        Some(notes) => notes.to_string(),
    };
    push_line(&mut lines, "Notes", Some(notes));

    let data = record.weather_data.as_ref();
    let current = data.and_then(|data| data.current.as_ref());

    if let Some(current) = current {
        push_line(&mut lines, "Temperature", current.temperature.map(|t| format!("{t}°C")));
        push_line(
            &mut lines,
            "Description",
            current.weather_descriptions.first().cloned(),
        );
    }

    if advanced {
        if let Some(current) = current {
            push_conditions(&mut lines, current);

            if let Some(astro) = current.astro.as_ref() {
                push_astro(&mut lines, astro);
            }
            if let Some(air) = current.air_quality.as_ref() {
                push_air_quality(&mut lines, air);
            }
        }

        if let Some(resolved) = data.and_then(|data| data.location.as_ref()) {
            push_resolved(&mut lines, resolved);
        }
    }

    lines.join("\n")
}

fn push_conditions(lines: &mut Vec<String>, current: &CurrentConditions) {
    push_line(lines, "Feels like", current.feelslike.map(|t| format!("{t}°C")));
    push_line(lines, "Humidity", current.humidity.map(|h| format!("{h}%")));

    let wind = current.wind_speed.map(|speed| match current.wind_dir.as_deref() {
        Some(dir) => format!("{speed} km/h {dir}"),
        None => format!("{speed} km/h"),
    });
    push_line(lines, "Wind", wind);

    push_line(lines, "Visibility", current.visibility.map(|v| format!("{v} km")));
    push_line(lines, "UV index", current.uv_index.map(|uv| uv.to_string()));
    push_line(lines, "Pressure", current.pressure.map(|p| format!("{p} hPa")));
    push_line(lines, "Precipitation", current.precip.map(|p| format!("{p} mm")));
    push_line(lines, "Cloud cover", current.cloudcover.map(|c| format!("{c}%")));
    push_line(lines, "Observed at", current.observation_time.clone());
}

fn push_astro(lines: &mut Vec<String>, astro: &Astro) {
    push_line(lines, "Sunrise", astro.sunrise.clone());
    push_line(lines, "Sunset", astro.sunset.clone());
    push_line(lines, "Moon phase", astro.moon_phase.clone());
    push_line(
        lines,
        "Moon illumination",
        astro.moon_illumination.as_ref().map(|m| format!("{m}%")),
    );
}

fn push_air_quality(lines: &mut Vec<String>, air: &AirQuality) {
    push_line(lines, "PM2.5", air.pm2_5.as_ref().map(ToString::to_string));
    push_line(lines, "PM10", air.pm10.as_ref().map(ToString::to_string));
    push_line(lines, "CO", air.co.as_ref().map(ToString::to_string));
    push_line(lines, "NO2", air.no2.as_ref().map(ToString::to_string));
    push_line(lines, "O3", air.o3.as_ref().map(ToString::to_string));
}

fn push_resolved(lines: &mut Vec<String>, resolved: &ResolvedLocation) {
    let coordinates = match (resolved.lat.as_ref(), resolved.lon.as_ref()) {
        (Some(lat), Some(lon)) => Some(format!("{lat}, {lon}")),
        (Some(lat), None) => Some(lat.to_string()),
        (None, Some(lon)) => Some(lon.to_string()),
        (None, None) => None,
    };
    push_line(lines, "Coordinates", coordinates);
    push_line(lines, "Timezone", resolved.timezone_id.clone());
}

fn push_line(lines: &mut Vec<String>, label: &str, value: Option<String>) {
    if let Some(value) = value {
        let label = format!("{label}:");
        lines.push(format!("{label:<19}{value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: serde_json::Value) -> WeatherRecord {
        serde_json::from_value(value).expect("test record deserializes")
    }

    fn full_record() -> WeatherRecord {
        record(serde_json::json!({
            "date": "2024-01-01",
            "location": "Paris",
            "notes": "",
            "weather_data": {
                "current": {
                    "temperature": 10,
                    "feelslike": 8,
                    "weather_descriptions": ["Partly cloudy"],
                    "humidity": 71,
                    "wind_speed": 11,
                    "wind_dir": "NNW",
                    "uv_index": 4,
                    "observation_time": "12:14 PM",
                    "astro": {"sunrise": "06:14 AM", "moon_illumination": 78},
                    "air_quality": {"pm2_5": "45.51", "co": "469.05"}
                },
                "location": {"lat": "48.867", "lon": "2.333", "timezone_id": "Europe/Paris"}
            }
        }))
    }

    #[test]
    fn summary_shows_headline_fields() {
        let rendered = render_record(&full_record(), false);

        assert!(rendered.contains("Date:"));
        assert!(rendered.contains("2024-01-01"));
        assert!(rendered.contains("Paris"));
        assert!(rendered.contains("10°C"));
        assert!(rendered.contains("Partly cloudy"));
    }

    #[test]
    fn empty_notes_render_as_none() {
        let rendered = render_record(&full_record(), false);

        assert!(rendered.contains("Notes:"));
        assert!(rendered.contains("None"));
    }

    #[test]
    fn summary_hides_the_advanced_sections() {
        let rendered = render_record(&full_record(), false);

        assert!(!rendered.contains("Sunrise:"));
        assert!(!rendered.contains("PM2.5:"));
        assert!(!rendered.contains("Timezone:"));
    }

    #[test]
    fn advanced_discloses_the_full_record() {
        let rendered = render_record(&full_record(), true);

        assert!(rendered.contains("8°C"));
        assert!(rendered.contains("71%"));
        assert!(rendered.contains("11 km/h NNW"));
        assert!(rendered.contains("06:14 AM"));
        assert!(rendered.contains("78%"));
        assert!(rendered.contains("45.51"));
        assert!(rendered.contains("48.867, 2.333"));
        assert!(rendered.contains("Europe/Paris"));
    }

    #[test]
    fn absent_fields_are_omitted_not_blanked() {
        let sparse = record(serde_json::json!({
            "date": "2024-01-01",
            "location": "Paris",
            "weather_data": {"current": {"temperature": 10}}
        }));

        let rendered = render_record(&sparse, true);

        assert!(rendered.contains("10°C"));
        assert!(!rendered.contains("Description:"));
        assert!(!rendered.contains("Wind:"));
        assert!(!rendered.contains("Sunrise:"));
    }

    #[test]
    fn record_without_weather_data_still_renders_the_request() {
        let sparse = record(serde_json::json!({
            "date": "2024-01-01",
            "location": "Paris",
            "notes": "picnic"
        }));

        let rendered = render_record(&sparse, true);

        assert!(rendered.contains("2024-01-01"));
        assert!(rendered.contains("picnic"));
        assert!(!rendered.contains("Temperature:"));
    }
}
