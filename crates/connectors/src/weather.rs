//! Synthesized weather readings with a short-lived per-location cache.
//!
//! There is no upstream weather provider yet; readings are generated from
//! regional temperature baselines with bounded jitter, which is enough for
//! the destination pages. Readings are cached for ten minutes so a page
//! reload shows stable numbers.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use api_types::weather::WeatherReading;
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// (condition, icon) pairs a reading is drawn from.
const CONDITIONS: [(&str, &str); 14] = [
    ("Clear sky", "☀️"),
    ("Cloudy", "☁️"),
    ("Rainy", "🌧️"),
    ("Drizzle", "🌦️"),
    ("Thunderstorm", "⛈️"),
    ("Snow", "❄️"),
    ("Misty", "🌫️"),
    ("Foggy", "🌫️"),
    ("Hazy", "🌫️"),
    ("Dusty", "💨"),
    ("Sandy", "💨"),
    ("Ash", "🌋"),
    ("Squall", "💨"),
    ("Tornado", "🌪️"),
];

#[derive(Debug)]
pub struct WeatherService {
    cache: Mutex<HashMap<String, (WeatherReading, Instant)>>,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherService {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Current reading for a location, served from cache when fresh.
    pub fn current(&self, location: &str) -> WeatherReading {
        let mut cache = match self.cache.lock() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((reading, stamp)) = cache.get(location)
            && stamp.elapsed() < CACHE_TTL
        {
            return reading.clone();
        }

        let reading = synthesize(location);
        cache.insert(location.to_string(), (reading.clone(), Instant::now()));
        reading
    }
}

/// Regional baseline in °C, keyed by substring of the location name.
fn baseline_temperature(location: &str) -> i32 {
    let lower = location.to_lowercase();
    if ["himalaya", "sikkim", "ladakh"].iter().any(|r| lower.contains(r)) {
        5
    } else if ["rajasthan", "gujarat"].iter().any(|r| lower.contains(r)) {
        35
    } else if ["kerala", "goa"].iter().any(|r| lower.contains(r)) {
        28
    } else {
        25
    }
}

fn synthesize(location: &str) -> WeatherReading {
    let mut rng = SmallRng::from_entropy();
    let (condition, icon) = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

    WeatherReading {
        location: location.to_string(),
        temperature: baseline_temperature(location) + rng.gen_range(-5..5),
        condition: condition.to_string(),
        description: condition.to_string(),
        humidity: rng.gen_range(40..80),
        wind_speed: rng.gen_range(2..17),
        pressure: rng.gen_range(1000..1030),
        visibility: rng.gen_range(5..15),
        uv_index: rng.gen_range(1..9),
        icon: icon.to_string(),
        timestamp: Utc::now().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_follow_regional_baselines() {
        for _ in 0..50 {
            let cold = synthesize("Leh, Ladakh");
            assert!((0..10).contains(&cold.temperature), "{}", cold.temperature);

            let hot = synthesize("Jaisalmer, Rajasthan");
            assert!((30..40).contains(&hot.temperature), "{}", hot.temperature);

            let coastal = synthesize("Kochi, Kerala");
            assert!((23..33).contains(&coastal.temperature));

            let default = synthesize("Bhopal");
            assert!((20..30).contains(&default.temperature));
        }
    }

    #[test]
    fn readings_stay_within_documented_ranges() {
        for _ in 0..50 {
            let reading = synthesize("Pune");
            assert!((40..80).contains(&reading.humidity));
            assert!((2..17).contains(&reading.wind_speed));
            assert!((1000..1030).contains(&reading.pressure));
            assert!((5..15).contains(&reading.visibility));
            assert!((1..9).contains(&reading.uv_index));
            assert!(!reading.icon.is_empty());
        }
    }

    #[test]
    fn cache_returns_the_same_reading_within_the_ttl() {
        let service = WeatherService::new();
        let first = service.current("Goa");
        let second = service.current("Goa");
        assert_eq!(first, second);

        // a different location gets its own entry
        let other = service.current("Shimla");
        assert_eq!(other.location, "Shimla");
    }
}
