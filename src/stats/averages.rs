use serde::{Deserialize, Serialize};

use crate::models::response::Response;

/// Per-metric means over a set of responses.
///
/// Held as `f64` and only rendered to two-decimal strings at the JSON
/// boundary, so `{"happiness": "4.00", ...}` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    #[serde(with = "two_places")]
    pub happiness: f64,
    #[serde(with = "two_places")]
    pub energy: f64,
    #[serde(with = "two_places")]
    pub hopefulness: f64,
    #[serde(with = "two_places")]
    pub sleep_hours: f64,
}

impl Averages {
    /// Arithmetic mean of every metric, dividing by the number of records.
    ///
    /// Returns `None` for an empty set rather than a NaN average.
    pub fn from_responses<'a, I>(responses: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Response>,
    {
        let mut count = 0usize;
        let mut sums = Self {
            happiness: 0.0,
            energy: 0.0,
            hopefulness: 0.0,
            sleep_hours: 0.0,
        };

        for r in responses {
            count += 1;
            sums.happiness += r.happiness as f64;
            sums.energy += r.energy as f64;
            sums.hopefulness += r.hopefulness as f64;
            sums.sleep_hours += r.sleep_hours;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self {
            happiness: sums.happiness / n,
            energy: sums.energy / n,
            hopefulness: sums.hopefulness / n,
            sleep_hours: sums.sleep_hours / n,
        })
    }
}

/// Fixed two-decimal rendering, ties rounded away from zero (`3.125` -> `"3.13"`).
pub fn format_two_places(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

mod two_places {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_two_places(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
