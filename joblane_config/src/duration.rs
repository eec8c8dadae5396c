use std::ops::Deref;

use serde::Deserialize;

/// Human-readable duration, e.g. `"90d"`, `"24h"`, `"5m"`, `"1d 12h"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let mut total = std::time::Duration::default();
        for part in raw.split_whitespace() {
            let Some(unit_at) = part.find(|c: char| !c.is_ascii_digit()) else {
                return Err(serde::de::Error::custom("Missing duration unit"));
            };
            let (number, unit) = part.split_at(unit_at);
            let number = number
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom("Invalid duration"))?;
            let seconds = match unit {
                "s" => number,
                "m" => number * 60,
                "h" => number * 60 * 60,
                "d" => number * 24 * 60 * 60,
                _ => return Err(serde::de::Error::custom("Invalid duration unit")),
            };
            total += std::time::Duration::from_secs(seconds);
        }
        Ok(Self(total))
    }
}
