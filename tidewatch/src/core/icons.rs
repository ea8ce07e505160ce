//! Keyword decision table mapping forecast text to a weather icon.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Icon shown for a forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Storm,
    Wind,
    Fog,
    Default,
}

impl WeatherIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "☀️",
            WeatherIcon::PartlyCloudy => "⛅",
            WeatherIcon::Cloudy => "☁️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Storm => "⛈️",
            WeatherIcon::Wind => "💨",
            WeatherIcon::Fog => "🌫️",
            WeatherIcon::Default => "🌤️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::PartlyCloudy => "partly cloudy",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Storm => "storm",
            WeatherIcon::Wind => "windy",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Default => "fair",
        }
    }
}

// Evaluated top-down; order matters ("partly cloudy" before "cloudy",
// "thunder" before "storm").
static RULES: LazyLock<Vec<(Regex, WeatherIcon)>> = LazyLock::new(|| {
    [
        (r"(?i)clear|sunny", WeatherIcon::Clear),
        (r"(?i)partly cloudy", WeatherIcon::PartlyCloudy),
        (r"(?i)cloudy|overcast", WeatherIcon::Cloudy),
        (r"(?i)rain|thunder", WeatherIcon::Rain),
        (r"(?i)storm", WeatherIcon::Storm),
        (r"(?i)wind", WeatherIcon::Wind),
        (r"(?i)fog|haze", WeatherIcon::Fog),
    ]
    .into_iter()
    .map(|(pattern, icon)| (Regex::new(pattern).expect("icon rule should be valid"), icon))
    .collect()
});

/// Pick the icon for a free-text forecast. First matching rule wins.
pub fn icon_for(forecast: &str) -> WeatherIcon {
    RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(forecast))
        .map_or(WeatherIcon::Default, |(_, icon)| *icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thundery_showers_is_rain() {
        assert_eq!(icon_for("Thundery Showers"), WeatherIcon::Rain);
    }

    #[test]
    fn partly_cloudy_beats_cloudy() {
        assert_eq!(icon_for("Partly Cloudy (Day)"), WeatherIcon::PartlyCloudy);
        assert_eq!(icon_for("Cloudy"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("Overcast skies"), WeatherIcon::Cloudy);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(icon_for("MOSTLY SUNNY"), WeatherIcon::Clear);
        assert_eq!(icon_for("clear night"), WeatherIcon::Clear);
        assert_eq!(icon_for("Light rain"), WeatherIcon::Rain);
    }

    #[test]
    fn earlier_rules_win_over_later_ones() {
        // "Thunderstorm" hits the rain/thunder rule before the storm rule.
        assert_eq!(icon_for("Thunderstorm"), WeatherIcon::Rain);
        assert_eq!(icon_for("Sunny and windy"), WeatherIcon::Clear);
        assert_eq!(icon_for("Tropical storm"), WeatherIcon::Storm);
    }

    #[test]
    fn remaining_rules_and_default() {
        assert_eq!(icon_for("Windy"), WeatherIcon::Wind);
        assert_eq!(icon_for("Haze"), WeatherIcon::Fog);
        assert_eq!(icon_for("Morning fog"), WeatherIcon::Fog);
        assert_eq!(icon_for("Fair and Warm"), WeatherIcon::Default);
        assert_eq!(icon_for(""), WeatherIcon::Default);
    }

    #[test]
    fn unlisted_keywords_fall_back_to_default() {
        assert_eq!(icon_for("Showers"), WeatherIcon::Default);
        assert_eq!(icon_for("Light Showers"), WeatherIcon::Default);
        assert_eq!(icon_for("Hazy"), WeatherIcon::Default);
        assert_eq!(icon_for("Mist"), WeatherIcon::Default);
    }
}
