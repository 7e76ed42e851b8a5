//! Raw Nominatim response types
//!
//! Nominatim returns coordinates and importance either as JSON strings or
//! as numbers depending on the output format, so both are accepted.

use domain::{AddressDetails, AddressSuggestion};
use serde::Deserialize;

use crate::error::GeocodingError;

/// A numeric field that may arrive as a number or a numeric string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub(crate) fn to_f64(&self, field: &str) -> Result<f64, GeocodingError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| GeocodingError::ParseError(format!("Invalid {field}: {s}"))),
        }
    }
}

/// One entry of a `/search` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResult {
    pub(crate) display_name: Option<String>,
    pub(crate) lat: Numeric,
    pub(crate) lon: Numeric,
    pub(crate) importance: Option<Numeric>,
}

impl RawSearchResult {
    pub(crate) fn into_suggestion(self) -> Result<AddressSuggestion, GeocodingError> {
        let latitude = self.lat.to_f64("latitude")?;
        let longitude = self.lon.to_f64("longitude")?;
        let importance = match &self.importance {
            Some(value) => value.to_f64("importance")?,
            None => 0.0,
        };

        Ok(AddressSuggestion {
            display_name: self
                .display_name
                .unwrap_or_else(|| format!("{latitude:.6}, {longitude:.6}")),
            latitude,
            longitude,
            importance,
        })
    }
}

/// A `/reverse` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawReverseResult {
    pub(crate) address: Option<RawAddress>,
    pub(crate) error: Option<String>,
}

/// Address breakdown of a `/reverse` response
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAddress {
    road: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    district: Option<String>,
    city: Option<String>,
    town: Option<String>,
    municipality: Option<String>,
}

impl From<RawAddress> for AddressDetails {
    fn from(raw: RawAddress) -> Self {
        Self {
            road: raw.road.or(raw.street),
            house_number: raw.house_number,
            neighbourhood: raw.suburb.or(raw.neighbourhood).or(raw.district),
            city: raw.city.or(raw.town).or(raw.municipality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_accepts_strings_and_numbers() {
        let text: Numeric = serde_json::from_str(r#""-15.77972""#).unwrap();
        let number: Numeric = serde_json::from_str("-15.77972").unwrap();
        assert!((text.to_f64("lat").unwrap() - -15.779_72).abs() < f64::EPSILON);
        assert!((number.to_f64("lat").unwrap() - -15.779_72).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_rejects_garbage() {
        let text: Numeric = serde_json::from_str(r#""north""#).unwrap();
        assert!(matches!(
            text.to_f64("latitude"),
            Err(GeocodingError::ParseError(_))
        ));
    }

    #[test]
    fn search_result_without_importance() {
        let raw: RawSearchResult =
            serde_json::from_str(r#"{"display_name": "Brasília", "lat": "-15.79", "lon": "-47.88"}"#)
                .unwrap();
        let suggestion = raw.into_suggestion().unwrap();
        assert_eq!(suggestion.display_name, "Brasília");
        assert!(suggestion.importance.abs() < f64::EPSILON);
    }

    #[test]
    fn address_fallback_fields() {
        let raw: RawAddress = serde_json::from_str(
            r#"{"street": "Quadra 102", "district": "Asa Norte", "town": "Brasília"}"#,
        )
        .unwrap();
        let details = AddressDetails::from(raw);
        assert_eq!(details.road.as_deref(), Some("Quadra 102"));
        assert_eq!(details.neighbourhood.as_deref(), Some("Asa Norte"));
        assert_eq!(details.city.as_deref(), Some("Brasília"));
        assert!(details.house_number.is_none());
    }

    #[test]
    fn address_prefers_primary_fields() {
        let raw: RawAddress = serde_json::from_str(
            r#"{"road": "SQN 102", "street": "ignored", "suburb": "Asa Norte",
                "neighbourhood": "ignored", "city": "Brasília", "municipality": "ignored"}"#,
        )
        .unwrap();
        let details = AddressDetails::from(raw);
        assert_eq!(details.road.as_deref(), Some("SQN 102"));
        assert_eq!(details.neighbourhood.as_deref(), Some("Asa Norte"));
        assert_eq!(details.city.as_deref(), Some("Brasília"));
    }
}
