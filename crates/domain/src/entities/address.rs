//! Address lookup entities

use serde::{Deserialize, Serialize};

/// Label used when reverse geocoding returns no street
pub const UNKNOWN_STREET: &str = "Endereço desconhecido";

/// Label used when reverse geocoding returns no house number
pub const NO_NUMBER: &str = "S/N";

/// An address candidate returned by a free-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Human-readable name of the place
    pub display_name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Provider relevance score (higher is more relevant)
    pub importance: f64,
}

/// Address breakdown returned by reverse geocoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetails {
    /// Street name
    pub road: Option<String>,
    /// House number
    pub house_number: Option<String>,
    /// Neighbourhood, suburb or district
    pub neighbourhood: Option<String>,
    /// City, town or municipality
    pub city: Option<String>,
}

impl AddressDetails {
    /// Compose the display label `"{street}, {number}[, {neighbourhood}][ - {city}]"`
    #[must_use]
    pub fn format_label(&self) -> String {
        let street = non_blank(self.road.as_deref()).unwrap_or(UNKNOWN_STREET);
        let number = non_blank(self.house_number.as_deref()).unwrap_or(NO_NUMBER);

        let mut label = format!("{street}, {number}");
        if let Some(neighbourhood) = non_blank(self.neighbourhood.as_deref()) {
            label.push_str(&format!(", {neighbourhood}"));
        }
        if let Some(city) = non_blank(self.city.as_deref()) {
            label.push_str(&format!(" - {city}"));
        }
        label
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_label() {
        let details = AddressDetails {
            road: Some("Eixo Monumental".to_string()),
            house_number: Some("100".to_string()),
            neighbourhood: Some("Zona Cívico-Administrativa".to_string()),
            city: Some("Brasília".to_string()),
        };
        assert_eq!(
            details.format_label(),
            "Eixo Monumental, 100, Zona Cívico-Administrativa - Brasília"
        );
    }

    #[test]
    fn missing_street_and_number_fall_back() {
        let details = AddressDetails {
            city: Some("Goiânia".to_string()),
            ..Default::default()
        };
        assert_eq!(details.format_label(), "Endereço desconhecido, S/N - Goiânia");
    }

    #[test]
    fn blank_fields_are_ignored() {
        let details = AddressDetails {
            road: Some("Rua 7".to_string()),
            house_number: Some("  ".to_string()),
            neighbourhood: Some(String::new()),
            city: None,
        };
        assert_eq!(details.format_label(), "Rua 7, S/N");
    }

    #[test]
    fn empty_details() {
        assert_eq!(AddressDetails::default().format_label(), "Endereço desconhecido, S/N");
    }
}
