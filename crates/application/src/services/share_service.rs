//! Route sharing
//!
//! Composes a plain-text summary of the waypoint list and wraps it in a
//! WhatsApp deep link that opens the native app on mobile or WhatsApp Web
//! on desktop.

use domain::{DomainError, MIN_ROUTE_WAYPOINTS, Waypoint};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::error::ApplicationError;

const WHATSAPP_SHARE_URL: &str = "https://wa.me/?text=";

/// Characters left unescaped in the share text (RFC 3986 unreserved plus `!*'()`)
const SHARE_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A composed share message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMessage {
    /// Human-readable waypoint summary
    pub text: String,
    /// WhatsApp deep link carrying `text`
    pub url: String,
}

/// Builds share messages for a waypoint list
#[derive(Debug, Clone, Default)]
pub struct ShareService;

impl ShareService {
    /// Create a share service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compose the share message for `waypoints`
    ///
    /// Requires at least two waypoints.
    pub fn compose(&self, waypoints: &[Waypoint]) -> Result<ShareMessage, ApplicationError> {
        if waypoints.len() < MIN_ROUTE_WAYPOINTS {
            return Err(DomainError::insufficient_waypoints(waypoints.len()).into());
        }

        let text = format_summary(waypoints);
        let url = format!(
            "{WHATSAPP_SHARE_URL}{}",
            utf8_percent_encode(&text, SHARE_TEXT)
        );

        Ok(ShareMessage { text, url })
    }
}

fn format_summary(waypoints: &[Waypoint]) -> String {
    let mut text = format!("🗺️ Route with {} stops\n", waypoints.len());
    for (index, waypoint) in waypoints.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {} ({:.6}, {:.6})",
            index + 1,
            waypoint.address(),
            waypoint.latitude(),
            waypoint.longitude()
        ));
    }
    text.push_str(&format!("\n\n📍 {}", directions_link(waypoints)));
    text
}

/// Google Maps directions link visiting every waypoint in order
fn directions_link(waypoints: &[Waypoint]) -> String {
    let stops: Vec<String> = waypoints
        .iter()
        .map(|w| format!("{:.6},{:.6}", w.latitude(), w.longitude()))
        .collect();
    format!("https://www.google.com/maps/dir/{}", stops.join("/"))
}
