//! Browser page

use axum::response::Html;

/// The single-page map client
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
