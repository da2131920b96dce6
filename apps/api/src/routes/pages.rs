use axum::response::Html;

// Static pages; all dynamic data is fetched by the browser from /api/*.
const INDEX_HTML: &str = include_str!("../../templates/index.html");
const SETUP_HTML: &str = include_str!("../../templates/setup.html");
const RESULTS_HTML: &str = include_str!("../../templates/results.html");

/// GET /
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /setup
pub async fn setup_page() -> Html<&'static str> {
    Html(SETUP_HTML)
}

/// GET /results
pub async fn results_page() -> Html<&'static str> {
    Html(RESULTS_HTML)
}
