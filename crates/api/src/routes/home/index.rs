use axum::response::Html;

use crate::templates::home_page;

/// Lists the available routes.
pub async fn index_handler() -> Html<String> {
    Html(home_page().into_string())
}
