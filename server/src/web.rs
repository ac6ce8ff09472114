use std::path::Path;
use tower_http::services::ServeDir;

/// Serve files from `dir`, with `/` mapped to `index.html`.
///
/// `ServeDir` refuses `..` segments (raw or percent-encoded) with a 404, so
/// requests cannot escape the directory.
pub fn static_files(dir: &Path) -> ServeDir {
    ServeDir::new(dir).append_index_html_on_directories(true)
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
