use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

/// The single-page UI, compiled into the binary
#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

/// Serve the main index.html file
pub async fn index() -> Response {
    serve_asset("index.html")
}

pub async fn static_file(Path(path): Path<String>) -> Response {
    serve_asset(&path)
}

fn serve_asset(path: &str) -> Response {
    match Assets::get(path) {
        Some(file) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], file.data).into_response()
        },
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
