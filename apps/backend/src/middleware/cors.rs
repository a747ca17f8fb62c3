use actix_cors::Cors;
use actix_web::http::header;

/// Origins used when none are configured: the web client and the
/// Streamlit-style front end on localhost.
pub const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8501",
    "http://127.0.0.1:8501",
];

/// Keep only `http(s)://` entries, dropping blanks and `"null"`.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS for the game API: explicit origins, only the methods and headers the
/// API uses, and `x-trace-id` readable by the browser.
pub fn cors_middleware(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-trace-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    if origins.is_empty() {
        for origin in DEFAULT_ORIGINS {
            cors = cors.allowed_origin(origin);
        }
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
