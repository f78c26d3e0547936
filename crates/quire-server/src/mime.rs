/// Fallback content type for unknown extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const TYPES: &[(&str, &str)] = &[
    ("pl", "text/x-prolog; charset=UTF-8"),
    ("txt", "text/plain; charset=UTF-8"),
    ("md", "text/markdown; charset=UTF-8"),
    ("json", "application/json"),
    ("js", "text/javascript; charset=UTF-8"),
    ("css", "text/css; charset=UTF-8"),
    ("html", "text/html; charset=UTF-8"),
    ("svg", "image/svg+xml"),
];

/// Content type for a stored document, derived from its file extension.
pub fn content_type_for(file: &str) -> &'static str {
    file.rsplit_once('.')
        .and_then(|(_, ext)| TYPES.iter().find(|(known, _)| known.eq_ignore_ascii_case(ext)))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
