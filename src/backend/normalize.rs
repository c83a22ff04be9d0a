//! Backend base URL normalization

/// Endpoint segments that users paste by accident along with the base URL.
const ENDPOINT_SUFFIXES: [&str; 2] = ["/config", "/submit"];

/// Normalize a user-supplied backend base URL.
///
/// Trims whitespace, repairs a missing colon after the scheme, strips trailing
/// slashes, whitespace and accidental `/config` or `/submit` endpoints until
/// none remain, and prefixes
/// `http://` when no scheme is given. Blank input yields an empty string,
/// which callers treat as "no backend".
///
/// ```ignore
/// assert_eq!(normalize_backend("192.168.1.10:8080/"), "http://192.168.1.10:8080");
/// assert_eq!(normalize_backend("http//x:8080/config"), "http://x:8080");
/// ```
pub fn normalize_backend(raw: &str) -> String {
    let mut backend = repair_scheme_colon(raw.trim());

    loop {
        let trimmed_len = backend
            .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
            .len();
        backend.truncate(trimmed_len);

        let lower = backend.to_ascii_lowercase();
        match ENDPOINT_SUFFIXES
            .iter()
            .find(|suffix| lower.ends_with(*suffix))
        {
            Some(suffix) => backend.truncate(backend.len() - suffix.len()),
            None => break,
        }
    }

    if !backend.is_empty() && !has_http_scheme(&backend) {
        backend.insert_str(0, "http://");
    }
    backend
}

/// Resolve the backend to use: the field value, or the default when blank.
pub fn resolve_backend(field: &str, default_backend: &str) -> String {
    if field.trim().is_empty() {
        normalize_backend(default_backend)
    } else {
        normalize_backend(field)
    }
}

/// Join a normalized backend with an endpoint path such as `config`.
pub fn endpoint(backend: &str, path: &str) -> String {
    format!("{}/{}", backend, path.trim_start_matches('/'))
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// `http//host` and `https//host` lose their colon when typed on phone keyboards.
fn repair_scheme_colon(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    for scheme in ["https", "http"] {
        let broken = format!("{scheme}//");
        if lower.starts_with(&broken) {
            return format!("{}://{}", &value[..scheme.len()], &value[broken.len()..]);
        }
    }
    value.to_string()
}
