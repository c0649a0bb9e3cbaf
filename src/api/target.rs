//! Upstream target URL construction.

use axum::http::Uri;

/// Where one inbound request is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    /// Captured path segments joined with `/`. Empty for zero segments.
    pub sub_path: String,
    /// Absolute upstream URL including the original query string.
    pub url: String,
}

impl ProxyTarget {
    /// Resolve a target from a URI whose path is already relative to the
    /// proxy prefix (as seen inside a nested service).
    pub fn resolve(base_url: &str, relative: &Uri) -> Self {
        let segments = split_segments(relative.path());
        let sub_path = segments.join("/");
        let url = build_target_url(base_url, &sub_path, relative.query());
        Self { sub_path, url }
    }
}

/// Split a path into its non-empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join `base_url`, the sub-path and the raw query string.
///
/// The result is always `<base>/<sub_path>` followed by `?<query>` when the
/// query is non-empty. A trailing `/` on the base is not doubled.
///
/// ```
/// use relay::api::target::build_target_url;
///
/// assert_eq!(
///     build_target_url("https://host/webhook", "a/b/c", Some("x=1")),
///     "https://host/webhook/a/b/c?x=1"
/// );
/// assert_eq!(build_target_url("https://host/webhook/", "", None), "https://host/webhook/");
/// ```
pub fn build_target_url(base_url: &str, sub_path: &str, query: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}/{}?{}", base, sub_path, q),
        None => format!("{}/{}", base, sub_path),
    }
}
