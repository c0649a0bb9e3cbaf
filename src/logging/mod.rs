//! Structured logging helpers
//!
//! Filter directive construction for `tracing-subscriber` and request ids
//! attached to every proxied request's span.

pub mod middleware;

pub use middleware::generate_request_id;

/// Build filter directives string from LoggingConfig
///
/// The base level comes first, followed by one `relay::<component>=<level>`
/// directive per configured component.
///
/// # Examples
///
/// ```
/// use relay::config::logging::{LogFormat, LoggingConfig};
/// use relay::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("api".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     log_payloads: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,relay::api=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",relay::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_only() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn test_filter_directives_sorted_components() {
        let mut levels = HashMap::new();
        levels.insert("client".to_string(), "trace".to_string());
        levels.insert("api".to_string(), "debug".to_string());
        let config = LoggingConfig {
            level: "warn".to_string(),
            component_levels: Some(levels),
            ..LoggingConfig::default()
        };
        assert_eq!(
            build_filter_directives(&config),
            "warn,relay::api=debug,relay::client=trace"
        );
    }
}
