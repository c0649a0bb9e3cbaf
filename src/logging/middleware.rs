//! Request ID generation

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Every proxied request gets one so its log lines can be correlated.
///
/// # Examples
///
/// ```
/// use relay::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_parseable() {
        let id = generate_request_id();
        assert_eq!(id.chars().filter(|&c| c == '-').count(), 4);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_request_id_uniqueness() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
