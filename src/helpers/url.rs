//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::{SiteConfig, Transform};

/// Characters escaped in query values; image services expect literal commas
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/lisbon/") // -> "/travel/lisbon/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Append image service transform parameters to a preview URL
///
/// # Examples
/// ```ignore
/// transform_url("https://imgix.net/a.jpg", &Transform::thumbnail())
/// // -> "https://imgix.net/a.jpg?w=600&h=400&fit=crop&auto=format,compress"
/// ```
pub fn transform_url(preview_url: &str, transform: &Transform) -> String {
    let mut params: Vec<String> = Vec::new();

    if let Some(width) = transform.width {
        params.push(format!("w={}", width));
    }
    if let Some(height) = transform.height {
        params.push(format!("h={}", height));
    }
    if !transform.fit.is_empty() {
        params.push(format!("fit={}", encode_query_value(&transform.fit)));
    }
    if !transform.auto.is_empty() {
        params.push(format!("auto={}", encode_query_value(&transform.auto)));
    }

    if params.is_empty() {
        return preview_url.to_string();
    }

    let separator = if preview_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", preview_url, separator, params.join("&"))
}

/// Encode a query parameter value
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/travel/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/lisbon/"), "/travel/lisbon/");
        assert_eq!(url_for(&config, ""), "/travel/");
    }

    #[test]
    fn test_transform_url() {
        assert_eq!(
            transform_url("https://imgix.net/a.jpg", &Transform::thumbnail()),
            "https://imgix.net/a.jpg?w=600&h=400&fit=crop&auto=format,compress"
        );
        assert_eq!(
            transform_url("https://imgix.net/a.jpg?v=2", &Transform::full()),
            "https://imgix.net/a.jpg?v=2&w=1600&h=1200&fit=max&auto=format,compress"
        );
    }

    #[test]
    fn test_transform_url_skips_empty_fields() {
        let transform = Transform {
            width: Some(300),
            ..Default::default()
        };
        assert_eq!(transform_url("a.jpg", &transform), "a.jpg?w=300");
        assert_eq!(transform_url("a.jpg", &Transform::default()), "a.jpg");
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("format,compress"), "format,compress");
        assert_eq!(encode_query_value("a b&c"), "a%20b%26c");
    }
}
