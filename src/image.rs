// src/image.rs

//! Image URL normalization.
//!
//! The server hands out cover and avatar references either as full URLs or
//! as paths relative to an image host.

/// Resolves image references against a configured base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
}

impl ImageResolver {
    /// Create a resolver; trailing slashes on `base_url` are dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        base_url.truncate(base_url.trim_end_matches('/').len());
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a possibly relative reference into an absolute URL.
    ///
    /// # Examples
    /// ```
    /// use novel_client::image::ImageResolver;
    ///
    /// let images = ImageResolver::new("https://cdn.x");
    /// assert_eq!(images.resolve(Some("a/b.png"), ""), "https://cdn.x/a/b.png");
    /// assert_eq!(images.resolve(Some("/a/b.png"), ""), "https://cdn.x/a/b.png");
    /// assert_eq!(images.resolve(None, "default.png"), "default.png");
    /// ```
    pub fn resolve(&self, reference: Option<&str>, fallback: &str) -> String {
        let reference = match reference {
            Some(r) if !r.is_empty() => r,
            _ => return fallback.to_string(),
        };

        // Already absolute
        if is_full_url(reference) {
            return reference.to_string();
        }

        if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else {
            format!("{}/{}", self.base_url, reference)
        }
    }
}

/// Whether `url` carries an `http://` or `https://` scheme.
pub fn is_full_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Last path segment of an image URL.
///
/// # Examples
/// ```
/// use novel_client::image::file_name;
///
/// assert_eq!(file_name("https://cdn.x/covers/1.jpg"), "1.jpg");
/// assert_eq!(file_name(""), "");
/// ```
pub fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}
