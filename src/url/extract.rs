use url::Url;

/// Literal separator LLM-generated sources use to glue several URLs together
pub const MULTI_URL_MARKER: &str = " and ";

/// Outcome of expanding a raw, possibly-composite URL string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedUrls {
    /// Syntactically valid URLs, in the order they appeared
    pub urls: Vec<String>,

    /// The raw string the URLs were extracted from
    pub original: String,
}

impl ExtractedUrls {
    /// Returns the canonical URL used for display (the first valid one)
    pub fn primary(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    /// Returns true if no candidate survived parsing
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Returns true if the raw string glues several URLs together
pub fn is_composite(raw: &str) -> bool {
    raw.contains(MULTI_URL_MARKER)
}

/// Expands a raw source string into its valid URLs
///
/// # Extraction Steps
///
/// 1. Split on [`MULTI_URL_MARKER`] if present, else use the whole string
/// 2. Trim each candidate and parse it strictly; candidates that fail are
///    logged and dropped
/// 3. Keep the survivors in their original order
///
/// The candidate text is returned as written (trimmed), not re-serialized by
/// the parser, so `https://a.com` stays `https://a.com`.
///
/// # Examples
///
/// ```
/// use source_indexer::url::extract_valid_urls;
///
/// let extracted = extract_valid_urls("https://a.com and https://b.com");
/// assert_eq!(extracted.urls, vec!["https://a.com", "https://b.com"]);
///
/// let extracted = extract_valid_urls("not a url");
/// assert!(extracted.urls.is_empty());
/// ```
pub fn extract_valid_urls(raw: &str) -> ExtractedUrls {
    let candidates: Vec<&str> = if is_composite(raw) {
        raw.split(MULTI_URL_MARKER).collect()
    } else {
        vec![raw]
    };

    let urls = candidates
        .into_iter()
        .map(str::trim)
        .filter(|candidate| match Url::parse(candidate) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Dropping invalid URL candidate '{}': {}", candidate, e);
                false
            }
        })
        .map(str::to_string)
        .collect();

    ExtractedUrls {
        urls,
        original: raw.to_string(),
    }
}

/// Returns a display-ready URL for a possibly-composite source string
///
/// * `None` yields an empty string
/// * a plain string is returned trimmed
/// * a composite string yields its first valid URL, or the original string
///   when nothing parses
pub fn get_clean_url(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    if !is_composite(raw) {
        return raw.trim().to_string();
    }

    primary_url(raw).unwrap_or_else(|| raw.to_string())
}

/// Returns the first valid URL in a raw source string, if any
pub fn primary_url(raw: &str) -> Option<String> {
    extract_valid_urls(raw).urls.into_iter().next()
}
