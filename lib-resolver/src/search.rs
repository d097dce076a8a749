//! Search Fallback Selector.
//!
//! Used when a zone exists but carries no actionable directive: the query
//! becomes a web search against the caller's previously chosen engine.

use crate::error::{ResolveError, ResolveResult};
use crate::zone::strip_sigil;

/// Build the web-search redirect URL for a query.
///
/// Strips the leading sigil, URL-encodes the remaining term and substitutes
/// it for the first `%s` placeholder in the preference template. An absent
/// preference is surfaced as [`ResolveError::MissingPreference`] so the
/// caller can prompt the user for one; there is deliberately no hardcoded
/// default engine.
pub fn build_search_redirect(query: &str, preference: Option<&str>) -> ResolveResult<String> {
    let template = preference.ok_or(ResolveError::MissingPreference)?;
    let term = urlencoding::encode(strip_sigil(query));
    Ok(template.replacen("%s", &term, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_preference_is_surfaced() {
        assert_eq!(
            build_search_redirect("@bar", None),
            Err(ResolveError::MissingPreference)
        );
    }

    #[test]
    fn substitutes_sigil_stripped_query() {
        let url = build_search_redirect("@bar", Some("https://x/?q=%s")).unwrap();
        assert_eq!(url, "https://x/?q=bar");
    }

    #[test]
    fn only_the_first_placeholder_is_substituted() {
        let url = build_search_redirect("bar", Some("https://x/?q=%s&again=%s")).unwrap();
        assert_eq!(url, "https://x/?q=bar&again=%s");
    }

    #[test]
    fn search_term_is_url_encoded() {
        let url = build_search_redirect("@a b&c", Some("https://x/?q=%s")).unwrap();
        assert_eq!(url, "https://x/?q=a%20b%26c");
    }
}
