//! Inline HTML pages: preference form, usage page and the informational
//! pages for transfer/bid states.

use lib_resolver::strip_sigil;

use crate::config::SearchEngines;
use crate::cookie::COOKIE_NAME;

const PAGE_STYLE: &str = "body { font-family: sans-serif; max-width: 700px; margin: 2em auto; \
    padding: 1.5em; border: 1px solid #ddd; border-radius: 8px; } \
    a { color: #007bff; text-decoration: none; } a:hover { text-decoration: underline; } \
    .action-link { display: inline-block; margin-top: 1.5em; padding: 0.8em 1.5em; \
    background-color: #007bff; color: white; border-radius: 5px; font-weight: bold; }";

/// Escape text for interpolation into HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Search-engine selection form, shown until the preference cookie exists.
pub fn engine_selection_form(engines: &SearchEngines, current_query: Option<&str>) -> String {
    let query = escape_html(current_query.unwrap_or(""));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Select Search Engine</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Choose Your Default Search Engine</h1>
    <p>Since you haven't set a default search engine preference for non-Space queries, please select one below.</p>
    <form action="/set_search_cookie" method="POST">
        <input type="hidden" name="q" value="{query}">
        <label for="search_engine_url">Search Engine:</label>
        <select id="search_engine_url" name="search_engine_url" required>
            <option value="{google}">Google</option>
            <option value="{duckduckgo}">DuckDuckGo</option>
            <option value="{bing}">Bing</option>
            <option value="{yahoo}">Yahoo</option>
            <option value="{yandex}">Yandex</option>
        </select>
        <label for="search_engine_custom">Custom Search Engine Query:</label>
        <input type="text" id="search_engine_custom" name="search_engine_custom" value="" placeholder="Enter your search engine with %s for the query">
        <button type="submit">Set Preference &amp; Search</button>
    </form>
</body>
</html>"#,
        google = escape_html(&engines.google),
        duckduckgo = escape_html(&engines.duckduckgo),
        bing = escape_html(&engines.bing),
        yahoo = escape_html(&engines.yahoo),
        yandex = escape_html(&engines.yandex),
    )
}

/// Usage page, shown when the `q` parameter is missing.
pub fn usage_page(example_url: &str) -> String {
    let example = escape_html(example_url);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Spaces Search Engine Proxy</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Spaces Search Engine Proxy</h1>
    <p>Query parameter "q" is required.</p>
    <h2>Example Usage</h2>
    <p>Try querying a space by adding the "q" parameter:</p>
    <p><a href="{example}">{example}</a></p>
</body>
</html>"#
    )
}

/// Informational page for a space in a transfer state.
pub fn transfer_page(space: &str, pinning_url: &str) -> String {
    let space = escape_html(space);
    let pinning = escape_html(pinning_url);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Space Transferring - {space}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Are you the owner of {space}?</h1>
    <p>This space is currently in a transfer state and has no active DNS records.</p>
    <p>If you are the owner, consider using the <strong>Spaces Pinning Service</strong> to ensure your records remain available even during transfers or lapses.</p>
    <a href="{pinning}" target="_blank" class="action-link">Learn about the Pinning Service</a>
</body>
</html>"#
    )
}

/// Informational page for a space that is up for bidding.
pub fn bid_page(space: &str, explorer_url: &str, pinning_url: &str) -> String {
    let explorer = escape_html(&format!("{explorer_url}{}", strip_sigil(space)));
    let space = escape_html(space);
    let pinning = escape_html(pinning_url);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Space Bidding - {space}</title>
    <style>{PAGE_STYLE}</style>
</head>
<body>
    <h1>Are you bidding on {space}?</h1>
    <p>This space is currently open for bidding.</p>
    <p>If you are interested in bidding on {space}, please visit the <a href="{explorer}" target="_blank">Spaces Explorer</a> to learn more.</p>
    <p>If you are the winner, consider using the <strong>Spaces Pinning Service</strong> to ensure your content remains available to the public.</p>
    <a href="{pinning}" target="_blank" class="action-link">Learn about the Pinning Service</a>
</body>
</html>"#
    )
}
