//! JSONP callback handling.
//!
//! The callback name comes straight from the query string and is written
//! into a script body unquoted, so it must be a plain dotted identifier
//! chain before it is used.

use std::sync::LazyLock;

use regex::Regex;

/// Query parameter that switches a JSON response into JSONP mode.
pub const CALLBACK_PARAM: &str = "_callback";

static SAFE_CALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*\.)*[A-Za-z_][A-Za-z0-9_]*$")
        .expect("callback pattern compiles")
});

/// Whether `expr` can be emitted verbatim as a JavaScript callee.
///
/// Reserved words such as `delete` match the grammar and are accepted.
///
/// # Example
///
/// ```
/// # use codeserver::response::callback::is_safe_callback;
/// assert!(is_safe_callback("window.app.onData"));
/// assert!(!is_safe_callback("alert(1)//"));
/// ```
pub fn is_safe_callback(expr: &str) -> bool {
    SAFE_CALLBACK.is_match(expr)
}

/// Finds the first parameter named `name` in a raw query string.
///
/// Keys and values are percent-decoded before comparison. Empty segments
/// are skipped, and a segment without `=` is a key with an empty value.
pub fn get_parameter(raw_query: Option<&str>, name: &str) -> Option<String> {
    let query = raw_query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// The `_callback` parameter of a raw query string.
pub fn callback_parameter(raw_query: Option<&str>) -> Option<String> {
    get_parameter(raw_query, CALLBACK_PARAM)
}
