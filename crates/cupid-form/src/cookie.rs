use percent_encoding::percent_decode_str;

/// Name of the cookie holding the CSRF token.
pub(crate) const CSRF_COOKIE: &str = "csrftoken";

/// Returns the percent-decoded value of the named cookie in a `Cookie` header.
pub fn get_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
}
