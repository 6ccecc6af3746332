//! Freshness of a cached representation (RFC 9110 §13, RFC 9111 §4.3.2).
//!
//! [`is_fresh`] answers one question: given the client's conditional request
//! headers and the server's final response headers, may the server answer
//! `304 Not Modified` instead of resending the body?

use std::time::SystemTime;

use crate::http::Headers;
use crate::http::headers::{CACHE_CONTROL, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};

/// Returns `true` when the client's cached copy is still valid.
///
/// Rules, applied in order:
///
/// 1. No `If-None-Match` and no `If-Modified-Since` → stale.
/// 2. Request `Cache-Control: no-cache` → stale.
/// 3. `If-None-Match` other than `*` must list a tag equal to the response
///    `ETag` under weak comparison.
/// 4. `If-Modified-Since` requires a response `Last-Modified` that is not later
///    than it; unparsable dates count as stale.
///
/// # Examples
///
/// ```
/// use rttp_etag::fresh::is_fresh;
/// use rttp_etag::http::Headers;
///
/// let mut req = Headers::new();
/// req.insert("If-None-Match", "\"1-a\", W/\"11-b\"");
/// let mut res = Headers::new();
/// res.insert("ETag", "\"11-b\"");
///
/// assert!(is_fresh(&req, &res));
/// ```
pub fn is_fresh(request: &Headers, response: &Headers) -> bool {
    let none_match = request.get(IF_NONE_MATCH);
    let modified_since = request.get(IF_MODIFIED_SINCE);

    if none_match.is_none() && modified_since.is_none() {
        return false;
    }

    if request.get_all(CACHE_CONTROL).any(has_no_cache) {
        return false;
    }

    if let Some(none_match) = none_match {
        if none_match.trim() != "*" {
            let Some(etag) = response.get(ETAG) else {
                return false;
            };
            if !tag_list_matches(none_match, etag) {
                return false;
            }
        }
    }

    if let Some(since) = modified_since {
        let Some(last_modified) = response.get(LAST_MODIFIED) else {
            return false;
        };
        match (parse_date(last_modified), parse_date(since)) {
            (Some(last), Some(since)) if last <= since => {}
            _ => return false,
        }
    }

    true
}

fn has_no_cache(cache_control: &str) -> bool {
    cache_control
        .split(',')
        .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
}

// Weak comparison: two tags match if their opaque parts are identical,
// regardless of either side's `W/` marker.
fn tag_list_matches(list: &str, etag: &str) -> bool {
    let etag = opaque_tag(etag);
    list.split(',').map(opaque_tag).any(|tag| tag == etag)
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix("W/").unwrap_or(tag)
}

fn parse_date(value: &str) -> Option<SystemTime> {
    httpdate::parse_http_date(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        let mut h = Headers::new();
        for (name, value) in pairs {
            h.insert(*name, *value);
        }
        h
    }

    #[test]
    fn unconditional_request_is_stale() {
        let res = headers(&[(ETAG, "\"1-a\"")]);
        assert!(!is_fresh(&Headers::new(), &res));
    }

    #[test]
    fn exact_tag_match_is_fresh() {
        let req = headers(&[(IF_NONE_MATCH, "\"1-a\"")]);
        let res = headers(&[(ETAG, "\"1-a\"")]);
        assert!(is_fresh(&req, &res));
    }

    #[test]
    fn weak_comparison_ignores_prefix_on_either_side() {
        let res = headers(&[(ETAG, "W/\"1-a\"")]);
        assert!(is_fresh(&headers(&[(IF_NONE_MATCH, "\"1-a\"")]), &res));

        let res = headers(&[(ETAG, "\"1-a\"")]);
        assert!(is_fresh(&headers(&[(IF_NONE_MATCH, "W/\"1-a\"")]), &res));
    }

    #[test]
    fn mismatched_or_missing_tag_is_stale() {
        let req = headers(&[(IF_NONE_MATCH, "\"1-a\", \"2-b\"")]);
        assert!(!is_fresh(&req, &headers(&[(ETAG, "\"3-c\"")])));
        assert!(!is_fresh(&req, &Headers::new()));
    }

    #[test]
    fn unquoted_client_tag_does_not_match_quoted_etag() {
        let req = headers(&[(IF_NONE_MATCH, "1-a")]);
        assert!(!is_fresh(&req, &headers(&[(ETAG, "\"1-a\"")])));
    }

    #[test]
    fn star_matches_without_etag() {
        let req = headers(&[(IF_NONE_MATCH, "*")]);
        assert!(is_fresh(&req, &Headers::new()));
    }

    #[test]
    fn no_cache_forces_revalidation() {
        let req = headers(&[
            (IF_NONE_MATCH, "\"1-a\""),
            (CACHE_CONTROL, "max-age=0, No-Cache"),
        ]);
        assert!(!is_fresh(&req, &headers(&[(ETAG, "\"1-a\"")])));
    }

    #[test]
    fn modified_since_compares_dates() {
        let res = headers(&[(LAST_MODIFIED, "Wed, 21 Oct 2015 07:28:00 GMT")]);

        let later = headers(&[(IF_MODIFIED_SINCE, "Thu, 22 Oct 2015 07:28:00 GMT")]);
        assert!(is_fresh(&later, &res));

        let same = headers(&[(IF_MODIFIED_SINCE, "Wed, 21 Oct 2015 07:28:00 GMT")]);
        assert!(is_fresh(&same, &res));

        let earlier = headers(&[(IF_MODIFIED_SINCE, "Tue, 20 Oct 2015 07:28:00 GMT")]);
        assert!(!is_fresh(&earlier, &res));
    }

    #[test]
    fn modified_since_without_last_modified_or_bad_date_is_stale() {
        let req = headers(&[(IF_MODIFIED_SINCE, "Thu, 22 Oct 2015 07:28:00 GMT")]);
        assert!(!is_fresh(&req, &Headers::new()));

        let bad = headers(&[(IF_MODIFIED_SINCE, "yesterday")]);
        let res = headers(&[(LAST_MODIFIED, "Wed, 21 Oct 2015 07:28:00 GMT")]);
        assert!(!is_fresh(&bad, &res));
    }

    #[test]
    fn both_conditions_must_hold() {
        let req = headers(&[
            (IF_NONE_MATCH, "\"1-a\""),
            (IF_MODIFIED_SINCE, "Tue, 20 Oct 2015 07:28:00 GMT"),
        ]);
        let res = headers(&[
            (ETAG, "\"1-a\""),
            (LAST_MODIFIED, "Wed, 21 Oct 2015 07:28:00 GMT"),
        ]);
        assert!(!is_fresh(&req, &res));
    }
}
