//! Header line parsing for the size probe.

use super::HeadResult;

/// Value of the last `name:` header in `lines`, trimmed. Names match case-insensitively.
fn header_value<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
    lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .filter(|(n, _)| n.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v.trim())
        .last()
}

pub(crate) fn parse_headers(lines: &[String]) -> HeadResult {
    HeadResult {
        content_length: header_value(lines, "content-length").and_then(|v| v.parse().ok()),
        accept_ranges: header_value(lines, "accept-ranges")
            .is_some_and(|v| v.eq_ignore_ascii_case("bytes")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_content_length_and_ranges() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Accept-Ranges: bytes",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert!(r.accept_ranges);
    }

    #[test]
    fn parse_headers_no_ranges() {
        let r = parse_headers(&lines(&["Content-Length: 999", "Accept-Ranges: none"]));
        assert_eq!(r.content_length, Some(999));
        assert!(!r.accept_ranges);
    }

    #[test]
    fn parse_headers_missing_or_garbage_length() {
        assert_eq!(parse_headers(&lines(&["HTTP/1.1 200 OK"])).content_length, None);
        assert_eq!(
            parse_headers(&lines(&["content-length: lots"])).content_length,
            None
        );
    }

    #[test]
    fn parse_headers_case_insensitive() {
        let r = parse_headers(&lines(&["CONTENT-LENGTH: 7", "accept-ranges: Bytes"]));
        assert_eq!(r.content_length, Some(7));
        assert!(r.accept_ranges);
    }

    #[test]
    fn parse_headers_last_value_wins() {
        let r = parse_headers(&lines(&["Content-Length: 1", "Content-Length: 2"]));
        assert_eq!(r.content_length, Some(2));
    }
}
