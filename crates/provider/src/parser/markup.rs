/// Markup stripping and payload location.
///
/// BestHTTP's diagnostic logger wraps lines in Unity rich-text color markup
/// (`<b><color=yellow>` … `</color></b>`) so they render highlighted in the
/// editor console. The markup has to go before JSON decoding. Some lines also
/// carry a non-JSON prefix (typically a wall-clock timestamp) ahead of the
/// payload object, which is dropped by scanning for the first `{`.

use std::borrow::Cow;

/// Opening color-tag sequence emitted by the logger.
pub const MARKUP_OPEN: &str = "<b><color=yellow>";
/// Matching closing sequence.
pub const MARKUP_CLOSE: &str = "</color></b>";

/// Strip every occurrence of the two markup tokens from a line.
///
/// Returns `Cow::Borrowed` if neither token is present (the common case for
/// plain and garbage lines), or `Cow::Owned` with all occurrences removed.
/// Pure and total: never fails, leaves everything else untouched.
pub fn strip_markup(line: &str) -> Cow<'_, str> {
    // Quick scan: both tokens start with '<'. If the line has no '<' at all,
    // return the original slice immediately.
    if !line.contains('<') {
        return Cow::Borrowed(line);
    }
    if !line.contains(MARKUP_OPEN) && !line.contains(MARKUP_CLOSE) {
        return Cow::Borrowed(line);
    }

    let stripped = line.replace(MARKUP_OPEN, "").replace(MARKUP_CLOSE, "");
    Cow::Owned(stripped)
}

/// Locate the JSON payload within a sanitized line.
///
/// Drops every character before the first `{` (a noisy prefix such as a
/// timestamp). A `{` at index 0 means the line is already pure JSON and is
/// returned as-is; a line with no `{` is also returned as-is and will fail
/// JSON decoding naturally downstream.
///
/// This is a cheap byte scan, not a JSON tokenizer: brace balance is not
/// validated and a `{` inside a prefix string literal is not handled.
pub fn locate_payload(line: &str) -> &str {
    match line.find('{') {
        Some(idx) if idx > 0 => &line[idx..],
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────
    // strip_markup
    // ─────────────────────────────────────────────────────────

    #[test]
    fn strip_markup_cow_optimization() {
        // Ensure no allocation for plain lines
        let input = r#"{"t":0,"msg":"hello"}"#;
        match strip_markup(input) {
            Cow::Borrowed(s) => assert_eq!(s, input),
            Cow::Owned(_) => panic!("Should not have allocated"),
        }
    }

    #[test]
    fn strip_markup_wrapped_line() {
        let input = r#"<b><color=yellow>{"t":1}</color></b>"#;
        assert_eq!(strip_markup(input).as_ref(), r#"{"t":1}"#);
    }

    #[test]
    fn strip_markup_multiple_occurrences() {
        let input = "<b><color=yellow>a</color></b><b><color=yellow>b</color></b>";
        assert_eq!(strip_markup(input).as_ref(), "ab");
    }

    #[test]
    fn strip_markup_token_mid_line() {
        let input = "prefix <b><color=yellow>body</color></b> suffix";
        assert_eq!(strip_markup(input).as_ref(), "prefix body suffix");
    }

    #[test]
    fn strip_markup_unbalanced_tokens() {
        // Only one of the pair present: still removed
        assert_eq!(strip_markup("<b><color=yellow>open only").as_ref(), "open only");
        assert_eq!(strip_markup("close only</color></b>").as_ref(), "close only");
    }

    #[test]
    fn strip_markup_empty_input() {
        assert_eq!(strip_markup("").as_ref(), "");
    }

    #[test]
    fn strip_markup_leaves_other_tags_alone() {
        // Other angle-bracket text is not markup and survives
        let input = "<i>{\"t\":0}</i>";
        assert_eq!(strip_markup(input).as_ref(), input);
    }

    #[test]
    fn strip_markup_idempotent() {
        let inputs = [
            "plain text line",
            r#"<b><color=yellow>{"t":1}</color></b>"#,
            "",
            "2024-01-01 12:00:00 prefix {\"t\":0}",
        ];
        for input in inputs {
            let once = strip_markup(input).into_owned();
            let twice = strip_markup(&once).into_owned();
            assert_eq!(once, twice, "strip_markup not idempotent for {:?}", input);
        }
    }

    // ─────────────────────────────────────────────────────────
    // locate_payload
    // ─────────────────────────────────────────────────────────

    #[test]
    fn locate_pure_json_is_noop() {
        let line = r#"{"t":0,"msg":"hi"}"#;
        assert_eq!(locate_payload(line), line);
    }

    #[test]
    fn locate_drops_timestamp_prefix() {
        let line = r#"2024-06-01 10:30:00 {"t":0,"msg":"hi"}"#;
        assert_eq!(locate_payload(line), r#"{"t":0,"msg":"hi"}"#);
    }

    #[test]
    fn locate_no_brace_unchanged() {
        let line = "no json on this line";
        assert_eq!(locate_payload(line), line);
    }

    #[test]
    fn locate_empty_line() {
        assert_eq!(locate_payload(""), "");
    }

    #[test]
    fn locate_brace_at_end() {
        assert_eq!(locate_payload("garbage {"), "{");
    }

    #[test]
    fn locate_takes_first_brace() {
        // Not a tokenizer: the first '{' wins even if a later one starts the
        // real object
        let line = "pre{amble {\"t\":0}";
        assert_eq!(locate_payload(line), "{amble {\"t\":0}");
    }
}
