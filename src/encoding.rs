//! Character encoding detection and transcoding for byte input.
//!
//! A byte order mark wins; otherwise the declared charset is read from the
//! document head. The bytes are then decoded to UTF-8 with `encoding_rs`.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes of the document inspected for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#,
    )
    .expect("valid regex")
});

/// Encoding of `html`: its byte order mark, else the charset declared in the
/// first kilobyte, else UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*META_CHARSET_RE, &*HTTP_EQUIV_CHARSET_RE]
        .into_iter()
        .filter_map(|re| declared_label(re, &head))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn declared_label(re: &Regex, head: &str) -> Option<String> {
    re.captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Undecodable sequences are replaced with U+FFFD rather than failing. A
/// leading byte order mark is stripped.
///
/// ```
/// use html_to_rich_text::encoding::transcode_to_utf8;
///
/// let html = b"<p>Caf\xE9</p><meta charset=\"windows-1252\">";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let (decoded, used, had_errors) = detect_encoding(html).decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced undecodable bytes");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8_without_declaration() {
        assert_eq!(detect_encoding(b"<p>plain</p>"), UTF_8);
    }

    #[test]
    fn reads_meta_charset() {
        let html = br#"<meta charset="ISO-8859-1"><p>x</p>"#;
        // WHATWG maps ISO-8859-1 to windows-1252
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn reads_http_equiv_content_type() {
        let html = br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=windows-1252">"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let html = br#"<meta charset="not-a-charset">"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn declaration_after_sniff_window_is_ignored() {
        let mut html = vec![b' '; SNIFF_LEN];
        html.extend_from_slice(br#"<meta charset="windows-1252">"#);
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn transcodes_windows1252_quotes() {
        let html = b"<meta charset=\"windows-1252\"><p>\x93Hi\x94</p>";
        assert!(transcode_to_utf8(html).contains("\u{201C}Hi\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let out = transcode_to_utf8(b"<p>ok \xFF end</p>");
        assert!(out.contains('\u{FFFD}'));
        assert!(out.contains("end"));
    }

    #[test]
    fn byte_order_mark_overrides_declaration() {
        let mut html = vec![0xFF, 0xFE];
        for unit in "<meta charset=\"windows-1252\"><p>\u{e9}</p>".encode_utf16() {
            html.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&html).name(), "UTF-16LE");
        assert!(transcode_to_utf8(&html).contains("<p>\u{e9}</p>"));
    }

    #[test]
    fn utf8_byte_order_mark_is_stripped() {
        let out = transcode_to_utf8(b"\xEF\xBB\xBF<p>x</p>");
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn first_matching_declaration_wins() {
        let html = br#"<meta charset="koi8-r"><meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
        assert_eq!(detect_encoding(html).name(), "KOI8-R");
    }

    #[test]
    fn unquoted_self_closing_charset() {
        assert_eq!(detect_encoding(b"<meta charset=gbk/>").name(), "GBK");
    }
}
