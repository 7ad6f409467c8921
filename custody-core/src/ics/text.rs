//! Text-level helpers around the records we emit.
//!
//! Escaping and line folding are done by `icalendar` when the calendar is
//! written; these cover what it leaves to us.

use uuid::Uuid;

/// Domain appended to generated UIDs.
const UID_DOMAIN: &str = "harmonyhub.local";

/// Globally unique identifier for one VEVENT.
pub fn generate_uid() -> String {
    format!("{}@{}", Uuid::new_v4(), UID_DOMAIN)
}

/// Turn CRLF and lone CR into `\n`, the only line break TEXT values escape.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Reverse RFC 5545 TEXT escaping. Unknown escapes are kept verbatim.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_text_control_characters() {
        assert_eq!(unescape_text(r"a\,b\;c\\d\ne"), "a,b;c\\d\ne");
        assert_eq!(unescape_text(r"line1\Nline2"), "line1\nline2");
        assert_eq!(unescape_text("plain"), "plain");
    }

    #[test]
    fn test_unescape_keeps_unknown_escapes() {
        assert_eq!(unescape_text(r"C:\temp"), r"C:\temp");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_uids_are_unique() {
        let a = generate_uid();
        let b = generate_uid();
        assert_ne!(a, b);
        assert!(a.ends_with("@harmonyhub.local"));
    }
}
