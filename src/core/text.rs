use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PAGE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*\d+\s+(?:de|of)\s+\d+\s*").unwrap());
static PAGE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^page\s+\d+.*").unwrap());

pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

/// Drops a leading "2 of 3" / "1 de 2" page counter left over from PDF footers.
pub fn strip_page_marker(value: &str) -> &str {
    match PAGE_MARKER_RE.find(value) {
        Some(m) => &value[m.end()..],
        None => value,
    }
}

/// Removes a page counter or a whole "Page N ..." line from a heading candidate.
pub fn strip_page_heading(line: &str) -> String {
    let without_marker = strip_page_marker(line.trim());
    PAGE_LINE_RE.replace(without_marker, "").trim().to_string()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}

/// Prefix of `value` holding at most `limit` characters, on a char boundary.
pub fn char_prefix(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

pub fn is_alpha_word(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

/// Alphabetic once hyphens and apostrophes are removed.
pub fn is_alpha_allowing_joiners(value: &str) -> bool {
    let stripped: String = value.chars().filter(|c| *c != '-' && *c != '\'').collect();
    is_alpha_word(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("JOHN ALLAN SMITH"), "John Allan Smith");
        assert_eq!(title_case("b.sc computer science"), "B.Sc Computer Science");
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
    }

    #[test]
    fn page_markers_are_removed() {
        assert_eq!(strip_page_marker("1 de 3 Maria Lopez"), "Maria Lopez");
        assert_eq!(strip_page_marker("2 of 4 John Doe"), "John Doe");
        assert_eq!(strip_page_marker("John Doe"), "John Doe");
        assert_eq!(strip_page_heading("Page 2 of 5"), "");
    }

    #[test]
    fn char_prefix_respects_multibyte_text() {
        assert_eq!(char_prefix("الاسم محمد", 5), "الاسم");
        assert_eq!(char_prefix("short", 50), "short");
    }

    #[test]
    fn alpha_checks_allow_joiners_only_when_asked() {
        assert!(is_alpha_allowing_joiners("Al-Sayed"));
        assert!(is_alpha_allowing_joiners("O'Brien"));
        assert!(!is_alpha_word("Al-Sayed"));
        assert!(!is_alpha_allowing_joiners("---"));
    }
}
