use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

static MAILTO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"mailto:[^\s<>'"\)]+"#).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Page text followed by any `mailto:` link targets found in the raw
    /// document, which often carry an address the visible text omits.
    pub fn extract_text(&self, data: &[u8]) -> anyhow::Result<String> {
        let mut text =
            pdf_extract::extract_text_from_mem(data).context("failed to extract PDF text")?;

        let links = extract_mailto_links(data);
        if !links.is_empty() {
            text.push('\n');
            text.push_str(&links.join("\n"));
        }

        Ok(text)
    }
}

fn extract_mailto_links(data: &[u8]) -> Vec<String> {
    let raw = String::from_utf8_lossy(data);
    let mut links: Vec<String> = Vec::new();
    for m in MAILTO_RE.find_iter(&raw) {
        let value = m.as_str().to_string();
        if !links
            .iter()
            .any(|existing: &String| existing.eq_ignore_ascii_case(&value))
        {
            links.push(value);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailto_links_are_deduplicated_case_insensitively() {
        let raw = b"<< /URI (mailto:Jane@Example.com) >> << /URI (mailto:jane@example.com) >> mailto:omar@acme.io";
        assert_eq!(
            extract_mailto_links(raw),
            vec!["mailto:Jane@Example.com", "mailto:omar@acme.io"]
        );
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(PdfTextExtractor::new().extract_text(b"not a pdf").is_err());
    }
}
