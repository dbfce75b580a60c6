//! Plain-text acquisition for the formats a résumé usually arrives in.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::errors::CoreError;
use super::pdf::PdfTextExtractor;

#[derive(Debug, Clone, Default)]
pub struct ResumeDocumentParser {
    pdf_text_extractor: PdfTextExtractor,
}

impl ResumeDocumentParser {
    pub fn new(pdf_text_extractor: PdfTextExtractor) -> Self {
        Self { pdf_text_extractor }
    }

    /// Dispatches on the file extension. Read failures surface as
    /// [`CoreError::DocumentRead`], unknown extensions as
    /// [`CoreError::UnsupportedFileType`].
    pub fn extract_text(&self, file_name: &str, data: &[u8]) -> anyhow::Result<String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        let extracted = match extension.as_str() {
            "pdf" => self.pdf_text_extractor.extract_text(data),
            "docx" => extract_docx_text(data),
            "txt" => Ok(String::from_utf8_lossy(data).into_owned()),
            _ => return Err(CoreError::UnsupportedFileType(file_name.to_string()).into()),
        };

        extracted.map_err(|err| {
            CoreError::DocumentRead {
                path: file_name.to_string(),
                reason: format!("{err:#}"),
            }
            .into()
        })
    }
}

pub fn extract_text(file_name: &str, data: &[u8]) -> anyhow::Result<String> {
    ResumeDocumentParser::default().extract_text(file_name, data)
}

/// One line per `w:p` paragraph; `w:br` starts a new line, `w:tab` becomes a tab.
fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).context("not a DOCX archive")?;

    let mut document_file = archive
        .by_name("word/document.xml")
        .context("DOCX archive has no word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;

    fn flush(current: &mut String, lines: &mut Vec<String>) {
        if !current.trim().is_empty() {
            lines.push(current.trim().to_string());
        }
        current.clear();
    }

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    flush(&mut current, &mut lines);
                    in_paragraph = false;
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Empty(e)) if in_paragraph => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => flush(&mut current, &mut lines),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_paragraph && in_text_run {
                    let value = e.xml_content()?.into_owned();
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn docx_with(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let data = docx_with(
            r#"<w:p><w:r><w:t>Name:</w:t></w:r><w:r><w:t xml:space="preserve"> Omar Khaled</w:t></w:r></w:p>
               <w:p><w:r><w:t>Nationality</w:t><w:tab/><w:t>Egyptian</w:t></w:r></w:p>
               <w:p></w:p>
               <w:p><w:r><w:t>Cairo</w:t><w:br/><w:t>Egypt</w:t></w:r></w:p>"#,
        );
        let text = extract_text("cv.DOCX", &data).unwrap();
        assert_eq!(text, "Name: Omar Khaled\nNationality\tEgyptian\nCairo\nEgypt");
    }

    #[test]
    fn plain_text_is_decoded_lossily() {
        let text = extract_text("notes.txt", b"Email: a@b.io\n\xff").unwrap();
        assert!(text.starts_with("Email: a@b.io\n"));
    }

    #[test]
    fn unsupported_extension_is_typed() {
        let err = extract_text("cv.odt", b"whatever").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnsupportedFileType(name)) if name == "cv.odt"
        ));
    }

    #[test]
    fn corrupt_docx_is_a_read_error() {
        let err = extract_text("cv.docx", b"PK not really").unwrap_err();
        let core = err.downcast_ref::<CoreError>().unwrap();
        assert!(matches!(core, CoreError::DocumentRead { path, .. } if path == "cv.docx"));
        assert!(core.is_recoverable());
    }
}
