//! PDF document loader backed by lopdf

use std::path::Path;

use lopdf::{Document as PdfDocument, Object};

use crate::error::{Error, Result};
use crate::providers::DocumentLoader;
use crate::types::{DocMetadata, Page, RawDocument};

pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read a string entry from the document Info dictionary
    fn info_string(pdf: &PdfDocument, key: &[u8]) -> Option<String> {
        let info = match pdf.trailer.get(b"Info").ok()? {
            Object::Reference(id) => pdf.get_object(*id).ok()?,
            direct => direct,
        };
        let dict = info.as_dict().ok()?;
        match dict.get(key).ok()? {
            Object::String(bytes, _) => {
                let text = decode_pdf_string(bytes);
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            _ => None,
        }
    }
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<RawDocument> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let pdf = PdfDocument::load(path).map_err(|e| Error::load(&filename, e.to_string()))?;

        // BTreeMap keys give pages in document order.
        let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
        let total_pages = page_numbers.len();
        if total_pages == 0 {
            return Err(Error::load(&filename, "document has no pages"));
        }

        let mut pages = Vec::with_capacity(total_pages);
        for (index, number) in page_numbers.into_iter().enumerate() {
            let content = pdf
                .extract_text(&[number])
                .map_err(|e| Error::load(&filename, format!("page {number}: {e}")))?;
            pages.push(Page { index, content });
        }

        let metadata = DocMetadata {
            title: Self::info_string(&pdf, b"Title"),
            author: Self::info_string(&pdf, b"Author"),
            subject: Self::info_string(&pdf, b"Subject"),
        };

        Ok(RawDocument {
            doc_id: doc_id_from_filename(&filename),
            pages,
            total_pages,
            metadata,
        })
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

/// PDF text strings are either UTF-16BE with a BOM or a latin-ish byte string
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Stable document identifier from the source filename stem
fn doc_id_from_filename(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map(|(s, _)| s).unwrap_or(filename);
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
