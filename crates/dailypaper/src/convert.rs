//! Document-to-text conversion.
//!
//! Summary generation only needs "give me the text of this file", so conversion sits behind the
//! [`DocumentConverter`] trait. [`PdfConverter`] is the production implementation built on lopdf;
//! tests substitute their own converters.

use lopdf::Document;

use super::*;

/// Converts a document on disk into plain text.
pub trait DocumentConverter {
  /// Returns the text content of the document at `path`.
  ///
  /// An empty string is a successful conversion of a document with no extractable text.
  fn convert(&self, path: &Path) -> Result<String>;
}

impl<C: DocumentConverter + ?Sized> DocumentConverter for &C {
  fn convert(&self, path: &Path) -> Result<String> { (**self).convert(path) }
}

/// Extracts the text of every page of a PDF, in page order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfConverter;

impl PdfConverter {
  /// Creates a new converter.
  pub fn new() -> Self { Self }
}

impl DocumentConverter for PdfConverter {
  fn convert(&self, path: &Path) -> Result<String> {
    let doc = Document::load(path)?;
    if doc.is_encrypted() {
      return Err(DailyPaperError::Conversion(format!("{} is encrypted", path.display())));
    }

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    trace!("{} has {} pages", path.display(), pages.len());

    let mut text = String::new();
    for page in pages {
      match doc.extract_text(&[page]) {
        Ok(page_text) => {
          text.push_str(page_text.trim_end());
          text.push_str("\n\n");
        },
        // Undecodable pages are dropped, the rest of the document still counts.
        Err(e) => warn!("Could not extract text from page {page} of {}: {e}", path.display()),
      }
    }

    let title = document_title(&doc);
    if let Some(title) = title.filter(|t| !t.is_empty() && !text.contains(t.as_str())) {
      text.insert_str(0, &format!("{title}\n\n"));
    }

    Ok(text.trim_end().to_string())
  }
}

/// Reads the `Title` entry of the document information dictionary, if any.
fn document_title(doc: &Document) -> Option<String> {
  let info = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
  let dict = doc.get_object(info).and_then(|obj| obj.as_dict()).ok()?;
  let bytes = dict.get(b"Title").ok()?.as_str().ok()?;

  // Text strings starting with the UTF-16BE byte order mark are UTF-16.
  let title = if let Some(utf16) = bytes.strip_prefix(&[0xFE_u8, 0xFF][..]) {
    let units: Vec<u16> =
      utf16.chunks_exact(2).map(|pair| u16::from_be_bytes([pair[0], pair[1]])).collect();
    String::from_utf16_lossy(&units)
  } else {
    String::from_utf8_lossy(bytes).into_owned()
  };
  Some(title.trim().to_string())
}
