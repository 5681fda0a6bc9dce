//! Text extraction for uploaded PDFs.
//!
//! The browser sends the file as a `data:application/pdf;base64,...` URL.
//! Extraction is plain `lopdf` page text; layout and tables are not kept.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lopdf::Document;
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("not a base64 data URL")]
    NotDataUrl,

    #[error("unsupported media type: {0}")]
    NotPdf(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF contains no extractable text")]
    NoText,
}

/// Decode a `data:<mime>;base64,<payload>` URL, requiring the PDF media type.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, PdfError> {
    let rest = url.trim().strip_prefix("data:").ok_or(PdfError::NotDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(PdfError::NotDataUrl)?;
    let mime = meta.strip_suffix(";base64").ok_or(PdfError::NotDataUrl)?;
    if !mime.eq_ignore_ascii_case(PDF_MIME) {
        return Err(PdfError::NotPdf(mime.to_string()));
    }
    Ok(STANDARD.decode(payload.trim())?)
}

/// Concatenate the text of every page, one page per line.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let doc = Document::load_mem(bytes)?;

    let mut full_text = String::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => {
                full_text.push_str(text.trim());
                full_text.push('\n');
            }
            Err(e) => tracing::debug!(page = page_num, error = %e, "Skipping unreadable PDF page"),
        }
    }

    if full_text.trim().is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(full_text)
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Decode and extract an uploaded document, truncated to `max_chars`.
pub fn document_text(file_data: &str, max_chars: usize) -> Result<String, PdfError> {
    let bytes = decode_data_url(file_data)?;
    let text = extract_text(&bytes)?;
    Ok(truncate_chars(&text, max_chars).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pdf_data_url() {
        let url = format!("data:application/pdf;base64,{}", STANDARD.encode(b"%PDF-1.4"));
        assert_eq!(decode_data_url(&url).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_rejects_other_media_types() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(b"png"));
        assert!(matches!(decode_data_url(&url), Err(PdfError::NotPdf(m)) if m == "image/png"));
    }

    #[test]
    fn test_rejects_plain_strings_and_bad_base64() {
        assert!(matches!(decode_data_url("hello"), Err(PdfError::NotDataUrl)));
        assert!(matches!(decode_data_url("data:application/pdf,raw"), Err(PdfError::NotDataUrl)));
        assert!(matches!(
            decode_data_url("data:application/pdf;base64,@@@"),
            Err(PdfError::Base64(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_not_a_pdf() {
        assert!(matches!(extract_text(b"definitely not a pdf"), Err(PdfError::Pdf(_))));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
