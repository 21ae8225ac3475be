//! PDF text extraction.
//!
//! `pdf_extract` is synchronous and can chew CPU on large documents, so the
//! call runs on the blocking pool rather than a runtime worker.

use tokio::task;

use crate::error::SummariseError;

/// Extract the plain text of a PDF given its raw bytes.
///
/// Returns the trimmed text, which may be empty for image-only or blank
/// documents. Corrupt or encrypted files yield an extraction error.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, SummariseError> {
    let result = task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|err| SummariseError::Internal {
            detail: format!("extraction task panicked: {err}"),
        })?;

    match result {
        Ok(text) => Ok(text.trim().to_string()),
        Err(err) => Err(SummariseError::Extraction {
            detail: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn garbage_bytes_are_an_extraction_error() {
        let result = extract_pdf_text(b"this is not a pdf at all".to_vec()).await;
        match result {
            Err(SummariseError::Extraction { .. }) => {}
            other => panic!("expected extraction error, got {other:?}"),
        }
    }
}
