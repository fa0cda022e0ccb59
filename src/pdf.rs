use anyhow::Context;

/// Recovers linearized text from a fetched PDF. The row extractors only
/// ever see this text; no binary PDF structure leaks past this boundary.
pub fn text_from_pdf_bytes(file_bytes: &[u8]) -> anyhow::Result<String> {
    let text = pdf_extract::extract_text_from_mem(file_bytes)
        .context("failed to extract text from pdf")?;
    Ok(text)
}
