use lopdf::Document;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Text of every page in document order, one trailing newline per page.
/// Pages whose text is empty or whitespace-only are skipped.
pub fn extract_text_from_pdf(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();

    let mut text = String::new();
    let mut skipped = 0usize;
    for (page_num, _page_id) in &pages {
        let page_text = match doc.extract_text(&[*page_num]) {
            Ok(page_text) => page_text,
            Err(e) => {
                warn!("No text extracted from page {}: {}", page_num, e);
                String::new()
            }
        };
        if page_text.trim().is_empty() {
            debug!("Page {} has no extractable text", page_num);
            skipped += 1;
            continue;
        }
        text.push_str(page_text.trim_matches(|c: char| c == '\n' || c == '\r'));
        text.push('\n');
    }

    info!(
        "Extracted {} chars from {} pages ({} without text)",
        text.len(),
        pages.len(),
        skipped
    );
    Ok(text)
}
