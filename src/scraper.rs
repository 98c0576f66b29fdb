use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::error::{AnalyzerError, Result};

const CONTENT_SELECTORS: [&str; 8] = [
    "article",
    "main",
    ".job-description",
    ".job-details",
    "#job-description",
    "#job-details",
    "div[class*='description']",
    "div[class*='details']",
];

pub fn scrape_job_url(url: &str) -> Result<String> {
    info!("Fetching job description from {}", url);
    let response_text = reqwest::blocking::get(url)?
        .error_for_status()?
        .text()?;
    extract_job_text(&response_text)
}

// first container with text, then <p>, then <body>
pub fn extract_job_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    for sel_str in CONTENT_SELECTORS {
        let text = collect_text(&document, sel_str, "\n\n")?;
        if !text.trim().is_empty() {
            debug!("Job text taken from '{}'", sel_str);
            return Ok(text.trim().to_string());
        }
    }

    let paragraphs = collect_text(&document, "p", "\n")?;
    if !paragraphs.trim().is_empty() {
        return Ok(paragraphs.trim().to_string());
    }

    let body = collect_text(&document, "body", "\n")?;
    if !body.trim().is_empty() {
        return Ok(body.trim().to_string());
    }

    Err(AnalyzerError::Scrape(
        "Could not extract any meaningful content from the page.".to_string(),
    ))
}

fn collect_text(document: &Html, sel_str: &str, separator: &str) -> Result<String> {
    let selector = Selector::parse(sel_str)
        .map_err(|e| AnalyzerError::Scrape(format!("bad selector '{sel_str}': {e}")))?;

    let mut extracted = String::new();
    for element in document.select(&selector) {
        let element_text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if element_text.is_empty() {
            continue;
        }
        extracted.push_str(&element_text);
        extracted.push_str(separator);
    }
    Ok(extracted)
}
