//! HTML parser for results tables
//!
//! This module extracts the rows of the first results table on a page:
//! - Header labels from `thead th`
//! - Body rows from `tbody tr`, one cell per `td`
//! - Cell text is whitespace-trimmed

use crate::collector::row::{RawRow, RawTable};
use crate::FetchError;
use scraper::{ElementRef, Html, Selector};

/// Parses the first `<table>` on a results page
///
/// The header comes from `thead th` and is empty if the table has none.
///
/// Returns `FetchError::MissingTable` when the page has no table, which for a
/// client-rendered listing usually means the results were not ready yet.
///
/// # Example
///
/// ```
/// use finishline::collector::parse_results_table;
///
/// let html = r#"<table><tbody><tr><td> 1 </td><td>Jane</td></tr></tbody></table>"#;
/// let table = parse_results_table(html, "https://example.com/results").unwrap();
/// assert_eq!(table.rows[0].cells(), &["1".to_string(), "Jane".to_string()]);
/// ```
pub fn parse_results_table(html: &str, url: &str) -> Result<RawTable, FetchError> {
    let document = Html::parse_document(html);

    let table = document
        .select(&selector("table", url)?)
        .next()
        .ok_or_else(|| FetchError::MissingTable {
            url: url.to_string(),
        })?;

    let header = table
        .select(&selector("thead th", url)?)
        .map(cell_text)
        .collect();

    let cell_selector = selector("td", url)?;
    let rows = table
        .select(&selector("tbody tr", url)?)
        .map(|tr| RawRow::new(tr.select(&cell_selector).map(cell_text).collect()))
        .filter(|row| !row.is_empty())
        .collect();

    Ok(RawTable { header, rows })
}

/// Compiles a CSS selector
fn selector(css: &str, url: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::HtmlParse {
        url: url.to_string(),
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

/// Visible text of a cell with surrounding whitespace removed
fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
