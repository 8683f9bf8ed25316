//! PDF processing module.

mod extractor;
mod table;

pub use extractor::{PdfContent, PdfExtractor, PdfPage};
pub use table::{RawTable, detect_tables, split_cells};
pub(crate) use table::is_blank_row;

use tracing::debug;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_page_texts(&self) -> Result<Vec<String>>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String> {
        let pages = self.extract_page_texts()?;
        let index = page.checked_sub(1).ok_or(PdfError::InvalidPage(page))? as usize;
        pages.into_iter().nth(index).ok_or(PdfError::InvalidPage(page))
    }

    /// Extract text from the entire PDF as one stream.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_page_texts()?.join("\n"))
    }

    /// Reconstruct the tables laid out on every page.
    fn extract_tables(&self) -> Result<Vec<RawTable>> {
        Ok(self
            .extract_page_texts()?
            .iter()
            .flat_map(|text| detect_tables(text))
            .collect())
    }

    /// Extract text and tables of every page in one pass.
    fn extract_all(&self) -> Result<PdfContent> {
        let page_texts = self.extract_page_texts()?;
        let mut pages = Vec::with_capacity(page_texts.len());
        let mut full_text = String::new();

        for (index, text) in page_texts.into_iter().enumerate() {
            if !full_text.is_empty() && !text.is_empty() {
                full_text.push('\n');
            }
            full_text.push_str(&text);

            let tables = detect_tables(&text);
            pages.push(PdfPage {
                number: index as u32 + 1,
                text,
                tables,
            });
        }

        debug!(
            "PDF content: {} pages, {} chars text, {} tables",
            pages.len(),
            full_text.len(),
            pages.iter().map(|p| p.tables.len()).sum::<usize>()
        );

        Ok(PdfContent {
            text: full_text,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct StaticPages(Vec<&'static str>);

    impl PdfProcessor for StaticPages {
        fn load(&mut self, _data: &[u8]) -> Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.0.len() as u32
        }

        fn extract_page_texts(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    #[test]
    fn test_extract_all_joins_pages() {
        let processor = StaticPages(vec!["Janvier 2025 Agents", "", "Jour  Tickets N2\n1  5"]);
        let content = processor.extract_all().unwrap();

        assert_eq!(content.text, "Janvier 2025 Agents\nJour  Tickets N2\n1  5");
        assert_eq!(content.pages.len(), 3);
        assert_eq!(content.pages[2].number, 3);
        assert_eq!(content.tables().len(), 1);
        assert_eq!(processor.extract_tables().unwrap(), content.tables());
    }

    #[test]
    fn test_extract_page_text_bounds() {
        let processor = StaticPages(vec!["one", "two"]);
        assert_eq!(processor.extract_page_text(2).unwrap(), "two");
        assert!(matches!(processor.extract_page_text(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(processor.extract_page_text(3), Err(PdfError::InvalidPage(3))));
    }
}
