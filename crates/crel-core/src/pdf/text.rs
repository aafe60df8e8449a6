//! Plain-text documents.

use super::PageSource;

/// Form feed, the conventional page break in text dumps of PDFs.
pub const PAGE_SEPARATOR: char = '\x0c';

/// A plain-text document split into pages on form feeds.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    pages: Vec<Option<String>>,
}

impl TextDocument {
    /// Split text into pages on [`PAGE_SEPARATOR`].
    pub fn new(text: &str) -> Self {
        Self::from_pages(text.split(PAGE_SEPARATOR))
    }

    /// Build a document from already separated pages.
    ///
    /// Blank pages are kept in the page count but report no text.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages = pages
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                (!p.trim().is_empty()).then(|| p.to_string())
            })
            .collect();
        Self { pages }
    }
}

impl PageSource for TextDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Option<&str> {
        let idx = page.checked_sub(1)? as usize;
        self.pages.get(idx)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_form_feed() {
        let doc = TextDocument::new("first\x0c  \n \x0cthird");
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page_text(1), Some("first"));
        assert_eq!(doc.page_text(2), None);
        assert_eq!(doc.page_text(3), Some("third"));
    }

    #[test]
    fn test_out_of_range_pages() {
        let doc = TextDocument::new("only");
        assert_eq!(doc.page_text(0), None);
        assert_eq!(doc.page_text(2), None);
    }

    #[test]
    fn test_empty_text_has_one_blank_page() {
        let doc = TextDocument::new("");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_text(1), None);
    }
}
