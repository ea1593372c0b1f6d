//! Data models for documents and sheet grids.

use serde::{Deserialize, Serialize};

/// Flattened document record emitted by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Document title.
    pub title: String,
    /// Concatenated plain text of every text run inside paragraph elements,
    /// in document order.
    pub content: String,
}

/// Raw row-major cell grid from a sheet read, verbatim from the API.
pub type SheetGrid = Vec<Vec<String>>;

/// Docs API document resource, reduced to the parts the reader walks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Document body.
    #[serde(default)]
    pub body: Option<ApiBody>,
}

/// Body of a document: a list of structural elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBody {
    /// Structural elements in document order.
    #[serde(default)]
    pub content: Vec<ApiStructuralElement>,
}

/// One structural element; only paragraphs contribute text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStructuralElement {
    /// Present when the element is a paragraph.
    #[serde(default)]
    pub paragraph: Option<ApiParagraph>,
}

/// A paragraph's ordered child elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParagraph {
    /// Paragraph elements in order.
    #[serde(default)]
    pub elements: Vec<ApiParagraphElement>,
}

/// One paragraph element; only text runs contribute text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParagraphElement {
    /// Present when the element is a text run.
    #[serde(default)]
    pub text_run: Option<ApiTextRun>,
}

/// Literal text content of a run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTextRun {
    /// The text itself.
    #[serde(default)]
    pub content: Option<String>,
}

/// Sheets values response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiValueRange {
    /// Row-major cell values; absent when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

impl ApiDocument {
    /// Flattens the document into a [`DocumentRecord`].
    ///
    /// Concatenates `textRun` content inside `paragraph` elements in
    /// traversal order; every other structural element (tables, section
    /// breaks, and so on) is skipped.
    #[must_use]
    pub fn flatten(self) -> DocumentRecord {
        let content = self
            .body
            .map(|body| body.content)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|element| element.paragraph)
            .flat_map(|paragraph| paragraph.elements)
            .filter_map(|element| element.text_run)
            .filter_map(|run| run.content)
            .collect::<String>();

        DocumentRecord {
            title: self.title.unwrap_or_default(),
            content,
        }
    }
}
