//! Google Doc and Sheet lookup handler.
//!
//! The `--google` value is a Docs or Sheets URL. The URL substring picks the
//! service: `document` reads a Doc, `spreadsheets` reads a Sheet. Credential
//! problems surface on the read, not at startup.

use gleaner::google::{GoogleError, GoogleReader};
use gleaner::{GleanerConfig, GleanerError};

use super::output;

/// Diagnostic hint printed when the reader is degraded.
const CREDENTIALS_HINT: &str = "Please check your google-credentials.json file \
                                and ensure it contains the correct information.";

/// Service surface a URL names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlKind {
    Document,
    Spreadsheet,
}

/// Classifies a URL by bare substring, document first.
fn classify(url: &str) -> Option<UrlKind> {
    if url.contains("document") {
        Some(UrlKind::Document)
    } else if url.contains("spreadsheets") {
        Some(UrlKind::Spreadsheet)
    } else {
        None
    }
}

/// Looks up a Google Doc or Sheet by URL and prints its record.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when the selector value is
/// absent, [`GoogleError::UnrecognisedUrl`] when the URL names neither
/// service, and propagates reader and output failures.
pub async fn run(config: &GleanerConfig) -> Result<(), GleanerError> {
    let url = config
        .google
        .as_deref()
        .ok_or_else(|| GleanerError::Configuration {
            message: "a Google Doc or Sheet URL is required".to_owned(),
        })?;
    let reader = GoogleReader::initialise().await;

    match classify(url) {
        Some(UrlKind::Document) => {
            let record = reader
                .read_document(url)
                .await
                .inspect_err(|error| hint_on_unavailable(config.debug, error))?;
            output::write_json(&record)
        }
        Some(UrlKind::Spreadsheet) => {
            let grid = reader
                .read_sheet(url)
                .await
                .inspect_err(|error| hint_on_unavailable(config.debug, error))?;
            output::write_json(&grid)
        }
        None => Err(GoogleError::UnrecognisedUrl {
            url: url.to_owned(),
        }
        .into()),
    }
}

fn hint_on_unavailable(debug: bool, error: &GoogleError) {
    if matches!(error, GoogleError::ServiceUnavailable { .. }) {
        output::write_diagnostic(debug, CREDENTIALS_HINT);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{UrlKind, classify};

    #[rstest]
    #[case::edit_url("https://docs.google.com/document/d/abc/edit", Some(UrlKind::Document))]
    #[case::query_parameter(
        "https://docs.google.com/open?id=abc&type=document",
        Some(UrlKind::Document)
    )]
    #[case::sheet("https://docs.google.com/spreadsheets/d/abc/edit", Some(UrlKind::Spreadsheet))]
    #[case::neither("https://example.com/some/page", None)]
    fn classifies_on_the_bare_substring(#[case] url: &str, #[case] expected: Option<UrlKind>) {
        assert_eq!(classify(url), expected, "classification mismatch for {url}");
    }
}
