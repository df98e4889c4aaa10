//! Output formatting module

use anyhow::Result;
use glossa_engine::Glossary;
use std::io::Write;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the glossary of one document
    ///
    /// `source` names the document when several are processed in one run.
    fn format_glossary(&mut self, source: Option<&str>, glossary: &Glossary) -> Result<()>;

    /// Finalize output and flush the writer
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object per document, keyed by path for several documents
    Json,
    /// One tab-separated term and definition per line
    Text,
    /// Markdown table per document
    Markdown,
}

/// Create the formatter for `format` writing into `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn test_create_formatter_dispatches_on_format() {
        let buffer = SharedBuffer::default();
        let mut formatter = create_formatter(OutputFormat::Text, Box::new(buffer.clone()));

        formatter
            .format_glossary(None, &glossary(&[("Company", "Beagle Inc.")]))
            .unwrap();
        formatter.finish().unwrap();

        assert_eq!(buffer.contents(), "Company\tBeagle Inc.\n");
    }
}
