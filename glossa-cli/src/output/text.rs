//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::Glossary;
use std::io::Write;

/// Plain text formatter - one tab-separated term and definition per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_glossary(&mut self, source: Option<&str>, glossary: &Glossary) -> Result<()> {
        if let Some(source) = source {
            writeln!(self.writer, "==> {source} <==")?;
        }
        for record in glossary.entries() {
            writeln!(self.writer, "{}\t{}", record.term, record.definition)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use super::*;

    #[test]
    fn test_entries_one_per_line() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        formatter
            .format_glossary(
                None,
                &glossary(&[("Company", "Beagle Inc."), ("Buyer", "Acme Ltd.")]),
            )
            .unwrap();
        formatter.finish().unwrap();

        assert_eq!(
            buffer.contents(),
            "Company\tBeagle Inc.\nBuyer\tAcme Ltd.\n"
        );
    }

    #[test]
    fn test_named_documents_get_headers() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        formatter
            .format_glossary(Some("a.txt"), &glossary(&[("Company", "Beagle Inc.")]))
            .unwrap();
        formatter
            .format_glossary(Some("b.txt"), &Glossary::empty())
            .unwrap();

        assert_eq!(
            buffer.contents(),
            "==> a.txt <==\nCompany\tBeagle Inc.\n==> b.txt <==\n"
        );
    }
}
