//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::Glossary;
use std::io::Write;

/// Markdown formatter - outputs each glossary as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    definition_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            definition_count: 0,
        }
    }
}

/// Escape the table delimiter
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_glossary(&mut self, source: Option<&str>, glossary: &Glossary) -> Result<()> {
        if let Some(source) = source {
            writeln!(self.writer, "## {source}")?;
            writeln!(self.writer)?;
        }

        if glossary.is_empty() {
            writeln!(self.writer, "*No definitions found*")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| Term | Definition |")?;
        writeln!(self.writer, "| --- | --- |")?;
        for record in glossary.entries() {
            writeln!(
                self.writer,
                "| {} | {} |",
                cell(&record.term),
                cell(&record.definition)
            )?;
            self.definition_count += 1;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total definitions: {}*", self.definition_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
