//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::Glossary;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter - buffers glossaries and writes them on finish
///
/// A single unnamed document is written as its glossary object; named
/// documents are collected into one object keyed by path.
pub struct JsonFormatter<W: Write> {
    writer: W,
    single: Option<Glossary>,
    keyed: BTreeMap<String, Glossary>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            single: None,
            keyed: BTreeMap::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_glossary(&mut self, source: Option<&str>, glossary: &Glossary) -> Result<()> {
        match source {
            Some(source) => {
                self.keyed.insert(source.to_string(), glossary.clone());
            }
            None => self.single = Some(glossary.clone()),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match self.single.take() {
            Some(glossary) if self.keyed.is_empty() => {
                serde_json::to_writer_pretty(&mut self.writer, &glossary)?
            }
            single => {
                if single.is_some() {
                    log::warn!("Unnamed glossary dropped from keyed JSON output");
                }
                serde_json::to_writer_pretty(&mut self.writer, &self.keyed)?
            }
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
