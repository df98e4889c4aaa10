//! Glossary extraction entry point and builder

use crate::{
    assembler::{Glossary, ResultAssembler},
    candidates::{TermCandidateExtractor, WordOccurrenceIndex},
    config::{ExecutionMode, ExtractorConfig},
    error::{ConfigError, Result},
    filter::TermFilter,
    input::Input,
    matcher::PatternMatcher,
    normalizer::TextNormalizer,
    parser::{CommandParser, ConstituencyParser},
    resolver::DefinitionResolver,
    segmenter::SentenceSegmenter,
    stopwords::StopwordList,
    tokenize::{PennTokenizer, SakursSentenceSplitter, SentenceSplitter, WordTokenizer},
};
use std::sync::Arc;
use std::time::Instant;

/// Extracts defined terms and their definitions from contract text
///
/// One extractor can serve any number of documents; every run builds its own
/// indices.
pub struct DefinitionExtractor {
    config: ExtractorConfig,
    parser: Arc<dyn ConstituencyParser>,
    splitter: Arc<dyn SentenceSplitter>,
    tokenizer: Arc<dyn WordTokenizer>,
    stopwords: StopwordList,
    normalizer: TextNormalizer,
}

impl DefinitionExtractor {
    /// Start building an extractor
    pub fn builder() -> DefinitionExtractorBuilder {
        DefinitionExtractorBuilder::new()
    }

    /// Create an extractor from configuration alone
    ///
    /// The parser command must be set in `config.parser`.
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        DefinitionExtractorBuilder::new().config(config).build()
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a glossary, failing on unreadable input
    pub fn try_extract(&self, input: Input) -> Result<Glossary> {
        let started = Instant::now();
        let bytes = input.into_bytes()?;
        let text = self.normalizer.normalize_bytes(&bytes);
        self.run(&text, started)
    }

    /// Extract a glossary; any failure is logged and yields the empty result
    pub fn extract(&self, input: Input) -> Glossary {
        match self.try_extract(input) {
            Ok(glossary) => glossary,
            Err(e) => {
                log::error!("extraction failed: {e}");
                Glossary::empty()
            }
        }
    }

    /// Extract a glossary from already decoded text
    pub fn extract_text(&self, text: &str) -> Glossary {
        self.extract(Input::from_text(text))
    }

    fn run(&self, text: &str, started: Instant) -> Result<Glossary> {
        let config = &self.config;

        let sentences = SentenceSegmenter::new(
            self.splitter.as_ref(),
            config.segmentation.min_fragment_chars,
        )
        .segment(text);
        log::debug!("segmented {} bytes into {} sentences", text.len(), sentences.len());

        let mut terms = TermCandidateExtractor::new().extract(text, &self.stopwords);
        let words = WordOccurrenceIndex::build(text);
        TermFilter::new(config.filter).filter(&mut terms, &words, &sentences);
        drop(words);

        let matcher = PatternMatcher::new(
            self.parser.as_ref(),
            self.tokenizer.as_ref(),
            &config.matcher,
        );
        let resolved = DefinitionResolver::new(matcher, config.resolver, config.execution)
            .resolve(&terms, &sentences)?;

        let glossary = ResultAssembler::new().assemble(resolved, started.elapsed());
        log::debug!(
            "extracted {} definitions in {:?}",
            glossary.entries().len(),
            started.elapsed()
        );
        Ok(glossary)
    }
}

/// Builder for [`DefinitionExtractor`]
#[derive(Default)]
pub struct DefinitionExtractorBuilder {
    config: ExtractorConfig,
    parser: Option<Arc<dyn ConstituencyParser>>,
    splitter: Option<Arc<dyn SentenceSplitter>>,
    tokenizer: Option<Arc<dyn WordTokenizer>>,
    stopwords: Option<StopwordList>,
}

impl DefinitionExtractorBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific constituency parser instead of `config.parser.command`
    pub fn parser<P: ConstituencyParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Use a shared constituency parser
    pub fn shared_parser(mut self, parser: Arc<dyn ConstituencyParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Use a specific sentence splitter
    pub fn splitter<S: SentenceSplitter + 'static>(mut self, splitter: S) -> Self {
        self.splitter = Some(Arc::new(splitter));
        self
    }

    /// Use a specific word tokenizer
    pub fn tokenizer<T: WordTokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Use an explicit stopword list instead of the configured language
    pub fn stopwords(mut self, stopwords: StopwordList) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution.mode = mode;
        self
    }

    /// Set the worker thread count for parallel mode
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.execution.threads = threads;
        self
    }

    /// Build the extractor
    pub fn build(self) -> Result<DefinitionExtractor> {
        let config = self.config;
        config.validate()?;

        let parser = match self.parser {
            Some(parser) => parser,
            None => match CommandParser::from_config(&config.parser) {
                Some(command) => Arc::new(command) as Arc<dyn ConstituencyParser>,
                None => {
                    return Err(ConfigError::Invalid {
                        field: "parser.command",
                        reason: "no constituency parser configured".to_string(),
                    }
                    .into())
                }
            },
        };

        let splitter = match self.splitter {
            Some(splitter) => splitter,
            None => Arc::new(SakursSentenceSplitter::new(&config.segmentation.language)?),
        };
        let tokenizer = self
            .tokenizer
            .unwrap_or_else(|| Arc::new(PennTokenizer::new()));

        let stopwords = self.stopwords.unwrap_or_else(|| {
            let mut list = StopwordList::new(&config.stopwords.language);
            list.extend(&config.stopwords.extra);
            list
        });

        Ok(DefinitionExtractor {
            config,
            parser,
            splitter,
            tokenizer,
            stopwords,
            normalizer: TextNormalizer::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::test_support::{TableParser, MEANS_SENTENCE, MEANS_TREE, PRN_SENTENCE, PRN_TREE};

    fn extractor() -> DefinitionExtractor {
        DefinitionExtractor::builder()
            .parser(
                TableParser::default()
                    .with(MEANS_SENTENCE, MEANS_TREE)
                    .with(PRN_SENTENCE, PRN_TREE),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_parser() {
        let err = DefinitionExtractor::builder().build().err().unwrap();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::Invalid {
                field: "parser.command",
                ..
            })
        ));
    }

    #[test]
    fn test_build_from_command_config() {
        let mut config = ExtractorConfig::default();
        config.parser.command = vec!["true".to_string()];
        assert!(DefinitionExtractor::with_config(config).is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = ExtractorConfig::default();
        config.filter.tolerance = -1.0;
        let result = DefinitionExtractor::builder()
            .config(config)
            .parser(TableParser::default())
            .build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_parenthetical_document() {
        let text = "Beagle Inc. (the \"Company\") agrees to the terms.\n\nThe Company shall pay.\n\
                    Payment is due to Company on demand.\n";
        let glossary = extractor().extract_text(text);
        assert_eq!(glossary.get("Company"), Some("Beagle Inc."));
    }

    #[test]
    fn test_no_terms_yields_empty_result() {
        let glossary = extractor().extract_text("all lowercase text without any terms.");
        assert!(glossary.is_empty());
        assert_eq!(serde_json::to_string(&glossary).unwrap(), "{}");
    }

    #[test]
    fn test_unreadable_input_degrades_to_empty() {
        let glossary = extractor().extract(Input::from_file("/nonexistent/contract.txt"));
        assert!(glossary.is_empty());
        assert!(extractor()
            .try_extract(Input::from_file("/nonexistent/contract.txt"))
            .is_err());
    }
}
