//! Definition resolution
//!
//! Each surviving term is tried occurrence by occurrence, in document order,
//! until the pattern matcher yields a definition. Heading-like sentences are
//! skipped before any parsing happens.

use crate::candidates::TermOccurrenceIndex;
use crate::config::{ExecutionConfig, ExecutionMode, ResolverConfig};
use crate::error::Result;
use crate::matcher::PatternMatcher;
use crate::segmenter::SentenceList;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A term and its raw definition text
pub type ResolvedDefinition = (String, String);

/// Resolves definitions for every term of an occurrence index
pub struct DefinitionResolver<'a> {
    matcher: PatternMatcher<'a>,
    config: ResolverConfig,
    execution: ExecutionConfig,
}

impl<'a> DefinitionResolver<'a> {
    /// Create a resolver
    pub fn new(
        matcher: PatternMatcher<'a>,
        config: ResolverConfig,
        execution: ExecutionConfig,
    ) -> Self {
        Self {
            matcher,
            config,
            execution,
        }
    }

    /// Resolve every term, in order of first occurrence
    ///
    /// Terms without a definition are left out.
    pub fn resolve(
        &self,
        terms: &TermOccurrenceIndex,
        sentences: &SentenceList,
    ) -> Result<Vec<ResolvedDefinition>> {
        let ordered = terms.by_first_occurrence();

        let definitions: Vec<Option<String>> = match self.execution.mode {
            ExecutionMode::Sequential => ordered
                .iter()
                .map(|(term, offsets)| self.resolve_term(term, offsets, sentences))
                .collect(),
            ExecutionMode::Parallel => self.resolve_parallel(&ordered, sentences)?,
        };

        let resolved: Vec<ResolvedDefinition> = ordered
            .iter()
            .zip(definitions)
            .filter_map(|((term, _), definition)| definition.map(|d| (term.to_string(), d)))
            .collect();

        log::debug!(
            "resolved {} of {} terms ({:?})",
            resolved.len(),
            ordered.len(),
            self.execution.mode
        );
        Ok(resolved)
    }

    #[cfg(feature = "parallel")]
    fn resolve_parallel(
        &self,
        ordered: &[(&str, &[usize])],
        sentences: &SentenceList,
    ) -> Result<Vec<Option<String>>> {
        let threads = self.execution.threads.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| crate::error::EngineError::ThreadPool(e.to_string()))?;

        Ok(pool.install(|| {
            ordered
                .par_iter()
                .map(|(term, offsets)| self.resolve_term(term, offsets, sentences))
                .collect()
        }))
    }

    #[cfg(not(feature = "parallel"))]
    fn resolve_parallel(
        &self,
        ordered: &[(&str, &[usize])],
        sentences: &SentenceList,
    ) -> Result<Vec<Option<String>>> {
        log::warn!("built without the `parallel` feature; resolving sequentially");
        Ok(ordered
            .iter()
            .map(|(term, offsets)| self.resolve_term(term, offsets, sentences))
            .collect())
    }

    /// Try each occurrence of one term until a definition is found
    pub fn resolve_term(
        &self,
        term: &str,
        offsets: &[usize],
        sentences: &SentenceList,
    ) -> Option<String> {
        let mut current_sentence = None;
        let mut ordinal = 0;

        for &offset in offsets {
            let Some((index, sentence)) = sentences.containing(offset) else {
                continue;
            };
            if current_sentence != Some(index) {
                current_sentence = Some(index);
                ordinal = 0;
            }
            ordinal += 1;

            if sentence.is_all_caps(self.config.all_caps_ratio) {
                log::trace!("{term:?}: skipping heading sentence {index}");
                continue;
            }

            log::trace!("{term:?}: trying occurrence {ordinal} of sentence {index}");
            match self
                .matcher
                .extract_definition(term, &sentence.text, offset - sentence.start)
            {
                Ok(Some(definition)) if !definition.trim().is_empty() => return Some(definition),
                Ok(_) => {}
                Err(e) => log::warn!("{term:?} in sentence {index}: {e}"),
            }
        }

        None
    }
}
