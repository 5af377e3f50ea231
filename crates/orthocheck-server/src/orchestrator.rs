//! Spelling check orchestration: tokenize, classify, persist.

use std::sync::Arc;

use orthocheck_core::{SpellCheckRecord, TextVerdict, WordCheck};
use time::OffsetDateTime;

use crate::cache::{keys, TypedCache};
use crate::dictionary::DictionaryLookup;
use crate::service::{CategoryService, Result, SpellCheckService};

/// Drives a whole check request: splits text into words, classifies each
/// against the dictionary, and upserts one record per distinct word tagged
/// with the default category.
///
/// Two cache layers sit in front of the dictionary: the whole-text key
/// memoizes the ordered result list of an identical prior request, and the
/// per-word key memoizes individual classifications across requests.
#[derive(Clone)]
pub struct SpellCheckOrchestrator {
    dictionary: Arc<dyn DictionaryLookup>,
    cache: TypedCache,
    categories: CategoryService,
    spell_checks: SpellCheckService,
}

impl SpellCheckOrchestrator {
    pub fn new(
        dictionary: Arc<dyn DictionaryLookup>,
        cache: TypedCache,
        categories: CategoryService,
        spell_checks: SpellCheckService,
    ) -> Self {
        Self {
            dictionary,
            cache,
            categories,
            spell_checks,
        }
    }

    /// Checks every word of `text` and returns the results in input order.
    ///
    /// Duplicate words appear once per occurrence in the output but collapse
    /// to a single persisted row. A lookup failure for one word becomes that
    /// word's result instead of failing the request.
    pub async fn process_text(&self, text: &str) -> Result<Vec<WordCheck>> {
        orthocheck_core::require_non_empty("text", text)?;

        let text_key = keys::text_checks(text);
        if let Some(cached) = self.cache.get::<Vec<WordCheck>>(&text_key) {
            tracing::debug!(text = %text, "serving memoized text result");
            return Ok(cached);
        }

        let mut results = Vec::new();
        for word in text.split_whitespace() {
            results.push(self.check_word(word).await);
        }

        let default_category = self.categories.get_or_create_default().await?;
        for check in &results {
            let mut record = self.spell_checks.get_or_create_for_word(check).await?;
            record.attach_category(default_category.clone());
            self.spell_checks.save(record).await?;
        }

        self.cache.put(&text_key, &results);
        Ok(results)
    }

    /// Classifies one word, consulting the per-word cache first.
    ///
    /// Every outcome is cached, lookup failures included; with no expiry a
    /// cached failure sticks until the process restarts.
    async fn check_word(&self, word: &str) -> WordCheck {
        let key = keys::word_check(word);
        if let Some(cached) = self.cache.get::<WordCheck>(&key) {
            return cached;
        }

        let check = match self.dictionary.lookup(word).await {
            Ok(true) => WordCheck::correct(word),
            Ok(false) => WordCheck::misspelled(word),
            Err(e) => WordCheck::lookup_failed(word, e.to_string()),
        };

        self.cache.put(&key, &check);
        check
    }

    /// Checks a batch of texts and persists one summary record for the run.
    ///
    /// Each text goes through [`process_text`](Self::process_text); an
    /// empty or whitespace-only text yields a failed verdict instead of
    /// aborting the batch. The summary row is named after the current
    /// unix-millis timestamp, lists the failed texts in its error field,
    /// and is written even when every text passed. An empty batch returns
    /// empty and writes nothing.
    pub async fn process_bulk(&self, texts: &[String]) -> Result<Vec<TextVerdict>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut verdicts = Vec::with_capacity(texts.len());
        for text in texts {
            let verdict = match self.process_text(text).await {
                Ok(results) => TextVerdict::from_results(text.clone(), results),
                Err(err) if err.is_invalid_argument() => TextVerdict::rejected(text.clone()),
                Err(err) => return Err(err),
            };
            verdicts.push(verdict);
        }

        self.persist_bulk_summary(&verdicts).await?;
        Ok(verdicts)
    }

    async fn persist_bulk_summary(&self, verdicts: &[TextVerdict]) -> Result<()> {
        let failed: Vec<&str> = verdicts
            .iter()
            .filter(|v| !v.correct)
            .map(|v| v.text.as_str())
            .collect();

        let mut summary = SpellCheckRecord::new(summary_name());
        if failed.is_empty() {
            summary.status = "Correct".to_string();
        } else {
            summary.status = "Error".to_string();
            summary.error = Some(failed.join(", "));
        }

        let saved = self.spell_checks.save(summary).await?;
        tracing::info!(
            name = %saved.name,
            failed = failed.len(),
            total = verdicts.len(),
            "bulk check summary persisted"
        );
        Ok(())
    }
}

fn summary_name() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("SpellCheck_{millis}")
}
