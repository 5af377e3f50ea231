//! Cache key construction.
//!
//! Keys are a semantic prefix plus an id, name, or raw text. The store has a
//! single flat namespace, so these helpers are the only place keys are built.
//! Note that [`spell_check`] and [`spell_check_by_word`] share a prefix: the
//! id-keyed and word-keyed entries for records live side by side.

/// Aggregate of every category, as returned by `get_all`.
pub const ALL_CATEGORIES: &str = "allCategories";

/// The canonical default category row.
pub const ORTHOGRAPHY_CATEGORY: &str = "orthographyCategory";

/// Aggregate of every spell-check record.
pub const ALL_SPELL_CHECKS: &str = "allSpellChecks";

/// A single category by id.
pub fn category(id: i64) -> String {
    format!("category_{id}")
}

/// A single spell-check record by id.
pub fn spell_check(id: i64) -> String {
    format!("spellCheckCategory_{id}")
}

/// A single spell-check record by its word.
pub fn spell_check_by_word(word: &str) -> String {
    format!("spellCheckCategory_{word}")
}

/// One word's classification outcome.
pub fn word_check(word: &str) -> String {
    format!("wordCheck_{word}")
}

/// The ordered result list for a whole text.
pub fn text_checks(text: &str) -> String {
    format!("spellChecks_{text}")
}
