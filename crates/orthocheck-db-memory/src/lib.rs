//! # orthocheck-db-memory
//!
//! In-memory storage backend for the orthocheck server.
//!
//! Both repositories keep their rows in a lock-free `papaya::HashMap` keyed
//! by id, with an atomic sequence assigning ids on insert. Nothing survives a
//! process restart; this backend exists for single-process deployments and
//! tests.

mod categories;
mod spell_checks;

pub use categories::InMemoryCategories;
pub use spell_checks::InMemorySpellChecks;
