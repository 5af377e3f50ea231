pub mod category;
pub mod check;
pub mod error;
pub mod id;
pub mod record;

pub use category::Category;
pub use check::{CheckStatus, TextVerdict, WordCheck, NOT_IN_DICTIONARY};
pub use error::{require_non_empty, CoreError, Result};
pub use id::validate_id;
pub use record::SpellCheckRecord;
