// Thu Oct 15 2026 - Alex

pub mod rules;
pub mod classifier;
pub mod categorizer;
pub mod clean;
pub mod review;

pub use rules::{contains_statement_keyword, control_ratio, is_valid_sql, Disposition, Rule, FALLBACK, RULES};
pub use classifier::{classify, matching_rule, Classification, ClassifiedStatement};
pub use categorizer::{categorize, detect_kind, CategorizedStatement, Category, StatementKind};
pub use clean::clean_query;
pub use review::{Review, ReviewStatistics};
