// Thu Oct 15 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Disposition {
    Valid,
    Broken,
    Invalid,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Broken => "BROKEN",
            Self::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the classification cascade. Rules are tried in table order
/// and the first whose predicate holds decides the disposition.
pub struct Rule {
    pub name: &'static str,
    pub description: &'static str,
    pub disposition: Disposition,
    predicate: fn(&str) -> bool,
}

impl Rule {
    pub fn matches(&self, text: &str) -> bool {
        (self.predicate)(text)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("disposition", &self.disposition)
            .finish()
    }
}

pub static RULES: [Rule; 8] = [
    Rule {
        name: "invalid.no_alphabetic",
        description: "no ASCII letter anywhere",
        disposition: Disposition::Invalid,
        predicate: has_no_alphabetic,
    },
    Rule {
        name: "invalid.binary_only",
        description: "only control or extended bytes",
        disposition: Disposition::Invalid,
        predicate: is_binary_only,
    },
    Rule {
        name: "invalid.component_marker",
        description: "GUI component or class name",
        disposition: Disposition::Invalid,
        predicate: has_component_marker,
    },
    Rule {
        name: "invalid.file_name",
        description: "file name suffix (.exe, .dll, .obj)",
        disposition: Disposition::Invalid,
        predicate: has_file_name,
    },
    Rule {
        name: "invalid.short_non_sql",
        description: "no statement keyword and shorter than 20 characters",
        disposition: Disposition::Invalid,
        predicate: is_short_non_sql,
    },
    Rule {
        name: "broken.bare_keyword",
        description: "ends on a keyword with nothing after it",
        disposition: Disposition::Broken,
        predicate: ends_with_bare_keyword,
    },
    Rule {
        name: "broken.binary_run",
        description: "10 or more consecutive non-printable characters",
        disposition: Disposition::Broken,
        predicate: has_binary_run,
    },
    Rule {
        name: "valid.skeleton",
        description: "keyword, sane length and control ratio, canonical skeleton",
        disposition: Disposition::Valid,
        predicate: matches_skeleton,
    },
];

pub static FALLBACK: Rule = Rule {
    name: "broken.unrecognized",
    description: "not noise, not a recognisable statement",
    disposition: Disposition::Broken,
    predicate: always,
};

const STATEMENT_KEYWORDS: [&str; 7] = ["SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP"];

static COMPONENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TStringGrid|TComponent|Delphi|Object").expect("component marker pattern"));

static FILE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.exe|\.dll|\.obj").expect("file name pattern"));

static BARE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:SELECT|VALUES|FROM|INSERT\s+INTO\s+\w+|UPDATE\s+\w+)\s*$").expect("bare keyword pattern")
});

static BINARY_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x20-\x7E\n\r\t]{10,}").expect("binary run pattern"));

static SKELETON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)SELECT\s+.*?\s+FROM|INSERT\s+INTO\s+\w+|UPDATE\s+\w+\s+SET|DELETE\s+FROM\s+\w+|CREATE\s+TABLE\s+\w+",
    )
    .expect("skeleton pattern")
});

pub fn contains_statement_keyword(text: &str) -> bool {
    let upper = text.to_uppercase();
    STATEMENT_KEYWORDS.iter().any(|k| upper.contains(k))
}

fn contains_sql_keyword(text: &str) -> bool {
    contains_statement_keyword(text) || text.to_uppercase().contains("PRAGMA")
}

fn has_no_alphabetic(text: &str) -> bool {
    !text.chars().any(|c| c.is_ascii_alphabetic())
}

fn is_binary_only(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|c| {
            let code = c as u32;
            code < 0x20 || (0x7F..=0xFF).contains(&code)
        })
}

fn has_component_marker(text: &str) -> bool {
    COMPONENT_MARKER.is_match(text)
}

fn has_file_name(text: &str) -> bool {
    FILE_NAME.is_match(text)
}

fn is_short_non_sql(text: &str) -> bool {
    !contains_statement_keyword(text) && text.chars().count() < 20
}

fn ends_with_bare_keyword(text: &str) -> bool {
    BARE_KEYWORD.is_match(text)
}

fn has_binary_run(text: &str) -> bool {
    BINARY_RUN.is_match(text)
}

/// Control characters other than TAB, LF and CR over total characters.
pub fn control_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let control = text
        .chars()
        .filter(|&c| (c as u32) < 0x20 && !matches!(c, '\n' | '\r' | '\t'))
        .count();
    control as f64 / total as f64
}

/// Whether `text` reads as a complete statement: it must not end on a bare
/// keyword or carry a binary run, and must pass the skeleton conditions.
/// Anything classified BROKEN fails this.
pub fn is_valid_sql(text: &str) -> bool {
    !ends_with_bare_keyword(text) && !has_binary_run(text) && matches_skeleton(text)
}

fn matches_skeleton(text: &str) -> bool {
    if !contains_sql_keyword(text) {
        return false;
    }
    let len = text.chars().count();
    if !(10..=10_000).contains(&len) {
        return false;
    }
    if control_ratio(text) > 0.1 {
        return false;
    }
    SKELETON.is_match(text)
}

fn always(_: &str) -> bool {
    true
}
