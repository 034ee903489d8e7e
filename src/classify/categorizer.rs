// Thu Oct 15 2026 - Alex

use crate::classify::ClassifiedStatement;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
    Unknown,
}

impl StatementKind {
    /// Section order of the valid-query export.
    pub const REPORT_ORDER: [StatementKind; 8] = [
        StatementKind::Create,
        StatementKind::Select,
        StatementKind::Insert,
        StatementKind::Update,
        StatementKind::Delete,
        StatementKind::Alter,
        StatementKind::Drop,
        StatementKind::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SELECT" => Ok(Self::Select),
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "CREATE" | "CREATE_TABLE" | "CREATE TABLE" => Ok(Self::Create),
            "ALTER" => Ok(Self::Alter),
            "DROP" => Ok(Self::Drop),
            "UNKNOWN" | "OTHER" => Ok(Self::Unknown),
            other => Err(format!("unknown statement kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub kind: StatementKind,
    pub tables: IndexSet<String>,
    pub columns: IndexSet<String>,
}

static CREATE_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CREATE\s+TABLE").expect("create table pattern"));

static TABLE_CLAUSES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)FROM\s+(\w+)").expect("from pattern"),
        Regex::new(r"(?i)UPDATE\s+(\w+)").expect("update pattern"),
        Regex::new(r"(?i)INSERT\s+INTO\s+(\w+)").expect("insert pattern"),
        Regex::new(r"(?i)CREATE\s+TABLE\s+(\w+)").expect("create pattern"),
    ]
});

static SET_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bSET\s+(.*?)(?:\bWHERE\b|\z)").expect("set clause pattern"));

static ASSIGNED_COLUMN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\s*=").expect("assignment pattern"));

static INSERT_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)INSERT\s+INTO\s+\w+\s*\(([^)]+)\)").expect("insert columns pattern"));

/// First keyword present wins, in SELECT, INSERT, UPDATE, DELETE,
/// CREATE TABLE, ALTER, DROP order.
pub fn detect_kind(text: &str) -> StatementKind {
    let upper = text.to_uppercase();
    if upper.contains("SELECT") {
        StatementKind::Select
    } else if upper.contains("INSERT") {
        StatementKind::Insert
    } else if upper.contains("UPDATE") {
        StatementKind::Update
    } else if upper.contains("DELETE") {
        StatementKind::Delete
    } else if CREATE_TABLE.is_match(text) {
        StatementKind::Create
    } else if upper.contains("ALTER") {
        StatementKind::Alter
    } else if upper.contains("DROP") {
        StatementKind::Drop
    } else {
        StatementKind::Unknown
    }
}

pub fn extract_tables(text: &str) -> IndexSet<String> {
    let mut tables = IndexSet::new();
    for clause in TABLE_CLAUSES.iter() {
        for caps in clause.captures_iter(text) {
            tables.insert(caps[1].to_string());
        }
    }
    tables
}

/// Assignment targets of every SET clause, then the column list of an
/// `INSERT INTO t (...)`.
pub fn extract_columns(text: &str) -> IndexSet<String> {
    let mut columns = IndexSet::new();

    for set in SET_CLAUSE.captures_iter(text) {
        for assignment in ASSIGNED_COLUMN.captures_iter(&set[1]) {
            columns.insert(assignment[1].to_string());
        }
    }

    if let Some(caps) = INSERT_COLUMNS.captures(text) {
        for column in caps[1].split(',').map(str::trim).filter(|c| !c.is_empty()) {
            columns.insert(column.to_string());
        }
    }

    columns
}

pub fn categorize(text: &str) -> Category {
    Category {
        kind: detect_kind(text),
        tables: extract_tables(text),
        columns: extract_columns(text),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizedStatement {
    #[serde(flatten)]
    pub classified: ClassifiedStatement,
    pub kind: StatementKind,
    pub tables: IndexSet<String>,
    pub columns: IndexSet<String>,
}

impl CategorizedStatement {
    pub fn new(classified: ClassifiedStatement) -> Self {
        let Category { kind, tables, columns } = categorize(classified.text());
        Self {
            classified,
            kind,
            tables,
            columns,
        }
    }

    pub fn text(&self) -> &str {
        self.classified.text()
    }

    pub fn ordinal(&self) -> usize {
        self.classified.ordinal()
    }

    pub fn touches_table(&self, table: &str) -> bool {
        self.tables.contains(table)
    }

    pub fn uses_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }
}
