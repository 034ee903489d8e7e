// Fri Oct 16 2026 - Alex

use crate::classify::CategorizedStatement;
use crate::mapping::{by_table, Mapping};
use crate::output::report::{banner, divider, ReportRenderer};
use crate::utils::preview;
use indexmap::IndexMap;
use itertools::Itertools;

const MAX_DETAIL_COLUMNS: usize = 10;

fn table_list(statement: &CategorizedStatement) -> String {
    if statement.tables.is_empty() {
        "N/A".to_string()
    } else {
        statement.tables.iter().join(", ")
    }
}

impl ReportRenderer {
    /// Markdown report pairing UI elements with the statements behind them.
    /// `statements` is the full categorized set; the per-table section lists
    /// every statement touching a table, matched or not.
    pub fn mapping_markdown(
        &self,
        source: &str,
        mappings: &[Mapping<'_>],
        statements: &[CategorizedStatement],
    ) -> String {
        let mut md = String::new();
        md.push_str("# UI element to SQL mapping\n\n");
        md.push_str(&format!(
            "UI elements of the front end paired with the SQL statements recovered from {}.\n\n",
            source
        ));
        md.push_str("## Contents\n");
        md.push_str("1. [Buttons](#buttons)\n");
        md.push_str("2. [Input fields](#input-fields)\n");
        md.push_str("3. [Tabs](#tabs)\n");
        md.push_str("4. [Tables](#tables)\n\n");

        md.push_str(&self.markdown_buttons(mappings));
        md.push_str(&self.markdown_fields(mappings));
        md.push_str(&Self::markdown_tabs(mappings));
        md.push_str(&Self::markdown_tables(mappings, statements));
        md
    }

    fn markdown_buttons(&self, mappings: &[Mapping<'_>]) -> String {
        let mut md = String::from("## Buttons\n\n");
        for mapping in mappings.iter().filter(|m| m.element.kind.is_button()) {
            let element = mapping.element;
            md.push_str(&format!("### {}\n", element.name));
            md.push_str(&format!("- **Category**: {}\n", element.category));
            if let Some(action) = &element.action {
                md.push_str(&format!("- **Action**: {}\n", action));
            }
            md.push_str("- **Statements**:\n");
            for statement in mapping.statement_refs() {
                md.push_str(&format!(
                    "  - [{}] {} (Query #{})\n",
                    statement.kind,
                    table_list(statement),
                    statement.ordinal()
                ));
                md.push_str("    ```sql\n");
                for line in preview(statement.text(), self.mapping_preview_chars).lines() {
                    md.push_str(&format!("    {}\n", line));
                }
                md.push_str("    ```\n");
            }
            md.push('\n');
        }
        md
    }

    fn markdown_fields(&self, mappings: &[Mapping<'_>]) -> String {
        let mut md = String::from("## Input fields\n\n");

        let mut by_category: IndexMap<&str, Vec<&Mapping<'_>>> = IndexMap::new();
        for mapping in mappings.iter().filter(|m| m.element.kind.is_field()) {
            by_category.entry(mapping.element.category.as_str()).or_default().push(mapping);
        }

        for (category, members) in by_category {
            md.push_str(&format!("### {}\n\n", category));
            for mapping in members {
                let element = mapping.element;
                md.push_str(&format!("#### {}\n", element.name));
                md.push_str(&format!("- **Field**: {}\n", element.field.as_deref().unwrap_or("N/A")));
                md.push_str(&format!("- **Table**: {}\n", element.table.as_deref().unwrap_or("N/A")));
                md.push_str(&format!("- **Kind**: {}\n", element.kind));
                if let Some(value) = &element.value {
                    md.push_str(&format!("- **Value**: {}\n", value));
                }
                md.push_str("- **Statements**:\n");
                for statement in mapping.statement_refs() {
                    md.push_str(&format!(
                        "  - [{}] {} (Query #{})\n",
                        statement.kind,
                        table_list(statement),
                        statement.ordinal()
                    ));
                    if mapping.field_used_by(statement) {
                        if let Some(field) = &element.field {
                            md.push_str(&format!("    - uses field '{}'\n", field));
                        }
                    }
                }
                md.push('\n');
            }
        }
        md
    }

    fn markdown_tabs(mappings: &[Mapping<'_>]) -> String {
        let mut md = String::from("## Tabs\n\n");
        for mapping in mappings.iter().filter(|m| m.element.kind.is_tab()) {
            md.push_str(&format!("### {}\n", mapping.element.name));
            if let Some(action) = &mapping.element.action {
                md.push_str(&format!("- **Action**: {}\n", action));
            }
            md.push_str("- **Tables**:\n");
            for table in mapping.tables().into_iter().sorted() {
                md.push_str(&format!("  - {}\n", table));
            }
            md.push('\n');
        }
        md
    }

    fn markdown_tables(mappings: &[Mapping<'_>], statements: &[CategorizedStatement]) -> String {
        let mut md = String::from("## Tables\n\n");
        for (table, members) in by_table(mappings) {
            md.push_str(&format!("### {}\n\n", table));
            md.push_str("**UI elements**:\n");
            for mapping in members {
                md.push_str(&format!("- {} ({})\n", mapping.element.name, mapping.element.kind));
                md.push_str(&format!(
                    "  - field: {}\n",
                    mapping.element.field.as_deref().unwrap_or("N/A")
                ));
            }
            md.push_str("\n**Statements**:\n");
            for statement in statements.iter().filter(|s| s.touches_table(table)) {
                md.push_str(&format!("- [{}] Query #{}\n", statement.kind, statement.ordinal()));
            }
            md.push('\n');
        }
        md
    }

    /// Plain-text variant with one banner-delimited section per element.
    pub fn mapping_detail(&self, mappings: &[Mapping<'_>]) -> String {
        let mut report = String::new();
        report.push_str(&banner());
        report.push_str("\nUI element to SQL detail\n");
        report.push_str(&banner());
        report.push_str("\n\n");

        for mapping in mappings {
            let element = mapping.element;
            report.push_str(&format!("\n{}\n", banner()));
            report.push_str(&format!("UI element: {}\n", element.name));
            report.push_str(&banner());
            report.push('\n');
            report.push_str(&format!("Category: {}\n", element.category));
            report.push_str(&format!("Kind: {}\n", element.kind));
            if let Some(field) = &element.field {
                report.push_str(&format!("Field: {}\n", field));
            }
            if let Some(table) = &element.table {
                report.push_str(&format!("Table: {}\n", table));
            }
            if let Some(action) = &element.action {
                report.push_str(&format!("Action: {}\n", action));
            }

            report.push_str(&format!("\nStatements ({}):\n", mapping.statements.len()));
            report.push_str(&divider());
            report.push('\n');
            for (i, (statement, reason)) in mapping.statements.iter().enumerate() {
                report.push_str(&format!(
                    "\n[Statement #{}] (source: Query #{}, matched by: {:?})\n",
                    i + 1,
                    statement.ordinal(),
                    reason
                ));
                report.push_str(&format!("Kind: {}\n", statement.kind));
                report.push_str(&format!("Tables: {}\n", statement.tables.iter().join(", ")));
                report.push_str(&format!(
                    "Columns: {}\n",
                    statement.columns.iter().take(MAX_DETAIL_COLUMNS).join(", ")
                ));
                report.push_str(&format!(
                    "Text:\n{}\n",
                    preview(statement.text(), self.detail_preview_chars)
                ));
                report.push_str(&divider());
                report.push('\n');
            }
        }

        report
    }
}
