// Thu Oct 15 2026 - Alex

use crate::classify::CategorizedStatement;
use crate::mapping::{UiElement, UiFieldMap};
use indexmap::{IndexMap, IndexSet};

/// Why a statement was paired with an element. Checked in this order; the
/// first that holds is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Table,
    Field,
    Action,
}

#[derive(Debug, Clone)]
pub struct Mapping<'a> {
    pub element: &'a UiElement,
    pub statements: Vec<(&'a CategorizedStatement, MatchReason)>,
}

impl<'a> Mapping<'a> {
    pub fn statement_refs(&self) -> impl Iterator<Item = &'a CategorizedStatement> + '_ {
        self.statements.iter().map(|(s, _)| *s)
    }

    /// Every table the paired statements touch, first-seen order.
    pub fn tables(&self) -> IndexSet<&'a str> {
        self.statement_refs()
            .flat_map(|s| s.tables.iter().map(String::as_str))
            .collect()
    }

    /// True when a paired statement names this element's column.
    pub fn field_used_by(&self, statement: &CategorizedStatement) -> bool {
        self.element
            .field
            .as_deref()
            .map(|field| statement.uses_column(field))
            .unwrap_or(false)
    }
}

fn match_reason(map: &UiFieldMap, element: &UiElement, statement: &CategorizedStatement) -> Option<MatchReason> {
    if let Some(table) = element.table.as_deref() {
        if statement.touches_table(table) {
            return Some(MatchReason::Table);
        }
    }
    if let Some(field) = element.field.as_deref() {
        if statement.uses_column(field) {
            return Some(MatchReason::Field);
        }
    }
    if let Some(action) = element.action.as_deref() {
        if map.kinds_for_action(action).contains(&statement.kind) {
            return Some(MatchReason::Action);
        }
    }
    None
}

/// Pairs each UI element with the statements that plausibly implement it.
/// Elements that end up with no statement are left out.
pub fn correlate<'a>(map: &'a UiFieldMap, statements: &'a [CategorizedStatement]) -> Vec<Mapping<'a>> {
    let mappings: Vec<_> = map
        .elements()
        .iter()
        .filter(|element| element.has_binding())
        .filter_map(|element| {
            let matched: Vec<_> = statements
                .iter()
                .filter_map(|s| match_reason(map, element, s).map(|reason| (s, reason)))
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some(Mapping {
                    element,
                    statements: matched,
                })
            }
        })
        .collect();

    log::debug!(
        "Correlated {} of {} UI elements against {} statements",
        mappings.len(),
        map.len(),
        statements.len()
    );
    mappings
}

/// Mappings whose element declares a table, keyed by that table in sorted
/// order.
pub fn by_table<'m, 'a>(mappings: &'m [Mapping<'a>]) -> IndexMap<&'a str, Vec<&'m Mapping<'a>>> {
    let mut groups: IndexMap<&'a str, Vec<&'m Mapping<'a>>> = IndexMap::new();
    for mapping in mappings {
        if let Some(table) = mapping.element.table.as_deref() {
            groups.entry(table).or_default().push(mapping);
        }
    }
    groups.sort_keys();
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{CategorizedStatement, ClassifiedStatement, StatementKind};
    use crate::extraction::Statement;
    use crate::mapping::UiElementKind;

    fn categorized(texts: &[&str]) -> Vec<CategorizedStatement> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| CategorizedStatement::new(ClassifiedStatement::new(Statement::new(i + 1, *t))))
            .collect()
    }

    fn find<'m, 'a>(mappings: &'m [Mapping<'a>], category: &str, name: &str) -> Option<&'m Mapping<'a>> {
        mappings
            .iter()
            .find(|m| m.element.category == category && m.element.name == name)
    }

    #[test]
    fn test_table_match() {
        let map = UiFieldMap::builtin().unwrap();
        let statements = categorized(&["SELECT PCODE, PNAME FROM PERSON WHERE PNAME LIKE '%A%'"]);
        let mappings = correlate(&map, &statements);

        let name = find(&mappings, "personal_info_fields", "수진자명").unwrap();
        assert_eq!(name.statements.len(), 1);
        assert_eq!(name.statements[0].1, MatchReason::Table);
        assert!(find(&mappings, "vital_fields", "체중").is_none());
    }

    #[test]
    fn test_field_match_without_table() {
        let map = UiFieldMap::builtin().unwrap();
        // Declared on FAMILY, written here through CARD.
        let statements = categorized(&["UPDATE CARD SET FCODE = 1 WHERE CARDNUM = 2"]);
        let mappings = correlate(&map, &statements);

        let family = find(&mappings, "family_info_fields", "가족번호").unwrap();
        assert_eq!(family.statements[0].1, MatchReason::Field);
        assert!(family.field_used_by(family.statements[0].0));
    }

    #[test]
    fn test_action_lookup_restricts_kind() {
        let map = UiFieldMap::builtin().unwrap();
        let statements = categorized(&["DELETE FROM VAX2 WHERE PCODE = 1", "SELECT A FROM VAX2"]);
        let mappings = correlate(&map, &statements);

        let vaccination = find(&mappings, "reception_buttons", "접종").unwrap();
        let kinds: Vec<_> = vaccination.statement_refs().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StatementKind::Delete]);
        assert!(find(&mappings, "reception_buttons", "수정").is_none());
    }

    #[test]
    fn test_elements_without_binding_are_excluded() {
        let json = r#"{"elements": [
            {"name": "floating", "category": "misc", "kind": "button"},
            {"name": "exit", "category": "misc", "kind": "button", "action": "exit"}
        ]}"#;
        let map = UiFieldMap::from_json(json).unwrap();
        let statements = categorized(&["SELECT A FROM PERSON"]);
        assert!(correlate(&map, &statements).is_empty());
    }

    #[test]
    fn test_by_table_sorted() {
        let map = UiFieldMap::builtin().unwrap();
        let statements = categorized(&[
            "UPDATE PERSON SET PNAME = 'X' WHERE PCODE = 1",
            "INSERT INTO FEELOG (MISU, WHANBUL) VALUES (0, 1)",
        ]);
        let mappings = correlate(&map, &statements);
        let tables: Vec<_> = by_table(&mappings).keys().copied().collect();
        assert_eq!(tables, vec!["FEELOG", "PERSON"]);
        assert!(mappings.iter().all(|m| m.element.kind != UiElementKind::Tab));
    }
}
