// Thu Oct 15 2026 - Alex

use crate::classify::rules::{Disposition, Rule, FALLBACK, RULES};
use crate::extraction::Statement;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub disposition: Disposition,
    pub rule: &'static str,
}

/// Pure function of the text: walks the rule table and falls back to BROKEN.
pub fn classify(text: &str) -> Classification {
    let rule = matching_rule(text);
    log::trace!("{} ({}): {}", rule.name, rule.description, text);
    Classification {
        disposition: rule.disposition,
        rule: rule.name,
    }
}

pub fn matching_rule(text: &str) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(text))
        .unwrap_or(&FALLBACK)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedStatement {
    #[serde(flatten)]
    pub statement: Statement,
    pub disposition: Disposition,
    pub rule: &'static str,
}

impl ClassifiedStatement {
    pub fn new(statement: Statement) -> Self {
        let Classification { disposition, rule } = classify(&statement.text);
        Self {
            statement,
            disposition,
            rule,
        }
    }

    pub fn text(&self) -> &str {
        &self.statement.text
    }

    pub fn ordinal(&self) -> usize {
        self.statement.ordinal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::rules::is_valid_sql;

    #[test]
    fn test_select_with_where_is_valid() {
        let c = classify("SELECT PCODE, PNAME FROM PERSON WHERE PNAME LIKE '%A%'");
        assert_eq!(c.disposition, Disposition::Valid);
        assert_eq!(c.rule, "valid.skeleton");
    }

    #[test]
    fn test_bare_select_is_broken() {
        let c = classify("SELECT");
        assert_eq!(c.disposition, Disposition::Broken);
        assert_eq!(c.rule, "broken.bare_keyword");
    }

    #[test]
    fn test_update_is_valid() {
        let c = classify("UPDATE PERSON SET PNAME = 'X', SEX = 'M' WHERE PCODE = 1");
        assert_eq!(c.disposition, Disposition::Valid);
    }

    #[test]
    fn test_component_marker_is_invalid() {
        let c = classify("TStringGrid1.Cells[0,0]");
        assert_eq!(c.disposition, Disposition::Invalid);
        assert_eq!(c.rule, "invalid.component_marker");
    }

    #[test]
    fn test_truncated_text_mode_candidate_is_broken() {
        // What the text scan yields for a SELECT: cut right after FROM.
        let c = classify("SELECT PCODE, PNAME FROM");
        assert_eq!(c.disposition, Disposition::Broken);
    }

    #[test]
    fn test_unrecognised_statement_falls_back_to_broken() {
        let c = classify("ALTER TABLE PERSON ADD COLUMN AGREE");
        assert_eq!(c.disposition, Disposition::Broken);
        assert_eq!(c.rule, "broken.unrecognized");
    }

    #[test]
    fn test_invalid_wins_over_valid_skeleton() {
        let c = classify("SELECT NAME FROM OBJECTS");
        assert_eq!(c.disposition, Disposition::Invalid);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let samples = [
            "SELECT",
            "DELETE FROM VAX2 WHERE PCODE = :PCODE;",
            "\u{1}\u{2}\u{3}",
            "INSERT INTO FEELOG (MISU, WHANBUL) VALUES (0, 1)",
            "수진자명 SELECT 주민번호 FROM PERSON",
        ];
        for sample in samples {
            let owned = sample.to_string();
            assert_eq!(classify(sample), classify(&owned));
            assert_eq!(classify(sample), classify(sample));
        }
    }

    #[test]
    fn test_fallback_broken_never_passes_valid_check() {
        let samples = [
            "ALTER TABLE PERSON ADD COLUMN AGREE",
            "PRAGMA table_info(PERSON)",
            "CREATE INDEX IDX_PERSON ON PERSON",
            "SELECT*FROM PERSON",
        ];
        for sample in samples {
            let c = classify(sample);
            assert_eq!(c.rule, FALLBACK.name, "{}", sample);
            assert!(!is_valid_sql(sample));
        }
    }

    #[test]
    fn test_broken_and_valid_are_exclusive() {
        let broken = [
            "INSERT INTO PERSON",
            "UPDATE PERSON",
            "SELECT PCODE, PNAME FROM ",
            "insert into FEELOG (MISU) values",
            "SELECT PCODE \u{1}\u{2}\u{3}\u{4}\u{5}\u{6}\u{7}\u{8}\u{e}\u{f} FROM PERSON",
            "ALTER TABLE PERSON ADD COLUMN AGREE",
        ];
        for sample in broken {
            assert_eq!(classify(sample).disposition, Disposition::Broken, "{}", sample);
            assert!(!is_valid_sql(sample), "{}", sample);
        }

        let samples = [
            "SELECT PCODE, PNAME FROM PERSON WHERE PNAME = 'KIM",
            "UPDATE PERSON SET PNAME = 'X', SEX = 'M' WHERE PCODE = 1",
            "INSERT INTO FEELOG (MISU, WHANBUL) VALUES (0, 1)",
            "DELETE FROM VAX2 WHERE PCODE = 1",
            "SELECT PCODE\n--\nFROM PERSON",
        ];
        for sample in broken.iter().chain(samples.iter()) {
            let disposition = classify(sample).disposition;
            assert_eq!(disposition == Disposition::Valid, is_valid_sql(sample), "{}", sample);
        }
    }

    #[test]
    fn test_classified_statement_keeps_metadata() {
        let statement = Statement::new(7, "DELETE FROM VAX2 WHERE PCODE = 1");
        let classified = ClassifiedStatement::new(statement);
        assert_eq!(classified.ordinal(), 7);
        assert_eq!(classified.disposition, Disposition::Valid);
    }
}
