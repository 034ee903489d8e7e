// Thu Oct 15 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;

static STRAY_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("control pattern"));

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("blank run pattern"));

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern"));

/// Normalizes a statement for display. Never changes which characters of
/// SQL survive, only the whitespace between them.
pub fn clean_query(text: &str) -> String {
    let cleaned = STRAY_CONTROL.replace_all(text, " ");
    let cleaned = BLANK_RUN.replace_all(&cleaned, " ");
    let cleaned = cleaned.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned = EXCESS_NEWLINES.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters_become_spaces() {
        assert_eq!(clean_query("SELECT\u{0}A\u{1b}FROM T"), "SELECT A FROM T");
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(clean_query("  SELECT \t\t A   FROM T  "), "SELECT A FROM T");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(clean_query("SELECT A\r\nFROM T\rWHERE B"), "SELECT A\nFROM T\nWHERE B");
        assert_eq!(clean_query("SELECT A\n\n\n\n\nFROM T"), "SELECT A\n\nFROM T");
    }

    #[test]
    fn test_clean_is_stable() {
        let once = clean_query("UPDATE  PERSON\r\n\r\n\r\nSET A = 1\u{7f}");
        assert_eq!(clean_query(&once), once);
    }
}
