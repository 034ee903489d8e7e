// Fri Oct 16 2026 - Alex

use crate::classify::StatementKind;
use crate::extraction::{decode_report, SourceEncoding, Statement};
use crate::output::ReportError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `[<label> #N]<header rest>` then the body between two full-width dash
/// rules, so dash-only lines inside a statement stay in the body.
static QUERY_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[[^\]]*#(\d+)\]([^\n]*)\n-{80}\n(.*?)\n-{80}\n").expect("query block pattern")
});

/// Any run of dashes as the delimiter, for hand-edited or older reports.
static LOOSE_QUERY_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[[^\]]*#(\d+)\]([^\n]*)\n-+\n(.*?)\n-+\n").expect("loose query block pattern"));

static ENCODING_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*:\s*([^)]+)\)").expect("encoding group pattern"));

static OFFSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\s*0x([0-9A-Fa-f]+)").expect("offset pattern"));

static EXPORT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[(\w+)\s+#(\d+)\]\s*\n-{80}\n(.*?)\n-{80}\n").expect("export block pattern")
});

static LOOSE_EXPORT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[(\w+)\s+#(\d+)\]\s*\n-+\n(.*?)\n-+\n").expect("loose export block pattern"));

struct Block<'t> {
    ordinal: usize,
    header: &'t str,
    body: &'t str,
}

fn blocks<'t>(pattern: &Regex, content: &'t str) -> Vec<Block<'t>> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| {
            Some(Block {
                ordinal: caps[1].parse().ok()?,
                header: caps.get(2)?.as_str(),
                body: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

fn header_offset(header: &str) -> Option<u64> {
    OFFSET
        .captures(header)
        .and_then(|caps| u64::from_str_radix(&caps[1], 16).ok())
}

/// Best guess for headers that lost their `(label: TAG)` group.
fn guess_encoding(header: &str) -> Option<SourceEncoding> {
    let upper = header.to_uppercase();
    if upper.contains("UTF-16") {
        Some(SourceEncoding::Utf16)
    } else if upper.contains("UTF-8") {
        Some(SourceEncoding::Utf8)
    } else if upper.contains("BINARY") {
        Some(SourceEncoding::Binary)
    } else {
        None
    }
}

fn to_statement(block: &Block<'_>, encoding: Option<SourceEncoding>) -> Statement {
    let mut statement = Statement::new(block.ordinal, block.body.trim());
    statement.encoding = encoding;
    statement.origin_offset = header_offset(block.header);
    statement
}

fn tagged(blocks: &[Block<'_>]) -> Vec<Statement> {
    blocks
        .iter()
        .filter_map(|block| {
            let caps = ENCODING_GROUP.captures(block.header)?;
            let tag = caps[1].trim();
            let encoding = match tag.parse::<SourceEncoding>() {
                Ok(encoding) => Some(encoding),
                Err(e) => {
                    log::debug!("Query #{}: {}", block.ordinal, e);
                    None
                }
            };
            Some(to_statement(block, encoding))
        })
        .collect()
}

/// Reads statements back from an extraction report. Blocks framed by
/// full-width rules whose header carries `(label: TAG)` are taken first.
/// Otherwise any dash run delimits a block, and when no header carries a
/// tag every block counts, with the encoding guessed from the header.
pub fn parse_extraction_report(content: &str) -> Vec<Statement> {
    let primary = tagged(&blocks(&QUERY_BLOCK, content));
    if !primary.is_empty() {
        return primary;
    }

    let loose = blocks(&LOOSE_QUERY_BLOCK, content);
    let loose_tagged = tagged(&loose);
    if !loose_tagged.is_empty() {
        return loose_tagged;
    }

    if !loose.is_empty() {
        log::warn!("No block header carries an encoding tag, falling back to the loose pattern");
    }
    loose
        .iter()
        .map(|block| to_statement(block, guess_encoding(block.header)))
        .collect()
}

pub fn read_extraction_report<P: AsRef<Path>>(path: P) -> Result<Vec<Statement>, ReportError> {
    let bytes = std::fs::read(path.as_ref())?;
    let (content, encoding) = decode_report(&bytes);
    log::info!("Read {} as {}", path.as_ref().display(), encoding);
    Ok(parse_extraction_report(&content))
}

/// One `[KIND #N]` block of the valid-statement export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub label: Option<StatementKind>,
    pub statement: Statement,
}

fn export_entries(pattern: &Regex, content: &str) -> Vec<ExportEntry> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| {
            let ordinal = caps[2].parse().ok()?;
            let text = caps[3].trim();
            if text.is_empty() {
                return None;
            }
            Some(ExportEntry {
                label: caps[1].parse().ok(),
                statement: Statement::new(ordinal, text),
            })
        })
        .collect()
}

pub fn parse_valid_export(content: &str) -> Vec<ExportEntry> {
    let entries = export_entries(&EXPORT_BLOCK, content);
    if !entries.is_empty() {
        return entries;
    }
    export_entries(&LOOSE_EXPORT_BLOCK, content)
}

pub fn read_valid_export<P: AsRef<Path>>(path: P) -> Result<Vec<ExportEntry>, ReportError> {
    let bytes = std::fs::read(path.as_ref())?;
    let (content, _) = decode_report(&bytes);
    Ok(parse_valid_export(&content))
}
