// Fri Oct 16 2026 - Alex

use super::args::{Args, Command, ExtractArgs, MapArgs, MemoryArgs, ReviewArgs, RunArgs};
use crate::classify::{CategorizedStatement, ClassifiedStatement, Disposition, Review};
use crate::config::Config;
use crate::mapping::UiFieldMap;
use crate::memory::{BinaryImage, ProcessMemory};
use crate::output::{
    read_extraction_report, read_valid_export, JsonSerializer, ReportError, ReportRenderer, ReviewSummary,
};
use crate::pipeline::{self, Extraction, ExtractionPipeline};
use crate::utils::{format_duration, init_logger, level_from_str};
use anyhow::{bail, Context};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        init_logger(level_from_str(&args.log_level));

        if !self.quiet {
            println!("{}", format!("sqlrecover {}", env!("CARGO_PKG_VERSION")).cyan().bold());
            println!("{}", "=".repeat(50).cyan());
        }

        let config = self.load_config(&args)?;
        let start_time = Instant::now();

        match args.command {
            Command::Extract(extract_args) => self.handle_extract(extract_args, &config)?,
            Command::Memory(memory_args) => self.handle_memory(memory_args, &config)?,
            Command::Review(review_args) => self.handle_review(review_args, &config)?,
            Command::Map(map_args) => self.handle_map(map_args, &config)?,
            Command::Run(run_args) => self.handle_run(run_args, &config)?,
        }

        self.success(&format!("Done in {}", format_duration(start_time.elapsed())));
        Ok(())
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let config = match &args.config {
            Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        Ok(if args.no_progress || self.quiet {
            config.with_progress_bars(false)
        } else {
            config
        })
    }

    fn status(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[*]".blue(), message);
        }
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "[+]".green(), message);
        }
    }

    /// A failed write is reported and the run goes on.
    fn write_secondary(&self, result: Result<(), ReportError>, path: &Path) {
        match result {
            Ok(()) => self.success(&format!("Wrote {}", path.display())),
            Err(e) => log::error!("Failed to write {}: {}", path.display(), e),
        }
    }

    fn resolve_binary(binary: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
        let path = match binary.or_else(|| config.target_binary.clone()) {
            Some(path) => path,
            None => bail!("no binary given: pass --binary or set target_binary in the config"),
        };
        if !path.exists() {
            bail!("binary not found: {}", path.display());
        }
        Ok(path)
    }

    fn extract_binary(&self, path: &Path, config: &Config) -> anyhow::Result<Extraction> {
        self.status(&format!("Loading binary: {}", path.display()));
        let image = BinaryImage::load(path).with_context(|| format!("loading {}", path.display()))?;
        self.success(&format!(
            "Loaded {} ({}, {} sections)",
            image.path().display(),
            image.format(),
            image.sections().len()
        ));

        let extraction = ExtractionPipeline::new(config).run_binary(&image)?;
        self.print_extraction(&extraction);
        Ok(extraction)
    }

    fn print_extraction(&self, extraction: &Extraction) {
        if self.quiet {
            return;
        }
        println!(
            "{} {} unique statements from {} candidates",
            "[+]".green(),
            extraction.statements.len().to_string().bold(),
            extraction.candidates
        );
        for statement in extraction.statements.iter().take(5) {
            println!(
                "    [{}] ({}) {}",
                statement.ordinal,
                statement.encoding_tag(),
                crate::utils::preview(&statement.text, 100)
            );
        }
    }

    fn handle_extract(&self, args: ExtractArgs, config: &Config) -> anyhow::Result<()> {
        let path = Self::resolve_binary(args.binary, config)?;
        let extraction = self.extract_binary(&path, config)?;

        let renderer = ReportRenderer::from_config(config);
        let report = renderer.extraction_report(&extraction.statements, Some(&extraction.summary()));
        renderer.write_to_file(&report, &args.output)?;
        self.success(&format!("Wrote {}", args.output.display()));
        Ok(())
    }

    fn handle_memory(&self, args: MemoryArgs, config: &Config) -> anyhow::Result<()> {
        let process = match (args.pid, args.process.or_else(|| config.target_process.clone())) {
            (Some(pid), _) => ProcessMemory::attach(pid, &format!("pid {}", pid))?,
            (None, Some(name)) => {
                self.status(&format!("Looking for process: {}", name));
                ProcessMemory::attach_by_name(&name)?
            }
            (None, None) => bail!("no process given: pass --process or --pid, or set target_process in the config"),
        }
        .with_max_region_size(config.max_region_size);
        self.success(&format!("Attached to pid {}", process.pid()));

        let extraction = ExtractionPipeline::new(config).run(&process)?;
        if extraction.stats.regions_failed > 0 {
            println!(
                "{} {} of {} regions could not be read",
                "[!]".yellow(),
                extraction.stats.regions_failed,
                extraction.stats.regions_total
            );
        }
        self.print_extraction(&extraction);

        let renderer = ReportRenderer::from_config(config);
        let report = renderer.extraction_report(&extraction.statements, Some(&extraction.summary()));
        renderer.write_to_file(&report, &args.output)?;
        self.success(&format!("Wrote {}", args.output.display()));
        Ok(())
    }

    fn print_review(&self, review: &Review) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", "Review summary".cyan().bold());
        println!("Total statements: {}", review.total());
        if review.total() == 0 {
            println!("{} No statements were parsed", "[!]".yellow());
            return;
        }
        println!(
            "  {} valid:   {} ({:.1}%)",
            "[OK]".green(),
            review.count(Disposition::Valid),
            review.percent(Disposition::Valid)
        );
        println!(
            "  {} broken:  {} ({:.1}%)",
            "[X]".red(),
            review.count(Disposition::Broken),
            review.percent(Disposition::Broken)
        );
        println!(
            "  {} invalid: {} ({:.1}%)",
            "[X]".red(),
            review.count(Disposition::Invalid),
            review.percent(Disposition::Invalid)
        );

        let mut counts: Vec<_> = review.category_counts().into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        if !counts.is_empty() {
            println!("\nBy kind:");
            for (kind, count) in counts {
                println!("  {}: {}", kind, count);
            }
        }
    }

    fn write_review(
        &self,
        source: &str,
        review: &Review,
        report: &Path,
        valid_output: &Path,
        json: Option<&Path>,
        config: &Config,
    ) {
        let renderer = ReportRenderer::from_config(config);
        let result = renderer.write_to_file(&renderer.review_report(review), report);
        self.write_secondary(result, report);
        let result = renderer.write_to_file(&renderer.valid_export(review), valid_output);
        self.write_secondary(result, valid_output);

        if let Some(json) = json {
            let summary = ReviewSummary::new(source, review).with_broken(review);
            let result = JsonSerializer::new().serialize_to_file(&summary, json);
            self.write_secondary(result, json);
        }
    }

    fn handle_review(&self, args: ReviewArgs, config: &Config) -> anyhow::Result<()> {
        if !args.input.exists() {
            bail!("input report not found: {}", args.input.display());
        }
        self.status(&format!("Reading {}", args.input.display()));
        let statements = read_extraction_report(&args.input)
            .with_context(|| format!("reading {}", args.input.display()))?;
        self.success(&format!("Parsed {} statements", statements.len()));

        let review = pipeline::review(statements);
        self.print_review(&review);

        let source = args.input.display().to_string();
        self.write_review(
            &source,
            &review,
            &args.report,
            &args.valid_output,
            args.json.as_deref(),
            config,
        );
        Ok(())
    }

    fn load_ui_map(ui_map: Option<PathBuf>, config: &Config) -> anyhow::Result<UiFieldMap> {
        let path = ui_map.or_else(|| config.ui_map.clone());
        let map = UiFieldMap::load_or_builtin(path.as_deref())
            .with_context(|| match &path {
                Some(path) => format!("loading UI map {}", path.display()),
                None => "loading the built-in UI map".to_string(),
            })?;
        Ok(map)
    }

    fn write_mapping(
        &self,
        source: &str,
        ui_map: &UiFieldMap,
        statements: &[CategorizedStatement],
        output: &Path,
        detail: &Path,
        config: &Config,
    ) -> Result<(), ReportError> {
        let mappings = pipeline::map(ui_map, statements);
        self.success(&format!(
            "{} of {} UI elements map to at least one statement",
            mappings.len(),
            ui_map.len()
        ));

        let renderer = ReportRenderer::from_config(config);
        let markdown = renderer.write_to_file(&renderer.mapping_markdown(source, &mappings, statements), output);
        let result = renderer.write_to_file(&renderer.mapping_detail(&mappings), detail);
        self.write_secondary(result, detail);
        markdown
    }

    fn handle_map(&self, args: MapArgs, config: &Config) -> anyhow::Result<()> {
        if !args.input.exists() {
            bail!("valid statement export not found: {}", args.input.display());
        }
        let ui_map = Self::load_ui_map(args.ui_map, config)?;
        self.success(&format!("Loaded {} UI elements", ui_map.len()));

        let entries = read_valid_export(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
        let statements: Vec<CategorizedStatement> = entries
            .into_iter()
            .map(|entry| {
                let categorized = CategorizedStatement::new(ClassifiedStatement::new(entry.statement));
                if entry.label.is_some_and(|label| label != categorized.kind) {
                    log::debug!(
                        "Export block labelled {:?} re-categorized as {}",
                        entry.label,
                        categorized.kind
                    );
                }
                categorized
            })
            .collect();
        self.success(&format!("Loaded {} statements", statements.len()));

        let source = args.input.display().to_string();
        self.write_mapping(&source, &ui_map, &statements, &args.output, &args.detail, config)?;
        self.success(&format!("Wrote {}", args.output.display()));
        Ok(())
    }

    fn handle_run(&self, args: RunArgs, config: &Config) -> anyhow::Result<()> {
        let path = Self::resolve_binary(args.binary, config)?;
        let ui_map = Self::load_ui_map(args.ui_map, config)?;
        std::fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("creating {}", args.output_dir.display()))?;
        let out = |name: &str| args.output_dir.join(name);

        let extraction = self.extract_binary(&path, config)?;
        let renderer = ReportRenderer::from_config(config);
        let report = renderer.extraction_report(&extraction.statements, Some(&extraction.summary()));
        let extracted = out("extracted_sql_queries.txt");
        let result = renderer.write_to_file(&report, &extracted);
        self.write_secondary(result, &extracted);

        let review = pipeline::review(extraction.statements);
        self.print_review(&review);
        let json = args.json.then(|| out("sql_query_review.json"));
        self.write_review(
            &extraction.source,
            &review,
            &out("sql_query_review_report.txt"),
            &out("valid_sql_queries.txt"),
            json.as_deref(),
            config,
        );

        let valid = review.into_valid();
        let markdown = out("ui_sql_mapping_report.md");
        let result = self.write_mapping(
            &extraction.source,
            &ui_map,
            &valid,
            &markdown,
            &out("ui_sql_detailed_mapping.txt"),
            config,
        );
        self.write_secondary(result, &markdown);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_survives_unwritable_mapping_report() {
        let dir = std::env::temp_dir().join(format!("sqlrecover-handler-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let binary = dir.join("fixture.bin");
        std::fs::write(&binary, b"\x00\x00UPDATE PERSON SET PNAME = 'X', SEX = 'M' WHERE PCODE = 1;\x00").unwrap();
        // a directory where the markdown file should go
        std::fs::create_dir_all(dir.join("ui_sql_mapping_report.md")).unwrap();

        let handler = CommandHandler { quiet: true };
        let config = Config::default().with_progress_bars(false);
        let args = RunArgs {
            binary: Some(binary),
            ui_map: None,
            output_dir: dir.clone(),
            json: false,
        };
        assert!(handler.handle_run(args, &config).is_ok());
        assert!(dir.join("valid_sql_queries.txt").is_file());
        assert!(dir.join("ui_sql_detailed_mapping.txt").is_file());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let handler = CommandHandler { quiet: true };
        let config = Config::default().with_progress_bars(false);
        let args = RunArgs {
            binary: Some(PathBuf::from("/nonexistent/sqlrecover/DeskPro.exe")),
            ui_map: None,
            output_dir: std::env::temp_dir(),
            json: false,
        };
        assert!(handler.handle_run(args, &config).is_err());
    }
}
