//! CLI command implementations.

use crate::config::{LineageConfig, CONFIG_DIR};
use crate::input::AnalysisInput;
use colored::Colorize;
use lineage_graph::{gen_descendants_report, SubclassMapBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize Lineage in a directory.
pub fn init(path: &Path) -> Result<()> {
    let config_path = LineageConfig::path_in(path);

    if config_path.exists() {
        eprintln!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(path.join(CONFIG_DIR))?;
    fs::write(
        &config_path,
        serde_json::to_string_pretty(&LineageConfig::default())?,
    )?;

    eprintln!("{} Initialized Lineage in {}", "✓".green(), path.display());
    eprintln!(
        "  Edit {} to add ignore patterns",
        config_path.display().to_string().cyan()
    );

    Ok(())
}

/// Options for [`report`].
pub struct ReportOptions<'a> {
    pub input: &'a Path,
    pub config: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub strip_prefix: Option<&'a str>,
    pub parents: &'a [String],
}

/// Build the subclass map from an analysis dump and write the descendants
/// report.
pub fn report(opts: ReportOptions<'_>) -> Result<()> {
    let start = Instant::now();
    let cwd = std::env::current_dir()?;
    let config = LineageConfig::resolve(opts.config, &cwd)?;

    let mut input = AnalysisInput::load(opts.input)?;
    if let Some(prefix) = opts.strip_prefix {
        input.symbols.set_path_prefix(prefix);
    }

    let mut builder = SubclassMapBuilder::new(&input.symbols, config.ignore_patterns());
    builder.add_files(&input.files);
    let (collected, ignored) = (builder.files_collected(), builder.files_ignored());
    let mut map = builder.build();

    let mut parents = input.resolve_parents(opts.parents);
    let lines = gen_descendants_report(&input.symbols, &mut map, &mut parents, &config.patches)?;

    info!(
        collected,
        ignored,
        parents = parents.len(),
        lines = lines.len(),
        "report generated"
    );

    match opts.output {
        Some(path) => {
            let mut file = io::BufWriter::new(fs::File::create(path)?);
            write_lines(&mut file, &lines)?;
            file.flush()?;
            eprintln!(
                "{} Wrote {} lines to {} ({} files, {} ignored) in {}ms",
                "✓".green(),
                lines.len().to_string().cyan(),
                path.display(),
                collected,
                ignored,
                start.elapsed().as_millis()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_lines(&mut out, &lines)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
