use std::path::{Path, PathBuf};

use colored::Colorize;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

use crate::document::{infer_outline, write_outline};
use crate::prelude::{println, *};
use crate::settings::Settings;

#[derive(Debug, Clone, clap::Args)]
pub struct Options {
    /// Directory scanned for PDF files
    #[arg(long, env = "DOCOUTLINE_INPUT", default_value = "/app/input")]
    pub input: PathBuf,

    /// Directory that receives one `<name>.json` per PDF
    #[arg(long, env = "DOCOUTLINE_OUTPUT", default_value = "/app/output")]
    pub output: PathBuf,

    /// Documents processed at once (defaults to the available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Every regular file in `dir` with a `.pdf` extension (any case), sorted.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .wrap_err_with(|| f!("cannot read input directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    output_dir.join(name)
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Process every PDF in `input`, with at most `jobs` documents in flight.
/// A failed document is recorded and does not stop the others.
pub async fn process_directory(
    input: &Path,
    output: &Path,
    jobs: usize,
    settings: Settings,
) -> Result<Summary> {
    let inputs = discover_pdfs(input)?;
    tokio::fs::create_dir_all(output)
        .await
        .wrap_err_with(|| f!("cannot create output directory {}", output.display()))?;

    if inputs.is_empty() {
        log::warn!("no PDF files found in {}", input.display());
        return Ok(Summary::default());
    }

    log::debug!(
        "processing {} documents with {} jobs using the {} classifier",
        inputs.len(),
        jobs,
        settings.classifier.name()
    );

    let progress = ProgressBar::new(inputs.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| eyre!(e))?,
    );

    let results: Vec<(PathBuf, Result<PathBuf>)> = futures::stream::iter(inputs)
        .map(|path| {
            let settings = settings.clone();
            let target = output_path(output, &path);
            async move {
                let result = tokio::task::spawn_blocking({
                    let path = path.clone();
                    move || -> Result<PathBuf> {
                        let outline = infer_outline(&path, &settings)?;
                        write_outline(&target, &outline)?;
                        Ok(target)
                    }
                })
                .await
                .map_err(|e| eyre!(e))
                .and_then(|result| result);
                (path, result)
            }
        })
        .buffer_unordered(jobs.max(1))
        .inspect(|(path, _)| {
            progress.inc(1);
            progress.set_message(path.display().to_string());
        })
        .collect()
        .await;

    progress.finish_and_clear();

    let mut summary = Summary::default();
    for (path, result) in results {
        match result {
            Ok(target) => summary.written.push(target),
            Err(err) => {
                log::error!("{}: {err:#}", path.display());
                summary.failed.push((path, f!("{err:#}")));
            }
        }
    }
    summary.written.sort();
    summary.failed.sort();

    Ok(summary)
}

pub async fn run(options: Options, global: crate::Global) -> Result<()> {
    let settings = Settings::load(&global).await?;
    let jobs = options.jobs.unwrap_or_else(default_jobs);

    let summary = process_directory(&options.input, &options.output, jobs, settings).await?;

    println!(
        "{} {} of {} documents into {}",
        "Processed".bright_cyan().bold(),
        summary.written.len().to_string().bright_white(),
        summary.total().to_string().bright_white(),
        options.output.display()
    );
    for (path, reason) in &summary.failed {
        println!("  {} {}: {}", "failed".bright_red(), path.display(), reason);
    }

    if !summary.failed.is_empty() {
        return Err(Error::BatchFailed {
            failed: summary.failed.len(),
            total: summary.total(),
        }
        .into());
    }

    Ok(())
}
