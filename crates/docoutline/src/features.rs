use std::path::{Path, PathBuf};

use colored::Colorize;
use outline_core::training::CSV_HEADER;
use outline_core::{label_lines, GroundTruth};

use crate::batch::{discover_pdfs, output_path};
use crate::document::read_document;
use crate::prelude::{println, *};

#[derive(Debug, Clone, clap::Args)]
pub struct Options {
    /// Directory scanned for PDF files
    #[arg(long, env = "DOCOUTLINE_INPUT", default_value = "/app/input")]
    pub input: PathBuf,

    /// Directory holding a hand-labeled `<name>.json` outline per PDF
    #[arg(long, default_value = "/app/output")]
    pub ground_truth: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = "training_data.csv")]
    pub output: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeatureSummary {
    pub documents: usize,
    pub skipped: usize,
    pub rows: usize,
}

fn read_ground_truth(path: &Path) -> Result<GroundTruth> {
    let input = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("cannot read ground truth {}", path.display()))?;
    serde_json::from_str(&input).wrap_err_with(|| f!("invalid ground truth {}", path.display()))
}

/// Label every PDF in `input` that has a ground-truth outline and write the
/// rows to `output`.  PDFs without ground truth, or that cannot be read, are
/// skipped.
pub fn generate(input: &Path, ground_truth: &Path, output: &Path) -> Result<FeatureSummary> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .wrap_err_with(|| f!("cannot create {}", output.display()))?;
    writer.write_record(CSV_HEADER)?;

    let mut summary = FeatureSummary::default();
    for pdf_path in discover_pdfs(input)? {
        let truth_path = output_path(ground_truth, &pdf_path);
        if !truth_path.is_file() {
            log::warn!(
                "{}: no ground truth at {}",
                pdf_path.display(),
                truth_path.display()
            );
            summary.skipped += 1;
            continue;
        }

        let truth = read_ground_truth(&truth_path)?;
        let document = match read_document(&pdf_path) {
            Ok(document) => document,
            Err(err) => {
                log::error!("{err}");
                summary.skipped += 1;
                continue;
            }
        };

        let rows = label_lines(&document, &truth);
        log::debug!("{}: {} rows", pdf_path.display(), rows.len());
        for row in &rows {
            writer.serialize(row)?;
        }

        summary.documents += 1;
        summary.rows += rows.len();
    }

    writer.flush()?;

    Ok(summary)
}

pub async fn run(options: Options, _global: crate::Global) -> Result<()> {
    let summary = tokio::task::spawn_blocking({
        let options = options.clone();
        move || generate(&options.input, &options.ground_truth, &options.output)
    })
    .await??;

    println!(
        "{} {} rows from {} documents into {} ({} skipped)",
        "Wrote".bright_cyan().bold(),
        summary.rows.to_string().bright_white(),
        summary.documents.to_string().bright_white(),
        options.output.display(),
        summary.skipped.to_string().bright_yellow()
    );

    Ok(())
}
