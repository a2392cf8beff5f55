use std::path::PathBuf;

use colored::Colorize;
use outline_core::{Classification, Document, HeadingScorer, NoiseFilter, NoiseReason, TextLine};

use crate::document::read_document;
use crate::prelude::{println, *};
use crate::settings::Settings;

#[derive(Debug, Clone, clap::Args)]
pub struct Options {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Only show lines from this page
    #[arg(short, long)]
    pub page: Option<usize>,
}

/// How one line went through the pipeline.  `noise` and `score` come from
/// the heuristic filter and scorer, so they stay empty under any other
/// classifier.
#[derive(Debug, Clone)]
pub struct LineReport {
    pub line: TextLine,
    pub noise: Option<NoiseReason>,
    pub score: Option<u32>,
    pub classification: Classification,
}

fn classification_label(classification: &Classification) -> &'static str {
    match classification {
        Classification::Noise => "noise",
        Classification::Ignored => "-",
        Classification::Candidate => "candidate",
        Classification::Labeled(label) => label.as_str(),
    }
}

/// Replay the classification pass over `document`.  `prev_y` advances the
/// same way it does when building an outline, so scores match.
pub fn inspect_lines(
    document: &Document,
    settings: &Settings,
    page: Option<usize>,
) -> Result<Vec<LineReport>> {
    let heuristic = if settings.classifier.name() == "heuristic" {
        let filter = NoiseFilter::new(&settings.config.noise).map_err(|e| eyre!(e))?;
        Some((filter, HeadingScorer::new(settings.config.scoring.clone())))
    } else {
        None
    };

    let mut prev_y = settings.config.scoring.initial_prev_y;
    let mut reports = Vec::new();

    for line in document.lines() {
        let classification = settings.classifier.classify(&line, prev_y);
        let (noise, score) = match &heuristic {
            Some((filter, scorer)) => (
                filter.classify(&line.text),
                Some(scorer.points(&line, prev_y)),
            ),
            None => (None, None),
        };
        let report = LineReport {
            noise,
            score,
            classification,
            line,
        };

        if classification != Classification::Noise {
            prev_y = report.line.y_position;
        }
        if page.is_none_or(|p| p == report.line.page_number) {
            reports.push(report);
        }
    }

    Ok(reports)
}

pub async fn run(options: Options, global: crate::Global) -> Result<()> {
    let settings = Settings::load(&global).await?;

    let reports = tokio::task::spawn_blocking({
        let path = options.path.clone();
        let page = options.page;
        move || -> Result<Vec<LineReport>> {
            let document = read_document(&path)?;
            inspect_lines(&document, &settings, page)
        }
    })
    .await??;

    println!(
        "\n{} {}\n",
        "Lines of".bright_cyan().bold(),
        options.path.display().to_string().bright_white()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        b => "Page", "Y", "Size", "Bold", "Caps", "Noise", "Score", "Class", "Text"
    ]);
    for report in &reports {
        let line = &report.line;
        table.add_row(prettytable::row![
            line.page_number,
            f!("{:.1}", line.y_position),
            f!("{:.2}", line.avg_font_size.points()),
            if line.is_bold() { "yes" } else { "" },
            if line.is_uppercase() { "yes" } else { "" },
            report.noise.map(|reason| reason.as_str()).unwrap_or(""),
            report.score.map(|score| score.to_string()).unwrap_or_default(),
            classification_label(&report.classification),
            line.text
        ]);
    }
    table.printstd();

    let candidates = reports
        .iter()
        .filter(|r| r.classification != Classification::Noise)
        .filter(|r| r.classification != Classification::Ignored)
        .count();
    println!(
        "\n{} lines, {} headings or titles\n",
        reports.len().to_string().bright_white(),
        candidates.to_string().bright_yellow()
    );

    Ok(())
}
