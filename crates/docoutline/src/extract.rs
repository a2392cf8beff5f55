use std::path::PathBuf;

use crate::document::{infer_outline, to_json, write_outline};
use crate::prelude::{println, *};
use crate::settings::Settings;

#[derive(Debug, Clone, clap::Args)]
pub struct Options {
    /// Path to the PDF file
    pub path: PathBuf,

    /// Write the outline here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(options: Options, global: crate::Global) -> Result<()> {
    let settings = Settings::load(&global).await?;

    let outline = tokio::task::spawn_blocking({
        let path = options.path.clone();
        move || infer_outline(&path, &settings)
    })
    .await??;

    match &options.output {
        Some(output) => write_outline(output, &outline)?,
        None => println!("{}", to_json(&outline)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fixtures;
    use tempfile::TempDir;

    fn global() -> crate::Global {
        crate::Global {
            config: None,
            strategy: crate::settings::Strategy::Heuristic,
            model: PathBuf::from("heading_classifier.json"),
            labels: PathBuf::from("label_encoder.json"),
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_extract_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("report.pdf");
        let output = dir.path().join("report.json");
        std::fs::write(&input, fixtures::annual_report()).unwrap();

        run(
            Options {
                path: input,
                output: Some(output.clone()),
            },
            global(),
        )
        .await
        .unwrap();

        let outline: outline_core::DocumentOutline =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(outline.title, "ANNUAL REPORT");
        assert_eq!(outline.outline.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = run(
            Options {
                path: dir.path().join("missing.pdf"),
                output: None,
            },
            global(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DocumentRead { .. })
        ));
    }
}
