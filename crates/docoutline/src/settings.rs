use std::path::Path;
use std::sync::Arc;

use outline_core::{
    ForestModel, HeadingClassifier, HeuristicClassifier, LabelDecoder, ModelClassifier,
    ModelLoadError, OutlineConfig,
};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Typographic score over font size, weight, case, and spacing
    Heuristic,
    /// Pre-trained decision forest
    Model,
}

/// Everything a command needs to process documents: the thresholds and a
/// classifier built once and shared by every document.
#[derive(Clone)]
pub struct Settings {
    pub config: OutlineConfig,
    pub classifier: Arc<dyn HeadingClassifier>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("config", &self.config)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl Settings {
    /// Resolve the configuration file and classifier named by the global
    /// options.  Model artifacts are loaded here so a bad artifact fails
    /// before any document is read.
    pub async fn load(global: &crate::Global) -> Result<Self> {
        let config = match &global.config {
            Some(path) => load_config(path).await?,
            None => OutlineConfig::default(),
        };

        let classifier: Arc<dyn HeadingClassifier> = match global.strategy {
            Strategy::Heuristic => Arc::new(
                HeuristicClassifier::new(&config.noise, &config.scoring)
                    .map_err(|e| eyre!(e))?,
            ),
            Strategy::Model => Arc::new(
                load_model(&global.model, &global.labels)
                    .await
                    .wrap_err("cannot load the heading model")?,
            ),
        };

        log::debug!("using the {} classifier", classifier.name());

        Ok(Settings { config, classifier })
    }

    /// Heuristic settings from the default thresholds.
    #[cfg(test)]
    pub fn heuristic() -> Result<Self> {
        let config = OutlineConfig::default();
        let classifier =
            HeuristicClassifier::new(&config.noise, &config.scoring).map_err(|e| eyre!(e))?;
        Ok(Settings {
            config,
            classifier: Arc::new(classifier),
        })
    }
}

pub async fn load_config(path: &Path) -> Result<OutlineConfig> {
    let input = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| f!("cannot read configuration file {}", path.display()))?;

    let config = OutlineConfig::from_toml_str(&input).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

async fn read_artifact(path: &Path) -> Result<String, ModelLoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ModelLoadError::Io {
            path: path.display().to_string(),
            source,
        })
}

pub async fn load_model(model: &Path, labels: &Path) -> Result<ModelClassifier, ModelLoadError> {
    let forest = ForestModel::from_json(&read_artifact(model).await?)?;
    let decoder = LabelDecoder::from_json(&read_artifact(labels).await?)?;

    log::debug!(
        "loaded {} trees over {} classes from {}",
        forest.trees.len(),
        forest.n_classes,
        model.display()
    );

    ModelClassifier::new(forest, decoder)
}
