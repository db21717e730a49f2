use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{Asset, Reference};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub assets_dir: PathBuf,
    pub noise_seed: u64,
    pub noise_dots: u32,
    pub hero_blend: f32,
}

impl AppConfig {
    pub fn reference_path(&self, reference: Reference) -> PathBuf {
        self.assets_dir.join(reference.dir).join(reference.file)
    }

    pub fn output_path(&self, asset: Asset) -> PathBuf {
        self.assets_dir.join(asset.file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            assets_dir: PathBuf::from("."),
            noise_seed: 42,
            noise_dots: 6000,
            hero_blend: 0.24,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing {} required reference(s)", .0.len())]
    MissingReferences(Vec<PathBuf>),

    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {message}")]
    InvalidSetting { key: &'static str, message: String },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}
