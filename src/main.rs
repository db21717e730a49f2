mod assets;
mod colors;
mod config;
mod constants;
mod filters;
mod quantize;
mod types;
mod utils;

use crate::assets::{check_references, BUILD_STEPS};
use crate::config::init;
use crate::types::{AppConfig, AppError};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

fn main() -> anyhow::Result<()> {
    let config = init()?;

    match generate(&config) {
        Err(AppError::MissingReferences(missing)) => {
            println!("❌ Missing required references:");
            for path in &missing {
                println!("  - {}", path.display());
            }
            std::process::exit(1);
        }
        result => result.with_context(|| {
            format!("failed to generate assets in {}", config.assets_dir.display())
        }),
    }
}

fn generate(config: &AppConfig) -> Result<(), AppError> {
    check_references(config)?;

    println!("🎨 Generating assets from 15 reference images...");

    let pb = ProgressBar::new(BUILD_STEPS.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    for step in &BUILD_STEPS {
        pb.set_message(format!("Building {}", step.asset.file));
        (step.run)(config)?;
        pb.suspend(|| {
            println!("✅ {} generated from {}", step.asset.file, step.sources);
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!("✅ Done");
    Ok(())
}
