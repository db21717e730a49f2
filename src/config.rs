use crate::constants::VERSION;
use crate::types::{AppConfig, AppError};

use clap::{App, Arg, ArgMatches};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SerializedAppConfig {
    assets_dir: String,
    noise_seed: String,
    noise_dots: String,
    hero_blend: String,
}

fn load_config(config_path: Option<&str>) -> Result<SerializedAppConfig, config::ConfigError> {
    let mut builder = ConfigBuilder::<DefaultState>::default();

    builder = builder
        .set_default("assets_dir", ".")?
        .set_default("noise_seed", "42")?
        .set_default("noise_dots", "6000")?
        .set_default("hero_blend", "0.24")?;

    let default_config_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(".config/asset-synth/config.toml");

    if default_config_path.exists() {
        builder = builder.add_source(File::from(default_config_path).required(false));
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    let config = builder.build()?;

    config.try_deserialize()
}

fn cli() -> App<'static> {
    App::new("Asset Synth")
        .version(VERSION)
        .author("Taylor Beeston")
        .about("Generates hero, background pattern and icon assets from reference photographs")
        .after_help("Reads reference_bg/ and reference_style/ under the assets directory and writes hero.png, bg_pattern.png, bg_pattern_alt.png and icon_clock.png next to them.\n\nEvery option can also be set in ~/.config/asset-synth/config.toml or a file passed with --config; flags take precedence.")
        .arg(
            Arg::with_name("Assets Dir")
                .short('a')
                .long("assets-dir")
                .value_name("DIR")
                .help("Directory holding the reference folders; outputs are written here")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Seed for the background pattern noise")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Noise Dots")
                .long("noise-dots")
                .value_name("COUNT")
                .help("Number of noise dots scattered over the background pattern")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("Hero Blend")
                .long("hero-blend")
                .value_name("RATIO")
                .help("[0.0-1.0] How much of the skyline is blended into the hero")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short('c')
                .long("config")
                .value_name("/path/to/config.toml")
                .help("Sets a custom config file")
                .takes_value(true),
        )
}

fn parse_setting<T>(key: &'static str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| AppError::InvalidSetting {
        key,
        message: format!("failed to parse `{}`: {}", value, e),
    })
}

fn resolve(matches: &ArgMatches, config: SerializedAppConfig) -> Result<AppConfig, AppError> {
    let assets_dir = matches
        .value_of("Assets Dir")
        .unwrap_or(&config.assets_dir);

    let noise_seed = matches.value_of("Seed").unwrap_or(&config.noise_seed);
    let noise_seed: u64 = parse_setting("noise_seed", noise_seed)?;

    let noise_dots = matches.value_of("Noise Dots").unwrap_or(&config.noise_dots);
    let noise_dots: u32 = parse_setting("noise_dots", noise_dots)?;

    let hero_blend = matches.value_of("Hero Blend").unwrap_or(&config.hero_blend);
    let hero_blend: f32 = parse_setting("hero_blend", hero_blend)?;
    if !(0.0..=1.0).contains(&hero_blend) {
        return Err(AppError::InvalidSetting {
            key: "hero_blend",
            message: format!("{} is outside 0.0..=1.0", hero_blend),
        });
    }

    Ok(AppConfig {
        assets_dir: PathBuf::from(assets_dir),
        noise_seed,
        noise_dots,
        hero_blend,
    })
}

pub fn init() -> Result<AppConfig, AppError> {
    let matches = cli().get_matches();
    let config = load_config(matches.value_of("config"))?;
    resolve(&matches, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> SerializedAppConfig {
        SerializedAppConfig {
            assets_dir: ".".to_string(),
            noise_seed: "42".to_string(),
            noise_dots: "6000".to_string(),
            hero_blend: "0.24".to_string(),
        }
    }

    fn resolve_args(args: &[&str]) -> Result<AppConfig, AppError> {
        let matches = cli().try_get_matches_from(args).unwrap();
        resolve(&matches, defaults())
    }

    #[test]
    fn no_arguments_gives_the_stock_pipeline() {
        let config = resolve_args(&["asset-synth"]).unwrap();
        let stock = AppConfig::default();
        assert_eq!(config.assets_dir, stock.assets_dir);
        assert_eq!(config.noise_seed, stock.noise_seed);
        assert_eq!(config.noise_dots, stock.noise_dots);
        assert_eq!(config.hero_blend, stock.hero_blend);
    }

    #[test]
    fn flags_override_file_values() {
        let config = resolve_args(&[
            "asset-synth",
            "--assets-dir",
            "/tmp/design",
            "--seed",
            "7",
            "--noise-dots",
            "10",
            "--hero-blend",
            "0.5",
        ])
        .unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/tmp/design"));
        assert_eq!(config.noise_seed, 7);
        assert_eq!(config.noise_dots, 10);
        assert_eq!(config.hero_blend, 0.5);
    }

    #[test]
    fn blend_outside_unit_range_is_rejected() {
        let err = resolve_args(&["asset-synth", "--hero-blend", "1.5"]).unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting { key: "hero_blend", .. }));
    }

    #[test]
    fn unparsable_seed_is_rejected() {
        let err = resolve_args(&["asset-synth", "--seed", "forty-two"]).unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting { key: "noise_seed", .. }));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/asset-synth/config.toml")).is_err());
    }
}
