use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

const REFERENCES: [&str; 5] = [
    "reference_bg/01_office_sunset.jpg",
    "reference_bg/03_buildings_golden.jpg",
    "reference_bg/04_sunset_horizon.jpg",
    "reference_bg/08_water_abstract.jpg",
    "reference_style/style_ref_01_gia.jpg",
];

const OUTPUTS: [(&str, u32, u32); 4] = [
    ("hero.png", 880, 560),
    ("bg_pattern.png", 512, 512),
    ("bg_pattern_alt.png", 512, 512),
    ("icon_clock.png", 256, 256),
];

fn write_references(root: &Path, skip: &[&str]) {
    fs::create_dir_all(root.join("reference_bg")).unwrap();
    fs::create_dir_all(root.join("reference_style")).unwrap();

    for (i, reference) in REFERENCES.iter().enumerate() {
        if skip.contains(reference) {
            continue;
        }
        let (w, h) = if i % 2 == 0 { (320, 180) } else { (180, 320) };
        let img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([
                (x * 255 / w) as u8,
                (y * 255 / h) as u8,
                ((i as u32 * 50 + x + y) % 256) as u8,
            ])
        });
        img.save(root.join(reference)).unwrap();
    }
}

fn run(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asset-synth"))
        .arg("--assets-dir")
        .arg(root)
        .args(extra)
        .env("HOME", root)
        .output()
        .unwrap()
}

#[test]
fn generates_all_four_assets() {
    let dir = TempDir::new().unwrap();
    write_references(dir.path(), &[]);

    let output = run(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(output.status.code(), Some(0));

    for (file, width, height) in OUTPUTS {
        let img = image::open(dir.path().join(file)).unwrap();
        assert_eq!((img.width(), img.height()), (width, height), "{}", file);
    }

    let pngs = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "png"))
        .count();
    assert_eq!(pngs, 4);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generating assets from 15 reference images..."), "{}", stdout);
    for (file, _, _) in OUTPUTS {
        assert!(stdout.contains(file), "no status line for {}: {}", file, stdout);
    }
}

#[test]
fn missing_references_exit_with_status_one() {
    let dir = TempDir::new().unwrap();
    let skipped = ["reference_bg/08_water_abstract.jpg", "reference_style/style_ref_01_gia.jpg"];
    write_references(dir.path(), &skipped);

    let output = run(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let listed: Vec<&str> = stdout.lines().filter(|l| l.trim_start().starts_with("- ")).collect();
    assert_eq!(listed.len(), 2, "{}", stdout);
    for reference in skipped {
        assert!(stdout.contains(reference), "{} not listed in {}", reference, stdout);
    }

    for (file, _, _) in OUTPUTS {
        assert!(!dir.path().join(file).exists(), "{} should not be written", file);
    }
}

#[test]
fn empty_directory_lists_every_reference() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    for reference in REFERENCES {
        assert!(stdout.contains(reference), "{} not listed in {}", reference, stdout);
    }
}

#[test]
fn same_seed_gives_identical_pattern() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_references(first.path(), &[]);
    write_references(second.path(), &[]);

    assert!(run(first.path(), &["--seed", "42"]).status.success());
    assert!(run(second.path(), &["--seed", "42"]).status.success());

    let a = fs::read(first.path().join("bg_pattern.png")).unwrap();
    let b = fs::read(second.path().join("bg_pattern.png")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_blend_fails() {
    let dir = TempDir::new().unwrap();
    write_references(dir.path(), &[]);

    let output = run(dir.path(), &["--hero-blend", "2"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("hero.png").exists());
}
