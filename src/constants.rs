pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REFERENCE_BG_DIR: &str = "reference_bg";
pub const REFERENCE_STYLE_DIR: &str = "reference_style";

/// A reference photograph, relative to the assets directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub dir: &'static str,
    pub file: &'static str,
}

pub const OFFICE_SUNSET: Reference = Reference {
    dir: REFERENCE_BG_DIR,
    file: "01_office_sunset.jpg",
};
pub const BUILDINGS_GOLDEN: Reference = Reference {
    dir: REFERENCE_BG_DIR,
    file: "03_buildings_golden.jpg",
};
pub const SUNSET_HORIZON: Reference = Reference {
    dir: REFERENCE_BG_DIR,
    file: "04_sunset_horizon.jpg",
};
pub const WATER_ABSTRACT: Reference = Reference {
    dir: REFERENCE_BG_DIR,
    file: "08_water_abstract.jpg",
};
pub const STYLE_GIA: Reference = Reference {
    dir: REFERENCE_STYLE_DIR,
    file: "style_ref_01_gia.jpg",
};

pub const REQUIRED_REFERENCES: [Reference; 5] = [
    OFFICE_SUNSET,
    BUILDINGS_GOLDEN,
    SUNSET_HORIZON,
    WATER_ABSTRACT,
    STYLE_GIA,
];

/// An output asset and the exact size it is written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub file: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const HERO: Asset = Asset {
    file: "hero.png",
    width: 880,
    height: 560,
};
pub const BG_PATTERN: Asset = Asset {
    file: "bg_pattern.png",
    width: 512,
    height: 512,
};
pub const BG_PATTERN_ALT: Asset = Asset {
    file: "bg_pattern_alt.png",
    width: 512,
    height: 512,
};
pub const ICON_CLOCK: Asset = Asset {
    file: "icon_clock.png",
    width: 256,
    height: 256,
};

// Palette extraction
pub const PALETTE_SAMPLE_SIZE: u32 = 96;
pub const PALETTE_MAX_COLORS: usize = 16;
pub const ICON_PALETTE_COUNT: usize = 6;

// Clock icon geometry
pub const DIAL_RADIUS: i32 = 102;
pub const HALO_RINGS: i32 = 10;
pub const RIM_WIDTH: i32 = 3;
