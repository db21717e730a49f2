// Brand colors shared by the generated assets.

pub const NAVY: &str = "#0f2a4d";
pub const NAVY_LIGHT: &str = "#132f57";
pub const ORANGE: &str = "#f58b4a";

pub const PATTERN_BASE: [u8; 4] = [14, 34, 62, 255];
pub const PATTERN_ALT_BASE: [u8; 4] = [12, 28, 52, 255];
pub const STRIPE: [u8; 4] = [245, 139, 74, 22];

pub const VIGNETTE: [u8; 3] = [5, 8, 14];

pub const WARM_FALLBACK: [u8; 3] = [245, 139, 74];
pub const DARK_FALLBACK: [u8; 3] = [14, 25, 45];

pub const RIM: [u8; 4] = [255, 255, 255, 120];
pub const HAND: [u8; 4] = [18, 20, 30, 235];
pub const HUB: [u8; 4] = [18, 20, 30, 255];
