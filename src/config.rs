//! Application-level configuration constants.

// Catalog generation
pub const BYTES_PER_EXTRA_LOT: u64 = 50_000;
pub const MIN_LOT_COUNT: usize = 5;
pub const MAX_LOT_COUNT: usize = 12;
pub const LOT_ID_BASE: usize = 100;
pub const LOT_ID_PREFIX: &str = "D";
pub const WAFERS_PER_LOT: usize = 25;

// Dynamic classifier thresholds on a uniform draw in [0, 1)
pub const EDGE_RING_THRESHOLD: f64 = 0.2;
pub const NO_PATTERN_THRESHOLD: f64 = 0.4;

// Yield table (percent) keyed by defect type
pub const SCRATCH_YIELD: u8 = 85;
pub const EDGE_RING_YIELD: u8 = 65;
pub const NO_PATTERN_YIELD: u8 = 75;

// Sidebar quick-select yield band, upper bound exclusive
pub const QUICK_YIELD_MIN: u8 = 70;
pub const QUICK_YIELD_MAX: u8 = 100;

// Demonstration lots shown before any upload, in display order
pub const INITIAL_LOT: &str = "D101";
pub static FALLBACK_LOTS: [(&str, [u32; 5]); 3] = [
    ("D101", [1, 5, 8, 12, 15]),
    ("D100", [2, 6, 9, 13, 16]),
    ("D099", [3, 7, 10, 14, 17]),
];

// Statistics view
pub const DEFECT_BAR_SCALE: u32 = 400;

// UI
pub const UPLOAD_ACCEPT: &str = "image/*";
