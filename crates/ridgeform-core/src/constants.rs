//! Shared constants for generation, colorization and editing.

/// Largest accepted grid division count. (D+1)^2 vertices must fit a u32 index.
pub const MAX_DIVISIONS: u32 = 4096;

/// Largest accepted corner displacement range. Noise draws span twice this.
pub const MAX_AMPLITUDE: f32 = 1.0e6;

/// Elevation floor applied after generation and after every brush stroke.
/// Anything at this height is treated as submerged.
pub const SEA_LEVEL: f32 = 0.0;

/// Per-step decay of the random displacement range in diamond-square.
pub const DISPLACEMENT_DECAY: f32 = 0.5;

/// Mask value for a submerged cell in the deferred shading mask.
pub const MASK_WATER: u8 = 1;

/// Mask value for a cell above sea level.
pub const MASK_LAND: u8 = 0;

/// Upper bound of a heightline color channel (8-bit RGB).
pub const COLOR_CHANNEL_MAX: i32 = 255;

/// Default window for the edit-mode double press, in milliseconds.
pub const DOUBLE_PRESS_WINDOW_MS: u64 = 300;
