//! Interpolation methods for LUT evaluation and texture sampling.

/// Interpolation method used when sampling a LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Nearest neighbor (no interpolation).
    Nearest,

    /// Linear interpolation between adjacent entries.
    ///
    /// Default method, good balance of quality and speed.
    #[default]
    Linear,
}
