//! Shader generation error types.

use thiserror::Error;

/// Result type for shader generation.
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Errors raised while generating LUT shader code.
///
/// All variants are caller precondition violations; generation either
/// produces the full texture and code fragments or fails before the
/// shader program sink is touched.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The LUT has no entries.
    #[error("LUT has no entries")]
    EmptyLut,

    /// The sink's maximum texture width is zero.
    #[error("maximum texture width must be at least 1")]
    InvalidTextureWidth,

    /// Multi-row packing needs a row pitch of at least one texel.
    #[error("degenerate texture grid {width}x{height}: width must be >= 2 when height > 1")]
    DegenerateGrid {
        /// Computed texture width.
        width: usize,
        /// Computed texture height.
        height: usize,
    },

    /// Error from the LUT data model.
    #[error("LUT error: {0}")]
    Lut(#[from] lutgpu_lut::LutError),
}
