//! # lutgpu-shader
//!
//! Shader code generation and texture packing for 1D color LUTs.
//!
//! Translates a [`Lut1D`](lutgpu_lut::Lut1D) into the two artifacts a
//! GPU color pipeline consumes: a texture-ready data buffer laid out for
//! row/column addressing, and shading-language source that computes
//! texture coordinates and applies the lookup to an in-flight pixel.
//!
//! # Architecture
//!
//! ```text
//! emit_lut1d(lut, sink)
//!     ├── pack      row-overlap texel packing + sanitizing
//!     ├── position  addressing mode + half bit-pattern encoder
//!     ├── text      dialect syntax primitives (GLSL flavors, HLSL)
//!     └── desc      shader program sink + texture registry
//! ```
//!
//! # Example
//!
//! ```rust
//! use lutgpu_lut::Lut1D;
//! use lutgpu_shader::{emit_lut1d, GpuLanguage, ShaderDesc};
//!
//! let lut = Lut1D::gamma(1024, 2.2);
//! let mut shader = ShaderDesc::new(GpuLanguage::Glsl330);
//! emit_lut1d(&lut, &mut shader)?;
//!
//! let source = shader.fragment_source("apply_luts");
//! assert!(source.contains("uniform sampler1D"));
//! # Ok::<(), lutgpu_shader::ShaderError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`lutgpu-lut`](lutgpu_lut) - LUT data model
//! - [`thiserror`] - error handling
//! - [`tracing`] - emission diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod desc;
pub mod error;
pub mod lut1d;
pub mod pack;
pub mod position;
pub mod text;

pub use desc::{GpuTexture, ShaderDesc, TextureChannels};
pub use error::{ShaderError, ShaderResult};
pub use lut1d::emit_lut1d;
pub use pack::{pad_lut_rgb, sanitize, texture_grid};
pub use position::{half_index_approx, Addressing};
pub use text::{float_str, GpuLanguage, ShaderText};
