//! # lutgpu-lut
//!
//! 1D Look-Up Table (LUT) data model for GPU color pipelines.
//!
//! This crate provides the table description consumed by the shader
//! generator in `lutgpu-shader`: ordered RGB triples plus the shape flags
//! (half-domain indexing, hue adjustment, interpolation) that drive
//! texture layout and code generation.
//!
//! # Usage
//!
//! ```rust
//! use lutgpu_lut::{Lut1D, HueAdjust};
//!
//! // A gamma curve applied identically to R, G and B
//! let lut = Lut1D::gamma(1024, 2.2);
//! let output = lut.apply(0.5);
//!
//! // A half-domain table covering the full HDR range
//! let hdr = Lut1D::half_domain_from_fn(|x| x.max(0.0).sqrt())
//!     .with_hue_adjust(HueAdjust::Dw3);
//! assert!(hdr.is_half_domain());
//! ```
//!
//! # Dependencies
//!
//! - [`half`] - half-precision indexing for half-domain tables
//! - [`thiserror`] - error handling
//!
//! # Used By
//!
//! - `lutgpu-shader` - texture packing and shader code generation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod interp;
mod lut1d;

pub use error::{LutError, LutResult};
pub use interp::Interpolation;
pub use lut1d::{HueAdjust, Lut1D, HALF_DOMAIN_LENGTH};
