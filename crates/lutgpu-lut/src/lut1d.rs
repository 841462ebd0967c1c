//! 1-dimensional lookup table, pre-expanded for GPU upload.
//!
//! A 1D LUT applies the same transfer curve to each color channel.
//! Entries are stored as RGB triples so the table can be handed to a
//! texture upload without further expansion.

use std::hash::{Hash, Hasher};

use half::f16;

use crate::{Interpolation, LutError, LutResult};

/// Number of entries in a half-domain LUT: one per half bit pattern.
pub const HALF_DOMAIN_LENGTH: usize = 65536;

/// Hue preservation mode applied around per-channel lookups.
///
/// Independent per-channel table lookups distort the hue of saturated
/// colors; `Dw3` rescales the color delta from the channel minimum by the
/// ratio of post- to pre-lookup chroma to counteract that shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HueAdjust {
    /// No correction; channels are looked up independently.
    #[default]
    None,
    /// DW3 chroma rescaling around the lookup.
    Dw3,
}

/// A 1-dimensional lookup table.
///
/// Stores a discrete transfer function as ordered RGB triples. The table
/// is either indexed by a normalized `[0, 1]` position or, for
/// half-domain tables, by the bit pattern of the input rounded to a
/// half-precision float.
///
/// # Example
///
/// ```rust
/// use lutgpu_lut::Lut1D;
///
/// // Create a gamma 2.2 curve
/// let lut = Lut1D::gamma(256, 2.2);
///
/// // Apply to a value
/// let output = lut.apply(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Lut1D {
    /// LUT entries, one RGB triple per position.
    values: Vec<[f32; 3]>,
    /// Interpolation used when sampling the table.
    interpolation: Interpolation,
    /// Table is indexed by half bit patterns instead of `[0, 1]`.
    half_domain: bool,
    /// Hue preservation applied around the lookup.
    hue_adjust: HueAdjust,
    /// Identifier used to deduplicate identical tables.
    cache_id: String,
}

impl Lut1D {
    /// Creates a LUT from pre-expanded RGB triples.
    pub fn from_values(values: Vec<[f32; 3]>) -> LutResult<Self> {
        if values.is_empty() {
            return Err(LutError::InvalidSize("LUT size must be > 0".into()));
        }
        Ok(Self::build(values, false))
    }

    /// Creates an identity (pass-through) LUT.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of entries (typically 256, 1024, or 4096)
    ///
    /// # Example
    ///
    /// ```rust
    /// use lutgpu_lut::Lut1D;
    ///
    /// let lut = Lut1D::identity(256);
    /// assert!((lut.apply(0.5) - 0.5).abs() < 0.01);
    /// ```
    pub fn identity(size: usize) -> Self {
        let values = (0..size)
            .map(|i| {
                let t = i as f32 / (size - 1) as f32;
                [t, t, t]
            })
            .collect();
        Self::build(values, false)
    }

    /// Creates a gamma curve LUT.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of entries
    /// * `gamma` - Gamma exponent (e.g., 2.2)
    pub fn gamma(size: usize, gamma: f32) -> Self {
        let values = (0..size)
            .map(|i| {
                let t = (i as f32 / (size - 1) as f32).powf(gamma);
                [t, t, t]
            })
            .collect();
        Self::build(values, false)
    }

    /// Creates a half-domain LUT by evaluating `f` at every half value.
    ///
    /// The table has [`HALF_DOMAIN_LENGTH`] entries, one per half bit
    /// pattern, giving even coverage across the full HDR range. Entries
    /// at non-finite half values hold whatever `f` returns there; the
    /// texture packer sanitizes them before upload.
    pub fn half_domain_from_fn(f: impl Fn(f32) -> f32) -> Self {
        let values = (0..=u16::MAX)
            .map(|bits| {
                let y = f(f16::from_bits(bits).to_f32());
                [y, y, y]
            })
            .collect();
        Self::build(values, true)
    }

    /// Creates a pass-through half-domain LUT.
    pub fn half_domain_identity() -> Self {
        Self::half_domain_from_fn(|x| x)
    }

    /// Creates a half-domain LUT from pre-expanded RGB triples.
    ///
    /// `values` must hold exactly one triple per half bit pattern.
    pub fn from_half_domain_values(values: Vec<[f32; 3]>) -> LutResult<Self> {
        if values.len() != HALF_DOMAIN_LENGTH {
            return Err(LutError::InvalidHalfDomainSize(values.len()));
        }
        Ok(Self::build(values, true))
    }

    fn build(values: Vec<[f32; 3]>, half_domain: bool) -> Self {
        let interpolation = Interpolation::default();
        let hue_adjust = HueAdjust::default();
        let cache_id = compute_cache_id(&values, half_domain, interpolation, hue_adjust);
        Self {
            values,
            interpolation,
            half_domain,
            hue_adjust,
            cache_id,
        }
    }

    /// Sets the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self.cache_id =
            compute_cache_id(&self.values, self.half_domain, interpolation, self.hue_adjust);
        self
    }

    /// Sets the hue adjustment mode.
    pub fn with_hue_adjust(mut self, hue_adjust: HueAdjust) -> Self {
        self.hue_adjust = hue_adjust;
        self.cache_id =
            compute_cache_id(&self.values, self.half_domain, self.interpolation, hue_adjust);
        self
    }

    /// Overrides the computed cache identifier.
    pub fn with_cache_id(mut self, cache_id: impl Into<String>) -> Self {
        self.cache_id = cache_id.into();
        self
    }

    /// Returns the number of entries in the LUT.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the LUT has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the LUT entries as ordered RGB triples.
    #[inline]
    pub fn values(&self) -> &[[f32; 3]] {
        &self.values
    }

    /// Returns the interpolation mode.
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns true if the table is indexed by half bit patterns.
    #[inline]
    pub fn is_half_domain(&self) -> bool {
        self.half_domain
    }

    /// Returns the hue adjustment mode.
    #[inline]
    pub fn hue_adjust(&self) -> HueAdjust {
        self.hue_adjust
    }

    /// Returns the cache identifier used for texture deduplication.
    #[inline]
    pub fn cache_id(&self) -> &str {
        &self.cache_id
    }

    /// Applies the LUT to a single value.
    pub fn apply(&self, value: f32) -> f32 {
        self.lookup_channel(0, value)
    }

    /// Applies the LUT to RGB values, one channel at a time.
    pub fn apply_rgb(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            self.lookup_channel(0, rgb[0]),
            self.lookup_channel(1, rgb[1]),
            self.lookup_channel(2, rgb[2]),
        ]
    }

    /// CPU-side table lookup for one channel.
    ///
    /// Half-domain tables are read at the nearest representable half
    /// value; the GPU path interpolates between slots via the sampler.
    fn lookup_channel(&self, channel: usize, value: f32) -> f32 {
        let size = self.values.len();
        if self.half_domain {
            let idx = f16::from_f32(value).to_bits() as usize;
            return self.values[idx.min(size - 1)][channel];
        }

        let pos = value.clamp(0.0, 1.0) * (size - 1) as f32;
        match self.interpolation {
            Interpolation::Nearest => {
                let idx = (pos.round() as usize).min(size - 1);
                self.values[idx][channel]
            }
            Interpolation::Linear => {
                let idx0 = (pos.floor() as usize).min(size - 1);
                let idx1 = (idx0 + 1).min(size - 1);
                let frac = pos - idx0 as f32;
                self.values[idx0][channel] * (1.0 - frac) + self.values[idx1][channel] * frac
            }
        }
    }
}

/// Derives a cache identifier from the table contents and flags.
fn compute_cache_id(
    values: &[[f32; 3]],
    half_domain: bool,
    interpolation: Interpolation,
    hue_adjust: HueAdjust,
) -> String {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for rgb in values {
        for channel in rgb {
            channel.to_bits().hash(&mut hasher);
        }
    }
    half_domain.hash(&mut hasher);
    interpolation.hash(&mut hasher);
    hue_adjust.hash(&mut hasher);
    format!("lut1d:{:016x}", hasher.finish())
}
