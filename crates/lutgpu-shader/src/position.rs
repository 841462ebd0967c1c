//! Texture addressing for LUT sampling.
//!
//! A LUT texture is addressed one of three ways, chosen once per LUT
//! from its shape: a single-row texture sampled directly, a multi-row
//! texture addressed with a `width - 1` pitch, or a half-domain table
//! indexed by the bit pattern of the input rounded to a half-precision
//! float.
//!
//! The half-domain index has to be reconstructed without integer bit
//! operations, which the target shading dialects do not expose. The
//! reconstruction below uses only `abs`/`log2`/`floor`/`pow` and is
//! exact for every finite half value: for a normal half with unbiased
//! exponent `e` and mantissa fraction `m`, `(e + m + 15) * 1024`
//! reproduces the biased-exponent and mantissa fields in their integer
//! place values, and the denormal scale maps the top of the denormal
//! range to slot 1023. Each function here is mirrored verbatim by the
//! emitted shader code; the two must stay in lockstep or sampling will
//! visibly break at LUT row boundaries.

use lutgpu_lut::Lut1D;

/// Smallest normalized half-precision magnitude, `2^-14`.
pub const HALF_NRM_MIN: f32 = 6.103_515_6e-5;

/// Largest finite half-precision value.
pub const HALF_MAX: f32 = 65_504.0;

/// Top of the half denormal range, `2^-14 - 2^-24`.
///
/// Dividing by this maps the denormal range onto slots `[0, 1023]` so
/// that the first normal value lands exactly on slot 1024.
pub const HALF_DNRM_MAX: f32 = 6.097_555_15e-5;

/// Bias shifting the half exponent into `[1, 31]`.
pub const EXP_BIAS: f32 = 15.0;

/// Place value of the 10-bit mantissa field, `2^10`.
pub const EXP_SCALE: f32 = 1024.0;

/// Place value of the half sign bit, `2^15`.
pub const SIGN_SCALE: f32 = 32768.0;

/// Approximates the half bit pattern of `f` with float arithmetic only.
///
/// Returns the pattern as a float in `[0, 65535]`, suitable for row and
/// column decomposition. Monotonic within each exponent band. NaN inputs
/// are not recoverable this way; they fall into the saturated branch.
pub fn half_index_approx(f: f32) -> f32 {
    let abs_f = f.abs();
    let mut dep = if abs_f > HALF_NRM_MIN {
        let absarr = abs_f.min(HALF_MAX);
        let exponent = absarr.log2().floor();
        // Greatest power of two at or below the input.
        let lower = exponent.exp2();
        let mantissa = (absarr - lower) / lower;
        (exponent + mantissa + EXP_BIAS) * EXP_SCALE
    } else {
        abs_f * 1023.0 / HALF_DNRM_MAX
    };
    if f <= 0.0 {
        dep += SIGN_SCALE;
    }
    dep
}

/// Texture addressing strategy, chosen once per LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Single-row texture sampled directly by normalized position.
    Direct1D {
        /// Number of LUT entries.
        length: usize,
    },
    /// Multi-row texture addressed with a `width - 1` pitch.
    Regular2D {
        /// Number of LUT entries.
        length: usize,
        /// Texture width in texels.
        width: usize,
        /// Texture height in texels.
        height: usize,
    },
    /// Table indexed by the approximate half bit pattern of the input.
    HalfDomain2D {
        /// Texture width in texels.
        width: usize,
        /// Texture height in texels.
        height: usize,
    },
}

impl Addressing {
    /// Selects the addressing mode for `lut` on a `width x height` grid.
    pub fn select(lut: &Lut1D, width: usize, height: usize) -> Self {
        if lut.is_half_domain() {
            Addressing::HalfDomain2D { width, height }
        } else if height > 1 {
            Addressing::Regular2D {
                length: lut.len(),
                width,
                height,
            }
        } else {
            Addressing::Direct1D { length: lut.len() }
        }
    }

    /// True when sampling goes through a 2D texture and the emitted
    /// coordinate helper.
    pub fn is_two_dimensional(&self) -> bool {
        !matches!(self, Addressing::Direct1D { .. })
    }

    /// CPU mirror of the emitted coordinate computation.
    ///
    /// Returns normalized `(u, v)`; `v` is 0.5 for the single-row case.
    /// Only the upper bound is clamped: inputs above 1 saturate to the
    /// last entry, while negative inputs pass through and may address
    /// below the first row, matching the emitted formulas.
    pub fn texel_pos(&self, f: f32) -> (f32, f32) {
        match *self {
            Addressing::Direct1D { length } => {
                let u = (f.min(1.0) * (length - 1) as f32 + 0.5) / length as f32;
                (u, 0.5)
            }
            Addressing::Regular2D {
                length,
                width,
                height,
            } => {
                let dep = f.min(1.0) * (length - 1) as f32;
                decompose(dep, width, height)
            }
            Addressing::HalfDomain2D { width, height } => {
                decompose(half_index_approx(f), width, height)
            }
        }
    }
}

/// Splits a flat texel index into normalized `(u, v)` on the grid.
fn decompose(dep: f32, width: usize, height: usize) -> (f32, f32) {
    let pitch = (width - 1) as f32;
    let row = (dep / pitch).trunc();
    let col = dep - row * pitch;
    ((col + 0.5) / width as f32, (row + 0.5) / height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use half::f16;

    #[test]
    fn test_constants_match_reference_codec() {
        assert_eq!(HALF_NRM_MIN, f16::MIN_POSITIVE.to_f32());
        assert_eq!(HALF_MAX, f16::MAX.to_f32());
        assert_eq!(
            HALF_DNRM_MAX,
            f16::MIN_POSITIVE.to_f32() - f16::MIN_POSITIVE_SUBNORMAL.to_f32()
        );
    }

    #[test]
    fn test_half_index_matches_positive_bit_patterns() {
        // Every finite positive half, denormals included. Bit pattern 0
        // is excluded: zero takes the sign-bit branch by construction.
        for bits in 1..0x7C00_u16 {
            let f = f16::from_bits(bits).to_f32();
            let index = half_index_approx(f);
            assert!(
                (index - bits as f32).abs() <= 0.5,
                "bits {bits:#06x}: index {index}"
            );
        }
    }

    #[test]
    fn test_half_index_matches_negative_bit_patterns() {
        for bits in [0x8001_u16, 0x8400, 0x9c00, 0xbc00, 0xfbff] {
            let f = f16::from_bits(bits).to_f32();
            assert!(f < 0.0);
            let index = half_index_approx(f);
            assert!(
                (index - bits as f32).abs() <= 0.5,
                "bits {bits:#06x}: index {index}"
            );
        }
    }

    #[test]
    fn test_half_index_monotonic_within_bands() {
        let mut f = 1.0e-6_f32;
        let mut previous = half_index_approx(f);
        while f < HALF_MAX {
            f *= 1.003;
            let index = half_index_approx(f);
            assert!(
                index >= previous,
                "index decreased at f = {f}: {index} < {previous}"
            );
            previous = index;
        }
    }

    #[test]
    fn test_half_index_zero_and_sign() {
        // Zero takes the sign branch: both signed zeros land on the
        // negative-zero slot.
        assert_eq!(half_index_approx(0.0), SIGN_SCALE);
        assert_eq!(half_index_approx(-0.0), SIGN_SCALE);
        // Values beyond the half range saturate at the largest finite
        // half slot.
        assert!((half_index_approx(1.0e6) - 0x7BFF as f32).abs() <= 0.5);
    }

    #[test]
    fn test_direct_1d_boundaries() {
        let mode = Addressing::Direct1D { length: 256 };
        let (u0, _) = mode.texel_pos(0.0);
        let (u1, _) = mode.texel_pos(1.0);
        assert_abs_diff_eq!(u0, 0.5 / 256.0, epsilon = 1e-7);
        assert_abs_diff_eq!(u1, 255.5 / 256.0, epsilon = 1e-7);
        // Upper bound is clamped.
        assert_eq!(mode.texel_pos(2.0), mode.texel_pos(1.0));
    }

    #[test]
    fn test_regular_2d_boundaries() {
        let mode = Addressing::Regular2D {
            length: 8,
            width: 4,
            height: 3,
        };
        // f = 0 decodes to row 0, column 0.
        let (u, v) = mode.texel_pos(0.0);
        assert_abs_diff_eq!(u, 0.5 / 4.0, epsilon = 1e-7);
        assert_abs_diff_eq!(v, 0.5 / 3.0, epsilon = 1e-7);
        // f = 1 decodes to the last packed texel: dep = 7, row 2, col 1.
        let (u, v) = mode.texel_pos(1.0);
        assert_abs_diff_eq!(u, 1.5 / 4.0, epsilon = 1e-7);
        assert_abs_diff_eq!(v, 2.5 / 3.0, epsilon = 1e-7);
    }

    #[test]
    fn test_regular_2d_negative_passes_through() {
        let mode = Addressing::Regular2D {
            length: 8,
            width: 4,
            height: 3,
        };
        let (u, v) = mode.texel_pos(-0.25);
        assert!(u.is_finite() && v.is_finite());
        // Below-zero inputs address below the first texel center.
        assert!(u < 0.5 / 4.0);
    }

    #[test]
    fn test_half_domain_2d_decomposition() {
        let mode = Addressing::HalfDomain2D {
            width: 4096,
            height: 17,
        };
        // 1.0 as a half is 0x3C00 = 15360; pitch is 4095.
        let (u, v) = mode.texel_pos(1.0);
        let row = (15360.0_f32 / 4095.0).floor();
        let col = 15360.0 - row * 4095.0;
        assert_abs_diff_eq!(u, (col + 0.5) / 4096.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v, (row + 0.5) / 17.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mode_selection() {
        let small = Lut1D::identity(16);
        assert_eq!(
            Addressing::select(&small, 16, 1),
            Addressing::Direct1D { length: 16 }
        );

        let long = Lut1D::identity(10000);
        assert_eq!(
            Addressing::select(&long, 4096, 3),
            Addressing::Regular2D {
                length: 10000,
                width: 4096,
                height: 3
            }
        );

        let half_domain = Lut1D::half_domain_identity();
        assert_eq!(
            Addressing::select(&half_domain, 4096, 17),
            Addressing::HalfDomain2D {
                width: 4096,
                height: 17
            }
        );
    }
}
