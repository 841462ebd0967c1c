//! LUT texture packing with row-overlap padding.
//!
//! A 1D LUT longer than the hardware's maximum texture width is stored
//! as a 2D texture read with a row pitch of `width - 1`. For the
//! coordinate formulas to interpolate continuously across row breaks,
//! the last texel of each row must repeat the first texel of the next
//! row; this module produces that layout.

use crate::error::{ShaderError, ShaderResult};

/// Maps non-finite values to finite fallbacks before texture upload.
///
/// GPU samplers have undefined behavior on NaN or infinite texels, so
/// NaN becomes 0 and infinities saturate to the largest finite value of
/// matching sign. Finite values pass through unchanged.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else if value == f32::INFINITY {
        f32::MAX
    } else if value == f32::NEG_INFINITY {
        f32::MIN
    } else {
        value
    }
}

#[inline]
fn sanitize_rgb(rgb: &[f32; 3]) -> [f32; 3] {
    [sanitize(rgb[0]), sanitize(rgb[1]), sanitize(rgb[2])]
}

/// Computes the texture grid for a LUT of `length` entries.
///
/// `width = min(length, max_width)`, `height = length / max_width + 1`;
/// the extra row holds the overlap and padding texels, so the grid is
/// always at least one texel larger than the table.
pub fn texture_grid(length: usize, max_width: usize) -> ShaderResult<(usize, usize)> {
    if length == 0 {
        return Err(ShaderError::EmptyLut);
    }
    if max_width == 0 {
        return Err(ShaderError::InvalidTextureWidth);
    }
    let width = length.min(max_width);
    let height = length / max_width + 1;
    if width < 2 && height > 1 {
        return Err(ShaderError::DegenerateGrid { width, height });
    }
    Ok((width, height))
}

/// Packs LUT triples into a `width * height` texture buffer.
///
/// Single-row tables are copied in order. Multi-row tables are built
/// from `width - 1` fresh entries per row plus one boundary texel
/// repeating the entry that starts the next row. The buffer is then
/// padded with the last entry up to exactly `width * height` texels.
/// Every copied value passes through [`sanitize`].
pub fn pad_lut_rgb(
    width: usize,
    height: usize,
    values: &[[f32; 3]],
) -> ShaderResult<Vec<[f32; 3]>> {
    if values.is_empty() {
        return Err(ShaderError::EmptyLut);
    }
    if width == 0 {
        return Err(ShaderError::InvalidTextureWidth);
    }
    if height > 1 && width < 2 {
        return Err(ShaderError::DegenerateGrid { width, height });
    }

    let length = values.len();
    let mut packed = Vec::with_capacity(width * height);

    if height > 1 {
        let step = width - 1;
        let mut consumed = 0;
        while consumed + step < length {
            for rgb in &values[consumed..consumed + step] {
                packed.push(sanitize_rgb(rgb));
            }
            // Boundary texel: starts the next row without being consumed.
            packed.push(sanitize_rgb(&values[consumed + step]));
            consumed += step;
        }
        // Final partial row from whatever remains.
        for rgb in &values[consumed..length - 1] {
            packed.push(sanitize_rgb(rgb));
        }
        packed.push(sanitize_rgb(&values[length - 1]));
    } else {
        for rgb in values {
            packed.push(sanitize_rgb(rgb));
        }
    }

    // GPU textures expect exactly width * height texels.
    packed.resize(width * height, sanitize_rgb(&values[length - 1]));

    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ramp of `(i, i + 0.1, i + 0.2)` triples.
    fn ramp(count: usize) -> Vec<[f32; 3]> {
        (0..count)
            .map(|i| [i as f32, i as f32 + 0.1, i as f32 + 0.2])
            .collect()
    }

    #[test]
    fn test_pad_one_row() {
        let packed = pad_lut_rgb(6, 1, &ramp(4)).unwrap();
        let expected = [
            [0.0, 0.1, 0.2],
            [1.0, 1.1, 1.2],
            [2.0, 2.1, 2.2],
            [3.0, 3.1, 3.2],
            [3.0, 3.1, 3.2],
            [3.0, 3.1, 3.2],
        ];
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_pad_rows_with_overlap() {
        let packed = pad_lut_rgb(4, 3, &ramp(8)).unwrap();
        let expected = [
            [0.0, 0.1, 0.2],
            [1.0, 1.1, 1.2],
            [2.0, 2.1, 2.2],
            [3.0, 3.1, 3.2],
            [3.0, 3.1, 3.2],
            [4.0, 4.1, 4.2],
            [5.0, 5.1, 5.2],
            [6.0, 6.1, 6.2],
            [6.0, 6.1, 6.2],
            [7.0, 7.1, 7.2],
            [7.0, 7.1, 7.2],
            [7.0, 7.1, 7.2],
        ];
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_pad_rows_tail_divides_evenly() {
        // 9 entries: the tail splits exactly into the width - 1 pitch,
        // leaving a single trailing repeat.
        let packed = pad_lut_rgb(4, 3, &ramp(9)).unwrap();
        let expected = [
            [0.0, 0.1, 0.2],
            [1.0, 1.1, 1.2],
            [2.0, 2.1, 2.2],
            [3.0, 3.1, 3.2],
            [3.0, 3.1, 3.2],
            [4.0, 4.1, 4.2],
            [5.0, 5.1, 5.2],
            [6.0, 6.1, 6.2],
            [6.0, 6.1, 6.2],
            [7.0, 7.1, 7.2],
            [8.0, 8.1, 8.2],
            [8.0, 8.1, 8.2],
        ];
        assert_eq!(packed, expected);
    }

    #[test]
    fn test_grid_size_invariant() {
        let grids = [1, 2, 3, 5, 16, 100, 257, 1024, 4097]
            .into_iter()
            .flat_map(|length| [(length, 128), (length, 4096)])
            .chain([(5, 4), (9, 4), (16, 4), (100, 10)]);
        for (length, max_width) in grids {
            let (width, height) = texture_grid(length, max_width).unwrap();
            assert_eq!(width, length.min(max_width));
            assert_eq!(height, length / max_width + 1);
            assert!(width * height >= length);

            let packed = pad_lut_rgb(width, height, &ramp(length)).unwrap();
            assert_eq!(packed.len(), width * height);
        }
    }

    #[test]
    fn test_row_boundaries_overlap() {
        let length = 100;
        let (width, height) = texture_grid(length, 10).unwrap();
        let packed = pad_lut_rgb(width, height, &ramp(length)).unwrap();
        // The last texel of each full row equals the first texel that
        // would begin the next (width - 1) advance.
        for row in 0..height - 1 {
            let boundary = packed[row * width + width - 1];
            let source_index = (row + 1) * (width - 1);
            if source_index < length {
                assert_eq!(boundary[0], source_index as f32);
            }
        }
    }

    #[test]
    fn test_sanitize_non_finite() {
        assert_eq!(sanitize(f32::NAN), 0.0);
        assert_eq!(sanitize(f32::INFINITY), f32::MAX);
        assert_eq!(sanitize(f32::NEG_INFINITY), f32::MIN);
        assert_eq!(sanitize(0.25), 0.25);
        assert_eq!(sanitize(-1.0e30), -1.0e30);
    }

    #[test]
    fn test_packed_output_is_finite() {
        let values = vec![
            [f32::NAN, 1.0, f32::INFINITY],
            [2.0, f32::NEG_INFINITY, f32::NAN],
            [3.0, 3.1, 3.2],
            [4.0, 4.1, 4.2],
        ];
        let packed = pad_lut_rgb(3, 2, &values).unwrap();
        for rgb in &packed {
            for channel in rgb {
                assert!(channel.is_finite());
            }
        }
        assert_eq!(packed[0][0], 0.0);
        assert_eq!(packed[0][2], f32::MAX);
        assert_eq!(packed[1][1], f32::MIN);
    }

    #[test]
    fn test_pack_is_pure() {
        let values = ramp(37);
        let a = pad_lut_rgb(7, 6, &values).unwrap();
        let b = pad_lut_rgb(7, 6, &values).unwrap();
        let bits = |v: &[[f32; 3]]| -> Vec<u32> {
            v.iter().flatten().map(|c| c.to_bits()).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_preconditions_rejected() {
        assert!(matches!(
            pad_lut_rgb(4, 1, &[]),
            Err(ShaderError::EmptyLut)
        ));
        assert!(matches!(
            texture_grid(0, 4096),
            Err(ShaderError::EmptyLut)
        ));
        assert!(matches!(
            texture_grid(8, 0),
            Err(ShaderError::InvalidTextureWidth)
        ));
        assert!(matches!(
            texture_grid(8, 1),
            Err(ShaderError::DegenerateGrid { width: 1, .. })
        ));
        assert!(matches!(
            pad_lut_rgb(1, 3, &ramp(4)),
            Err(ShaderError::DegenerateGrid { .. })
        ));
    }

    #[test]
    fn test_single_entry_single_texel() {
        let packed = pad_lut_rgb(1, 1, &ramp(1)).unwrap();
        assert_eq!(packed, [[0.0, 0.1, 0.2]]);
    }
}
