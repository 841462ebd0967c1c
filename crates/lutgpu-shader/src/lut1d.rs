//! GPU shader generation for 1D LUTs.
//!
//! [`emit_lut1d`] turns a [`Lut1D`] into a registered texture resource
//! plus the code fragments that sample it: a texture declaration, a
//! coordinate helper for the 2D addressing modes, and a per-pixel block
//! applying the lookup to each channel.

use tracing::{debug, trace};

use lutgpu_lut::{HueAdjust, Lut1D};

use crate::desc::{GpuTexture, ShaderDesc, TextureChannels};
use crate::error::ShaderResult;
use crate::pack::{pad_lut_rgb, texture_grid};
use crate::position::{
    Addressing, EXP_BIAS, EXP_SCALE, HALF_DNRM_MAX, HALF_MAX, HALF_NRM_MIN, SIGN_SCALE,
};
use crate::text::{float_str, ShaderText};

/// Emits one 1D LUT operation into the shader program sink.
///
/// Registers the packed LUT texture (deduplicated by cache ID), emits
/// the matching declaration and coordinate helper for fresh textures,
/// and always appends a per-pixel sampling block. Preconditions are
/// validated before the sink is touched.
///
/// # Example
///
/// ```rust
/// use lutgpu_lut::Lut1D;
/// use lutgpu_shader::{emit_lut1d, GpuLanguage, ShaderDesc};
///
/// let lut = Lut1D::gamma(1024, 2.2);
/// let mut shader = ShaderDesc::new(GpuLanguage::Glsl330);
/// emit_lut1d(&lut, &mut shader)?;
/// assert_eq!(shader.num_textures(), 1);
/// # Ok::<(), lutgpu_shader::ShaderError>(())
/// ```
pub fn emit_lut1d(lut: &Lut1D, shader: &mut ShaderDesc) -> ShaderResult<()> {
    let (width, height) = texture_grid(lut.len(), shader.max_texture_width())?;
    let addressing = Addressing::select(lut, width, height);

    // The declaration and helper are tied to the texture name, so a
    // cache hit skips those too and only the per-pixel block repeats.
    let registered = shader
        .texture_by_cache_id(lut.cache_id())
        .map(|texture| texture.name.clone());
    let (name, fresh) = match registered {
        Some(name) => {
            trace!(name = %name, "reusing registered LUT texture");
            (name, false)
        }
        None => {
            let packed = pad_lut_rgb(width, height, lut.values())?;
            let name = format!(
                "{}lut1d_{}",
                shader.resource_prefix(),
                shader.num_textures()
            );
            debug!(name = %name, width, height, "registering 1D LUT texture");
            shader.add_texture(GpuTexture {
                name: name.clone(),
                cache_id: lut.cache_id().to_string(),
                width,
                height,
                channels: TextureChannels::Rgb,
                interpolation: lut.interpolation(),
                data: packed.into_iter().flatten().collect(),
            });
            (name, true)
        }
    };

    if fresh {
        let mut ss = ShaderText::new(shader.language());
        if addressing.is_two_dimensional() {
            ss.declare_tex2d(&name);
        } else {
            ss.declare_tex1d(&name);
        }
        shader.append_declaration(&ss.string());

        if addressing.is_two_dimensional() {
            let mut ss = ShaderText::new(shader.language());
            write_compute_pos(&mut ss, &name, &addressing);
            shader.append_helper(&ss.string());
        }
    }

    let mut ss = ShaderText::new(shader.language());
    write_pixel_block(&mut ss, &name, &addressing, lut, shader.pixel_name());
    shader.append_function_body(&ss.string());

    Ok(())
}

/// Writes the `<name>_computePos` coordinate helper for the 2D modes.
fn write_compute_pos(ss: &mut ShaderText, name: &str, addressing: &Addressing) {
    let (width, height) = match *addressing {
        Addressing::Regular2D { width, height, .. }
        | Addressing::HalfDomain2D { width, height } => (width, height),
        // Direct 1D inlines its mapping at the sample site.
        Addressing::Direct1D { .. } => return,
    };
    let pitch = float_str((width - 1) as f32);

    let signature = format!("{} {name}_computePos(float f)", ss.vec2_keyword());
    ss.line(signature);
    ss.line("{");
    ss.indent();

    let ret = format!("{};", ss.vec2_decl("retVal"));
    if let Addressing::Regular2D { length, .. } = *addressing {
        // min() protects against f > 1 producing a bogus column.
        ss.line(format!(
            "float dep = min(f, 1.0) * {};",
            float_str((length - 1) as f32)
        ));
        ss.line(ret);
        ss.line(format!("retVal.y = float(int(dep / {pitch}));"));
    } else {
        write_half_index(ss);
        ss.line(ret);
        ss.line(format!("retVal.y = floor(dep / {pitch});"));
    }
    ss.line(format!("retVal.x = dep - retVal.y * {pitch};"));
    ss.line(format!(
        "retVal.x = (retVal.x + 0.5) / {};",
        float_str(width as f32)
    ));
    ss.line(format!(
        "retVal.y = (retVal.y + 0.5) / {};",
        float_str(height as f32)
    ));
    ss.line("return retVal;");
    ss.dedent();
    ss.line("}");
}

/// Writes the half bit-pattern reconstruction of `f` into `dep`.
///
/// Same formulas as [`half_index_approx`](crate::half_index_approx);
/// the two must stay in lockstep.
fn write_half_index(ss: &mut ShaderText) {
    ss.line("float dep;");
    ss.line("float abs_f = abs(f);");
    ss.line(format!("if (abs_f > {})", float_str(HALF_NRM_MIN)));
    ss.line("{");
    ss.indent();
    ss.line(format!("float absarr = min(abs_f, {});", float_str(HALF_MAX)));
    // Unbiased exponent; the input domain keeps it in the half range.
    ss.line("float exponent = floor(log2(absarr));");
    // Greatest power of two at or below the input.
    ss.line("float lower = pow(2.0, exponent);");
    // Mantissa fraction in [0, 1).
    ss.line("float mantissa = (absarr - lower) / lower;");
    ss.line(format!(
        "dep = (exponent + mantissa + {}) * {};",
        float_str(EXP_BIAS),
        float_str(EXP_SCALE)
    ));
    ss.dedent();
    ss.line("}");
    ss.line("else");
    ss.line("{");
    ss.indent();
    // The denormal range scales linearly onto the low 1024 slots.
    ss.line(format!("dep = abs_f * 1023.0 / {};", float_str(HALF_DNRM_MAX)));
    ss.dedent();
    ss.line("}");
    // Raw halfs of NaN inputs cannot be recovered with float math.
    ss.line(format!("dep += step(f, 0.0) * {};", float_str(SIGN_SCALE)));
}

/// Writes the per-pixel block: hue-adjust wrapper, coordinate
/// computation and one sample per channel.
fn write_pixel_block(
    ss: &mut ShaderText,
    name: &str,
    addressing: &Addressing,
    lut: &Lut1D,
    pixel: &str,
) {
    ss.indent();
    ss.line("");
    ss.line(format!("// 1D LUT processing for {name}"));
    ss.line("");
    ss.line("{");
    ss.indent();

    if lut.hue_adjust() == HueAdjust::Dw3 {
        write_hue_adjust_pre(ss, pixel);
    }

    match *addressing {
        Addressing::Direct1D { length } => {
            let dim = length as f32;
            let coords = format!("{name}_coords");
            let decl = ss.vec3_decl(&coords);
            let scale = ss.vec3_const(dim - 1.0);
            let offset = ss.vec3_const(0.5);
            let divisor = ss.vec3_const(dim);
            let one = ss.vec3_const(1.0);
            ss.line(format!(
                "{decl} = (min({pixel}.rgb, {one}) * {scale} + {offset}) / {divisor};"
            ));
            for channel in ["r", "g", "b"] {
                let sample = ss.sample_tex1d(name, &format!("{coords}.{channel}"));
                ss.line(format!("{pixel}.{channel} = {sample}.{channel};"));
            }
        }
        Addressing::Regular2D { .. } | Addressing::HalfDomain2D { .. } => {
            for channel in ["r", "g", "b"] {
                let coord = format!("{name}_computePos({pixel}.{channel})");
                let sample = ss.sample_tex2d(name, &coord);
                ss.line(format!("{pixel}.{channel} = {sample}.{channel};"));
            }
        }
    }

    if lut.hue_adjust() == HueAdjust::Dw3 {
        write_hue_adjust_post(ss, pixel);
    }

    ss.dedent();
    ss.line("}");
}

/// Captures pre-lookup chroma and the per-channel delta from the minimum.
fn write_hue_adjust_pre(ss: &mut ShaderText, pixel: &str) {
    ss.line("// Pre-lookup hue state");
    let maxval = ss.vec3_decl("maxval");
    ss.line(format!(
        "{maxval} = max({pixel}.rgb, max({pixel}.gbr, {pixel}.brg));"
    ));
    let minval = ss.vec3_decl("minval");
    ss.line(format!(
        "{minval} = min({pixel}.rgb, min({pixel}.gbr, {pixel}.brg));"
    ));
    ss.line("float oldChroma = max(1e-8, maxval.r - minval.r);");
    let delta = ss.vec3_decl("delta");
    ss.line(format!("{delta} = {pixel}.rgb - minval;"));
    ss.line("");
}

/// Rescales the delta by the post- to pre-lookup chroma ratio.
fn write_hue_adjust_post(ss: &mut ShaderText, pixel: &str) {
    ss.line("");
    ss.line("// Post-lookup hue restore");
    let maxval2 = ss.vec3_decl("maxval2");
    ss.line(format!(
        "{maxval2} = max({pixel}.rgb, max({pixel}.gbr, {pixel}.brg));"
    ));
    let minval2 = ss.vec3_decl("minval2");
    ss.line(format!(
        "{minval2} = min({pixel}.rgb, min({pixel}.gbr, {pixel}.brg));"
    ));
    ss.line("float newChroma = maxval2.r - minval2.r;");
    ss.line(format!(
        "{pixel}.rgb = minval2.r + delta * newChroma / oldChroma;"
    ));
}
