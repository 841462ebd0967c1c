//! Shader program sink.
//!
//! [`ShaderDesc`] accumulates the pieces of a shader program being
//! assembled: texture resources plus three ordered text sections
//! (declarations, helper functions, per-pixel function body). Emitters
//! only append; nothing is read back or rewritten.

use std::fmt::Write;

use lutgpu_lut::Interpolation;

use crate::text::{GpuLanguage, ShaderText};

/// Channel layout for registered textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureChannels {
    /// One channel per texel.
    Red,
    /// Three interleaved channels per texel.
    Rgb,
}

/// GPU texture holding packed LUT data.
#[derive(Debug, Clone)]
pub struct GpuTexture {
    /// Resource name referenced by the generated code.
    pub name: String,
    /// Cache identifier of the LUT the data came from.
    pub cache_id: String,
    /// Texture width in texels.
    pub width: usize,
    /// Texture height in texels (1 for single-row textures).
    pub height: usize,
    /// Channel layout of `data`.
    pub channels: TextureChannels,
    /// Sampling interpolation requested for this texture.
    pub interpolation: Interpolation,
    /// Texel data, channel-interleaved, row-major.
    pub data: Vec<f32>,
}

/// Accumulates generated shader code and texture resources.
///
/// Owned by the caller for the duration of one program-assembly pass and
/// borrowed mutably by each emission call; emission calls must be
/// sequenced.
#[derive(Debug)]
pub struct ShaderDesc {
    language: GpuLanguage,
    max_texture_width: usize,
    resource_prefix: String,
    pixel_name: String,
    declarations: String,
    helpers: String,
    function_body: String,
    textures: Vec<GpuTexture>,
}

impl ShaderDesc {
    /// Creates an empty sink for `language`.
    pub fn new(language: GpuLanguage) -> Self {
        Self {
            language,
            max_texture_width: 4096,
            resource_prefix: String::new(),
            pixel_name: "outColor".into(),
            declarations: String::new(),
            helpers: String::new(),
            function_body: String::new(),
            textures: Vec::new(),
        }
    }

    /// Sets the maximum texture width the target hardware supports.
    pub fn with_max_texture_width(mut self, width: usize) -> Self {
        self.max_texture_width = width;
        self
    }

    /// Sets the prefix prepended to generated resource names.
    pub fn with_resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_prefix = prefix.into();
        self
    }

    /// Sets the name of the pixel variable the generated code rewrites.
    pub fn with_pixel_name(mut self, name: impl Into<String>) -> Self {
        self.pixel_name = name.into();
        self
    }

    /// Returns the target language.
    pub fn language(&self) -> GpuLanguage {
        self.language
    }

    /// Returns the maximum texture width.
    pub fn max_texture_width(&self) -> usize {
        self.max_texture_width
    }

    /// Returns the resource name prefix.
    pub fn resource_prefix(&self) -> &str {
        &self.resource_prefix
    }

    /// Returns the pixel variable name.
    pub fn pixel_name(&self) -> &str {
        &self.pixel_name
    }

    /// Returns the number of registered textures.
    pub fn num_textures(&self) -> usize {
        self.textures.len()
    }

    /// Returns the registered textures.
    pub fn textures(&self) -> &[GpuTexture] {
        &self.textures
    }

    /// Finds a registered texture by its LUT cache identifier.
    pub fn texture_by_cache_id(&self, cache_id: &str) -> Option<&GpuTexture> {
        self.textures.iter().find(|t| t.cache_id == cache_id)
    }

    /// Registers a texture resource.
    pub fn add_texture(&mut self, texture: GpuTexture) {
        self.textures.push(texture);
    }

    /// Appends to the declaration section.
    pub fn append_declaration(&mut self, code: &str) {
        self.declarations.push_str(code);
    }

    /// Appends to the helper-function section.
    pub fn append_helper(&mut self, code: &str) {
        self.helpers.push_str(code);
    }

    /// Appends to the per-pixel function body.
    pub fn append_function_body(&mut self, code: &str) {
        self.function_body.push_str(code);
    }

    /// Returns the declaration section.
    pub fn declarations(&self) -> &str {
        &self.declarations
    }

    /// Returns the helper-function section.
    pub fn helpers(&self) -> &str {
        &self.helpers
    }

    /// Returns the per-pixel function body.
    pub fn function_body(&self) -> &str {
        &self.function_body
    }

    /// Assembles the accumulated sections into one fragment of shader
    /// source: version directive, declarations, helpers and a function
    /// named `function_name` wrapping the per-pixel body.
    pub fn fragment_source(&self, function_name: &str) -> String {
        let mut out = String::new();
        let directive = self.language.version_directive();
        if !directive.is_empty() {
            writeln!(out, "{directive}").unwrap();
            out.push('\n');
        }
        if !self.declarations.is_empty() {
            out.push_str(&self.declarations);
            out.push('\n');
        }
        if !self.helpers.is_empty() {
            out.push_str(&self.helpers);
            out.push('\n');
        }

        let ss = ShaderText::new(self.language);
        writeln!(
            out,
            "{vec4} {function_name}({vec4} {pixel})",
            vec4 = ss.vec4_keyword(),
            pixel = self.pixel_name
        )
        .unwrap();
        out.push_str("{\n");
        out.push_str(&self.function_body);
        writeln!(out, "    return {};", self.pixel_name).unwrap();
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(name: &str, cache_id: &str) -> GpuTexture {
        GpuTexture {
            name: name.into(),
            cache_id: cache_id.into(),
            width: 2,
            height: 1,
            channels: TextureChannels::Rgb,
            interpolation: Interpolation::Linear,
            data: vec![0.0; 6],
        }
    }

    #[test]
    fn test_texture_lookup_by_cache_id() {
        let mut desc = ShaderDesc::new(GpuLanguage::Glsl330);
        desc.add_texture(texture("lut1d_0", "cache-a"));
        assert_eq!(desc.num_textures(), 1);
        assert_eq!(desc.texture_by_cache_id("cache-a").unwrap().name, "lut1d_0");
        assert!(desc.texture_by_cache_id("cache-b").is_none());
    }

    #[test]
    fn test_sections_append_in_order() {
        let mut desc = ShaderDesc::new(GpuLanguage::Glsl330);
        desc.append_declaration("uniform sampler1D a;\n");
        desc.append_declaration("uniform sampler1D b;\n");
        assert_eq!(desc.declarations(), "uniform sampler1D a;\nuniform sampler1D b;\n");
    }

    #[test]
    fn test_fragment_source_assembly() {
        let mut desc = ShaderDesc::new(GpuLanguage::Glsl330).with_pixel_name("px");
        desc.append_declaration("uniform sampler1D lut;\n");
        desc.append_helper("vec2 lut_computePos(float f) { return vec2(f, 0.5); }\n");
        desc.append_function_body("    px.r = 1.0;\n");

        let src = desc.fragment_source("apply_luts");
        assert!(src.starts_with("#version 330 core\n"));
        assert!(src.contains("uniform sampler1D lut;"));
        assert!(src.contains("lut_computePos"));
        assert!(src.contains("vec4 apply_luts(vec4 px)"));
        assert!(src.contains("return px;"));
        // Declarations come before helpers, helpers before the function.
        let decl = src.find("uniform").unwrap();
        let helper = src.find("computePos").unwrap();
        let func = src.find("apply_luts").unwrap();
        assert!(decl < helper && helper < func);
    }

    #[test]
    fn test_fragment_source_hlsl_has_no_directive() {
        let desc = ShaderDesc::new(GpuLanguage::Hlsl50).with_pixel_name("px");
        let src = desc.fragment_source("apply_luts");
        assert!(src.starts_with("float4 apply_luts(float4 px)"));
    }
}
