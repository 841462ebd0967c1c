//! Shading-dialect abstraction and shader source building.
//!
//! [`ShaderText`] accumulates lines of shader source and supplies the
//! syntax primitives that differ between target languages: vector type
//! keywords, texture declarations and sampling calls. The emitter is
//! written once against these primitives, so dialects are swappable
//! without touching the emission logic.

use std::fmt::Write;

/// Target shader language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuLanguage {
    /// GLSL 1.20 (OpenGL 2.1)
    Glsl120,
    /// GLSL 3.30 (OpenGL 3.3)
    #[default]
    Glsl330,
    /// GLSL 4.00 (OpenGL 4.0)
    Glsl400,
    /// GLSL ES 3.00 (WebGL 2.0)
    GlslEs300,
    /// HLSL Shader Model 5.0
    Hlsl50,
}

impl GpuLanguage {
    /// Returns the version directive for this language.
    pub fn version_directive(&self) -> &'static str {
        match self {
            GpuLanguage::Glsl120 => "#version 120",
            GpuLanguage::Glsl330 => "#version 330 core",
            GpuLanguage::Glsl400 => "#version 400 core",
            GpuLanguage::GlslEs300 => "#version 300 es\nprecision highp float;",
            GpuLanguage::Hlsl50 => "",
        }
    }

    /// Returns true if this is a GLSL variant.
    pub fn is_glsl(&self) -> bool {
        matches!(
            self,
            GpuLanguage::Glsl120
                | GpuLanguage::Glsl330
                | GpuLanguage::Glsl400
                | GpuLanguage::GlslEs300
        )
    }
}

/// Formats a value as a shader float literal.
///
/// Shader compilers reject `4095` where a float is expected, so a
/// fractional part is forced when the shortest representation has none.
pub fn float_str(value: f32) -> String {
    let s = format!("{value}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

/// Builder for one block of shader source in a specific dialect.
///
/// Transient: created per code fragment, drained with [`ShaderText::string`]
/// into the shader program sink.
#[derive(Debug)]
pub struct ShaderText {
    language: GpuLanguage,
    buf: String,
    indent: usize,
}

impl ShaderText {
    /// Creates an empty builder for `language`.
    pub fn new(language: GpuLanguage) -> Self {
        Self {
            language,
            buf: String::new(),
            indent: 0,
        }
    }

    /// Returns the target language.
    pub fn language(&self) -> GpuLanguage {
        self.language
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decreases the indentation level.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Appends one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buf.push_str("    ");
            }
        }
        // Writing into a String cannot fail.
        writeln!(self.buf, "{text}").unwrap();
    }

    /// Consumes the builder and returns the accumulated source.
    pub fn string(self) -> String {
        self.buf
    }

    /// Keyword for a 2-component float vector.
    pub fn vec2_keyword(&self) -> &'static str {
        if self.language.is_glsl() { "vec2" } else { "float2" }
    }

    /// Keyword for a 3-component float vector.
    pub fn vec3_keyword(&self) -> &'static str {
        if self.language.is_glsl() { "vec3" } else { "float3" }
    }

    /// Keyword for a 4-component float vector.
    pub fn vec4_keyword(&self) -> &'static str {
        if self.language.is_glsl() { "vec4" } else { "float4" }
    }

    /// Declaration of a 2-component vector variable, e.g. `vec2 name`.
    pub fn vec2_decl(&self, name: &str) -> String {
        format!("{} {}", self.vec2_keyword(), name)
    }

    /// Declaration of a 3-component vector variable, e.g. `vec3 name`.
    pub fn vec3_decl(&self, name: &str) -> String {
        format!("{} {}", self.vec3_keyword(), name)
    }

    /// Splatted 3-component vector literal, e.g. `vec3(0.5, 0.5, 0.5)`.
    pub fn vec3_const(&self, value: f32) -> String {
        let v = float_str(value);
        format!("{}({v}, {v}, {v})", self.vec3_keyword())
    }

    /// Appends the declaration of a 1D LUT texture.
    ///
    /// GLSL ES has no 1D samplers; single-row LUTs are declared (and
    /// sampled) as 2D there.
    pub fn declare_tex1d(&mut self, name: &str) {
        match self.language {
            GpuLanguage::Glsl120 | GpuLanguage::Glsl330 | GpuLanguage::Glsl400 => {
                self.line(format!("uniform sampler1D {name};"));
            }
            GpuLanguage::GlslEs300 => {
                self.line(format!("uniform sampler2D {name};"));
            }
            GpuLanguage::Hlsl50 => {
                self.line(format!("Texture1D {name};"));
                self.line(format!("SamplerState {name}Sampler;"));
            }
        }
    }

    /// Appends the declaration of a 2D LUT texture.
    pub fn declare_tex2d(&mut self, name: &str) {
        match self.language {
            GpuLanguage::Glsl120
            | GpuLanguage::Glsl330
            | GpuLanguage::Glsl400
            | GpuLanguage::GlslEs300 => {
                self.line(format!("uniform sampler2D {name};"));
            }
            GpuLanguage::Hlsl50 => {
                self.line(format!("Texture2D {name};"));
                self.line(format!("SamplerState {name}Sampler;"));
            }
        }
    }

    /// Expression sampling a 1D texture at `coord`.
    pub fn sample_tex1d(&self, name: &str, coord: &str) -> String {
        match self.language {
            GpuLanguage::Glsl120 => format!("texture1D({name}, {coord})"),
            GpuLanguage::Glsl330 | GpuLanguage::Glsl400 => format!("texture({name}, {coord})"),
            GpuLanguage::GlslEs300 => format!("texture({name}, vec2({coord}, 0.5))"),
            GpuLanguage::Hlsl50 => format!("{name}.Sample({name}Sampler, {coord})"),
        }
    }

    /// Expression sampling a 2D texture at `coord`.
    pub fn sample_tex2d(&self, name: &str, coord: &str) -> String {
        match self.language {
            GpuLanguage::Glsl120 => format!("texture2D({name}, {coord})"),
            GpuLanguage::Glsl330 | GpuLanguage::Glsl400 | GpuLanguage::GlslEs300 => {
                format!("texture({name}, {coord})")
            }
            GpuLanguage::Hlsl50 => format!("{name}.Sample({name}Sampler, {coord})"),
        }
    }
}
