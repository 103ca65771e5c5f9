use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    foundation::{
        core::ColorVec4,
        error::{WipeError, WipeResult},
    },
    gfx::texture::Texture,
};

/// File name of the blend effect shipped in the crate's `data/` directory.
pub const EFFECT_FILE_NAME: &str = "animated_wipe_transition.effect";

/// Technique used for the blend draw.
pub const BLEND_TECHNIQUE: &str = "AnimatedWipe";

const BUILTIN_EFFECT_SOURCE: &str = include_str!("../../data/animated_wipe_transition.effect");

const REQUIRED_PARAMS: [(&str, ParamType); 6] = [
    ("a_tex", ParamType::Texture2d),
    ("b_tex", ParamType::Texture2d),
    ("c_tex", ParamType::Texture2d),
    ("invert", ParamType::Bool),
    ("color_target_a", ParamType::Float4),
    ("color_target_b", ParamType::Float4),
];

/// Positioned error produced while parsing effect source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectParseError {
    /// Byte offset into the effect source.
    pub offset: usize,
    /// Human readable description.
    pub message: String,
}

impl EffectParseError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for EffectParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect parse error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for EffectParseError {}

/// Declared type of an effect uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `float2`
    Float2,
    /// `float3`
    Float3,
    /// `float4`
    Float4,
    /// `float4x4`
    Float4x4,
    /// `texture2d`
    Texture2d,
    /// Any other declared type.
    Other,
}

impl ParamType {
    fn from_ident(ident: &str) -> Self {
        match ident {
            "bool" => Self::Bool,
            "int" => Self::Int,
            "float" => Self::Float,
            "float2" | "vec2" => Self::Float2,
            "float3" | "vec3" => Self::Float3,
            "float4" | "vec4" => Self::Float4,
            "float4x4" | "matrix4" => Self::Float4x4,
            "texture2d" | "texture_rect" => Self::Texture2d,
            _ => Self::Other,
        }
    }
}

/// A `uniform` declared by the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectParam {
    /// Uniform name.
    pub name: String,
    /// Declared type.
    pub ty: ParamType,
}

/// A named technique and its passes, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Technique {
    /// Technique name.
    pub name: String,
    /// Pass names; unnamed passes are numbered `pass0`, `pass1`, ...
    pub passes: Vec<String>,
}

/// Interface of a parsed effect file: its uniforms and techniques.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectProgram {
    params: Vec<EffectParam>,
    techniques: Vec<Technique>,
}

impl EffectProgram {
    /// Parse effect source text.
    pub fn parse(src: &str) -> Result<Self, EffectParseError> {
        let tokens = lex(src)?;
        let mut p = Parser {
            tokens,
            pos: 0,
            program: EffectProgram::default(),
        };
        p.parse_items()?;
        Ok(p.program)
    }

    /// Look up a uniform by name.
    pub fn param(&self, name: &str) -> Option<&EffectParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// All uniforms in declaration order.
    pub fn params(&self) -> &[EffectParam] {
        &self.params
    }

    /// Look up a technique by name.
    pub fn technique(&self, name: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.name == name)
    }
}

/// Blend shader program bound to the wipe parameter contract.
#[derive(Clone, Debug)]
pub struct BlendEffect {
    program: EffectProgram,
    path: Option<PathBuf>,
}

impl BlendEffect {
    /// Load and validate an effect file.
    ///
    /// Failures are logged with the attempted path and parser errors before being returned.
    pub fn load(path: &Path) -> WipeResult<Self> {
        let src = match std::fs::read_to_string(path) {
            Ok(src) => src,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "could not open effect file");
                return Err(WipeError::effect(format!(
                    "could not open effect '{}': {e}",
                    path.display()
                )));
            }
        };
        let mut effect = Self::from_source(&src).inspect_err(|e| {
            tracing::error!(path = %path.display(), errors = %e, "unable to create effect");
        })?;
        effect.path = Some(path.to_path_buf());
        Ok(effect)
    }

    /// The effect compiled into the crate.
    pub fn builtin() -> WipeResult<Self> {
        Self::from_source(BUILTIN_EFFECT_SOURCE)
    }

    /// Parse and validate effect source.
    pub fn from_source(src: &str) -> WipeResult<Self> {
        let program = EffectProgram::parse(src).map_err(|e| WipeError::effect(e.to_string()))?;
        Self::from_program(program)
    }

    /// Validate that `program` exposes every blend parameter and the blend technique.
    pub fn from_program(program: EffectProgram) -> WipeResult<Self> {
        for (name, ty) in REQUIRED_PARAMS {
            match program.param(name) {
                None => {
                    return Err(WipeError::effect(format!(
                        "effect is missing parameter '{name}'"
                    )));
                }
                Some(p) if p.ty != ty => {
                    return Err(WipeError::effect(format!(
                        "effect parameter '{name}' has type {:?}, expected {ty:?}",
                        p.ty
                    )));
                }
                Some(_) => {}
            }
        }
        match program.technique(BLEND_TECHNIQUE) {
            None => Err(WipeError::effect(format!(
                "effect is missing technique '{BLEND_TECHNIQUE}'"
            ))),
            Some(t) if t.passes.is_empty() => Err(WipeError::effect(format!(
                "technique '{BLEND_TECHNIQUE}' has no passes"
            ))),
            Some(_) => Ok(Self {
                program,
                path: None,
            }),
        }
    }

    /// Parsed program interface.
    pub fn program(&self) -> &EffectProgram {
        &self.program
    }

    /// File the effect was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Values bound to the blend effect for one draw.
#[derive(Clone, Copy, Debug)]
pub struct BlendParams<'a> {
    /// Outgoing source.
    pub a_tex: &'a Texture,
    /// Incoming source.
    pub b_tex: &'a Texture,
    /// Mask.
    pub c_tex: &'a Texture,
    /// Swap which mask color reveals which source.
    pub invert: bool,
    /// Mask color that shows source A.
    pub color_target_a: ColorVec4,
    /// Mask color that shows source B.
    pub color_target_b: ColorVec4,
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Ident(String),
    Number,
    Str,
    Punct(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn lex(src: &str) -> Result<Vec<Token>, EffectParseError> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;

        if (c == '/' && bytes.get(i + 1) == Some(&b'/')) || c == '#' {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            loop {
                if i + 1 >= bytes.len() {
                    return Err(EffectParseError::new(start, "unterminated block comment"));
                }
                if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                    i += 2;
                    break;
                }
                i += 1;
            }
            continue;
        }

        let kind = if c.is_ascii_alphabetic() || c == '_' {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            TokenKind::Ident(src[start..i].to_owned())
        } else if c.is_ascii_digit()
            || (c == '.' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()))
        {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.') {
                i += 1;
            }
            TokenKind::Number
        } else if c == '"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            if i >= bytes.len() {
                return Err(EffectParseError::new(start, "unterminated string literal"));
            }
            i += 1;
            TokenKind::Str
        } else if c.is_ascii_punctuation() {
            i += 1;
            TokenKind::Punct(c)
        } else {
            return Err(EffectParseError::new(
                start,
                format!(
                    "unexpected character '{}'",
                    src[start..].chars().next().unwrap_or('?')
                ),
            ));
        };
        out.push(Token {
            kind,
            offset: start,
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        offset: src.len(),
    });
    Ok(out)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    program: EffectProgram,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn is_ident(&self, word: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s == word)
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, EffectParseError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Ident(s) => Ok(s),
            other => Err(EffectParseError::new(
                t.offset,
                format!("expected {what}, found {other:?}"),
            )),
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), EffectParseError> {
        let t = self.bump();
        if t.kind == TokenKind::Punct(c) {
            Ok(())
        } else {
            Err(EffectParseError::new(
                t.offset,
                format!("expected '{c}', found {:?}", t.kind),
            ))
        }
    }

    fn parse_items(&mut self) -> Result<(), EffectParseError> {
        loop {
            match &self.peek().kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Punct(';') => {
                    self.bump();
                }
                TokenKind::Punct('}') => {
                    return Err(EffectParseError::new(self.peek().offset, "unexpected '}'"));
                }
                _ if self.is_ident("uniform") => self.parse_uniform()?,
                _ if self.is_ident("technique") => self.parse_technique()?,
                _ => self.skip_item()?,
            }
        }
    }

    fn parse_uniform(&mut self) -> Result<(), EffectParseError> {
        self.bump();
        let ty = self.expect_ident("uniform type")?;
        let name_offset = self.peek().offset;
        let name = self.expect_ident("uniform name")?;
        if self.program.param(&name).is_some() {
            return Err(EffectParseError::new(
                name_offset,
                format!("duplicate uniform '{name}'"),
            ));
        }

        // Initializers and annotations are irrelevant to the interface.
        loop {
            let t = self.bump();
            match t.kind {
                TokenKind::Punct(';') => break,
                TokenKind::Eof => {
                    return Err(EffectParseError::new(
                        t.offset,
                        format!("unterminated uniform '{name}'"),
                    ));
                }
                _ => {}
            }
        }

        self.program.params.push(EffectParam {
            name,
            ty: ParamType::from_ident(&ty),
        });
        Ok(())
    }

    fn parse_technique(&mut self) -> Result<(), EffectParseError> {
        self.bump();
        let name = self.expect_ident("technique name")?;
        self.expect_punct('{')?;

        let mut passes = Vec::new();
        loop {
            if self.peek().kind == TokenKind::Punct('}') {
                self.bump();
                break;
            }
            if !self.is_ident("pass") {
                let t = self.peek();
                return Err(EffectParseError::new(
                    t.offset,
                    format!("expected 'pass' in technique '{name}', found {:?}", t.kind),
                ));
            }
            self.bump();
            let pass_name = match &self.peek().kind {
                TokenKind::Ident(s) => {
                    let s = s.clone();
                    self.bump();
                    s
                }
                _ => format!("pass{}", passes.len()),
            };
            self.expect_punct('{')?;
            self.skip_block_body()?;
            passes.push(pass_name);
        }

        self.program.techniques.push(Technique { name, passes });
        Ok(())
    }

    /// Skip to the `}` matching an already consumed `{`.
    fn skip_block_body(&mut self) -> Result<(), EffectParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            let t = self.bump();
            match t.kind {
                TokenKind::Punct('{') => depth += 1,
                TokenKind::Punct('}') => depth -= 1,
                TokenKind::Eof => {
                    return Err(EffectParseError::new(t.offset, "unexpected end of input in block"));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Skip a declaration we do not model: up to `;`, or through its balanced `{ ... }` body.
    fn skip_item(&mut self) -> Result<(), EffectParseError> {
        loop {
            let t = self.bump();
            match t.kind {
                TokenKind::Punct(';') => return Ok(()),
                TokenKind::Punct('{') => return self.skip_block_body(),
                TokenKind::Punct('}') => {
                    return Err(EffectParseError::new(t.offset, "unexpected '}'"));
                }
                TokenKind::Eof => {
                    return Err(EffectParseError::new(t.offset, "unexpected end of input"));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gfx/effect.rs"]
mod tests;
