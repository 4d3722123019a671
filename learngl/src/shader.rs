//! Shader API.
//!
//! A [`Shader`] is built from a single text file holding several shader stages, each introduced by
//! a `#shader <stage>` directive line (see [`source`] for the format). Building it goes through
//! four steps:
//!
//! 1. The file is split into per-stage sources ([`ShaderSource::parse`]).
//! 2. Every stage is compiled ([`Stage::new`]).
//! 3. The stages are attached to a new program, which gets linked and validated.
//! 4. The stages are released; only the program remains, along with an empty
//!    [`UniformLocationCache`].
//!
//! Construction is all-or-nothing: if any step fails, every handle created so far is released
//! and no [`Shader`] is returned.
//!
//! ```ignore
//! let mut shader = Shader::from_file(&mut ctx, "resources/shaders/Basic.shader")?;
//! shader.set_uniform("u_Color", [0.2, 0.3, 0.8, 1.0]);
//! ```

pub mod source;
pub mod uniform;

pub use self::source::{ShaderSource, SourceError};
pub use self::uniform::{UniformLocation, UniformLocationCache, UniformWarning};

use std::error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::shader::{Shader as ShaderBackend, Uniformable};
use crate::context::GraphicsContext;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Tessellation control shader.
  TessellationControlShader,
  /// Tessellation evaluation shader.
  TessellationEvaluationShader,
  /// Geometry shader.
  GeometryShader,
  /// Fragment shader.
  FragmentShader,
}

impl StageType {
  /// Keyword naming this stage in a `#shader` directive.
  pub fn keyword(self) -> &'static str {
    match self {
      StageType::VertexShader => "vertex",
      StageType::TessellationControlShader => "tess_control",
      StageType::TessellationEvaluationShader => "tess_evaluation",
      StageType::GeometryShader => "geometry",
      StageType::FragmentShader => "fragment",
    }
  }

  /// Stage named by a `#shader` directive keyword, if any.
  ///
  /// Keywords are case-sensitive.
  pub fn from_keyword(keyword: &str) -> Option<Self> {
    match keyword {
      "vertex" => Some(StageType::VertexShader),
      "tess_control" => Some(StageType::TessellationControlShader),
      "tess_evaluation" => Some(StageType::TessellationEvaluationShader),
      "geometry" => Some(StageType::GeometryShader),
      "fragment" => Some(StageType::FragmentShader),
      _ => None,
    }
  }
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::TessellationControlShader => f.write_str("tessellation control shader"),
      StageType::TessellationEvaluationShader => f.write_str("tessellation evaluation shader"),
      StageType::GeometryShader => f.write_str("geometry shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  ///
  /// The `String` is the diagnostic log of the backend compiler. It is bounded by the backend’s
  /// reporting buffer, so very long diagnostics might be cut.
  CompilationFailed(StageType, String),
  /// Occurs when the backend cannot create a stage of this type.
  UnsupportedType(StageType),
}

impl StageError {
  /// Create a compilation error.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),

      StageError::UnsupportedType(ty) => write!(f, "unsupported {}", ty),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a program can generate while being linked.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// The backend could not allocate a new program.
  CreationFailed,
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Create a link error.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::CreationFailed => f.write_str("cannot create shader program"),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {}

/// Any error that can occur while building a [`Shader`].
#[non_exhaustive]
#[derive(Debug)]
pub enum ShaderError {
  /// The shader source file could not be read.
  Io(PathBuf, io::Error),
  /// The shader source is malformed.
  Source(SourceError),
  /// A stage failed to compile.
  Stage(StageError),
  /// The program failed to link.
  Program(ProgramError),
}

impl fmt::Display for ShaderError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ShaderError::Io(ref path, ref e) => write!(f, "cannot read {}: {}", path.display(), e),
      ShaderError::Source(ref e) => write!(f, "malformed shader source: {}", e),
      ShaderError::Stage(ref e) => write!(f, "shader stage error: {}", e),
      ShaderError::Program(ref e) => write!(f, "shader program error: {}", e),
    }
  }
}

impl error::Error for ShaderError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ShaderError::Io(_, e) => Some(e),
      ShaderError::Source(e) => Some(e),
      ShaderError::Stage(e) => Some(e),
      ShaderError::Program(e) => Some(e),
    }
  }
}

impl From<SourceError> for ShaderError {
  fn from(e: SourceError) -> Self {
    ShaderError::Source(e)
  }
}

impl From<StageError> for ShaderError {
  fn from(e: StageError) -> Self {
    ShaderError::Stage(e)
  }
}

impl From<ProgramError> for ShaderError {
  fn from(e: ProgramError) -> Self {
    ShaderError::Program(e)
  }
}

/// Tessellation stages, passed together to the linker.
#[derive(Debug)]
pub struct TessellationStages<'a, S>
where
  S: ?Sized,
{
  /// Tessellation control stage.
  pub control: &'a S,
  /// Tessellation evaluation stage.
  pub evaluation: &'a S,
}

/// A compiled shader stage.
///
/// Stages are transient: they only live long enough to be linked into a program, and are
/// released when dropped.
pub struct Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  repr: B::StageRepr,
  ty: StageType,
}

impl<B> Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  /// Compile a new stage of type `ty` from `src`.
  pub fn new<C, R>(ctx: &mut C, ty: StageType, src: R) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = B>,
    R: AsRef<str>,
  {
    let repr = unsafe { ctx.backend().new_stage(ty, src.as_ref())? };
    log::trace!("compiled {}", ty);

    Ok(Stage { repr, ty })
  }

  /// Type of this stage.
  pub fn ty(&self) -> StageType {
    self.ty
  }
}

impl<B> Drop for Stage<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_stage(&mut self.repr) }
  }
}

/// A linked shader program, along with its uniform location cache.
///
/// Dropping a [`Shader`] releases its program.
pub struct Shader<B>
where
  B: ?Sized + ShaderBackend,
{
  repr: B::ProgramRepr,
  uniforms: UniformLocationCache,
}

impl<B> Shader<B>
where
  B: ?Sized + ShaderBackend,
{
  /// Read, parse, compile and link the shader source file at `path`.
  pub fn from_file<C, P>(ctx: &mut C, path: P) -> Result<Self, ShaderError>
  where
    C: GraphicsContext<Backend = B>,
    P: AsRef<Path>,
  {
    let source = ShaderSource::from_file(path)?;
    Self::from_source(ctx, &source)
  }

  /// Parse, compile and link a combined shader source text.
  pub fn from_text<C>(ctx: &mut C, text: &str) -> Result<Self, ShaderError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let source = ShaderSource::parse(text)?;
    Self::from_source(ctx, &source)
  }

  /// Compile and link already parsed shader sources.
  ///
  /// The vertex and fragment stages are mandatory. The geometry stage is optional, and so are the
  /// tessellation stages, which must come in pairs.
  pub fn from_source<C>(ctx: &mut C, source: &ShaderSource) -> Result<Self, ShaderError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let vertex_src = source
      .get(StageType::VertexShader)
      .ok_or(SourceError::MissingStage(StageType::VertexShader))?;
    let fragment_src = source
      .get(StageType::FragmentShader)
      .ok_or(SourceError::MissingStage(StageType::FragmentShader))?;

    let tess_src = match (
      source.get(StageType::TessellationControlShader),
      source.get(StageType::TessellationEvaluationShader),
    ) {
      (Some(control), Some(evaluation)) => Some((control, evaluation)),
      (None, None) => None,
      (Some(_), None) => {
        return Err(SourceError::MissingStage(StageType::TessellationEvaluationShader).into())
      }
      (None, Some(_)) => {
        return Err(SourceError::MissingStage(StageType::TessellationControlShader).into())
      }
    };

    // stages are dropped, hence released, when leaving this function, whatever the outcome
    let vertex = Stage::new(ctx, StageType::VertexShader, vertex_src)?;
    let tess = match tess_src {
      Some((control, evaluation)) => Some((
        Stage::new(ctx, StageType::TessellationControlShader, control)?,
        Stage::new(ctx, StageType::TessellationEvaluationShader, evaluation)?,
      )),
      None => None,
    };
    let geometry = source
      .get(StageType::GeometryShader)
      .map(|src| Stage::new(ctx, StageType::GeometryShader, src))
      .transpose()?;
    let fragment = Stage::new(ctx, StageType::FragmentShader, fragment_src)?;

    let repr = unsafe {
      ctx.backend().new_program(
        &vertex.repr,
        tess.as_ref().map(|(control, evaluation)| TessellationStages {
          control: &control.repr,
          evaluation: &evaluation.repr,
        }),
        geometry.as_ref().map(|geometry| &geometry.repr),
        &fragment.repr,
      )?
    };

    if let Err(log) = unsafe { B::validate_program(&repr) } {
      log::warn!("shader program validation failed: {}", log);
    }

    log::debug!("shader program linked ({} stages)", source.len());

    Ok(Shader {
      repr,
      uniforms: UniformLocationCache::new(),
    })
  }

  /// Make this program the active one.
  pub fn bind(&self) {
    unsafe { B::bind_program(&self.repr) }
  }

  /// Clear the active program.
  ///
  /// This doesn’t restore whatever program was active before [`Shader::bind`]: no program is
  /// active afterwards.
  pub fn unbind(&self) {
    unsafe { B::unbind_program(&self.repr) }
  }

  /// Location of the uniform `name`, going through the cache.
  pub fn uniform_location(&mut self, name: &str) -> UniformLocation {
    let repr = &self.repr;
    self
      .uniforms
      .resolve(name, |name| unsafe { B::query_uniform_location(repr, name) })
  }

  /// Write `value` to the uniform `name`.
  ///
  /// The program is bound, written to and then unbound. Writing to a uniform that doesn’t exist
  /// is a no-op (a warning is logged the first time its location is queried).
  ///
  /// Because the program is left unbound, interleaving uniform writes on two shaders with draws
  /// requires binding the right shader again before drawing.
  pub fn set_uniform<T>(&mut self, name: &str, value: T)
  where
    B: Uniformable<T>,
  {
    self.bind();

    if let UniformLocation::Found(location) = self.uniform_location(name) {
      unsafe { B::set_uniform(&self.repr, location, value) };
    }

    self.unbind();
  }

  /// The uniform location cache of this program.
  pub fn uniforms(&self) -> &UniformLocationCache {
    &self.uniforms
  }
}

impl<B> Drop for Shader<B>
where
  B: ?Sized + ShaderBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_program(&mut self.repr) }
  }
}
