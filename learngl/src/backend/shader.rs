//! Shader backend interface.
//!
//! This interface defines the low-level API shader stages and programs must implement to be usable.

use crate::shader::{ProgramError, StageError, StageType, TessellationStages, UniformLocation};

/// Shader support on the backend.
///
/// # Safety
///
/// Representations returned by this trait must own exactly one live device handle each, and the
/// `destroy_*` functions must be idempotent: destroying an already destroyed representation is a
/// no-op.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  type StageRepr;

  /// Backend representation of a linked shader program.
  type ProgramRepr;

  /// Create and compile a new shader stage.
  ///
  /// On compilation failure, the stage handle must be released before returning.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Release a shader stage.
  unsafe fn destroy_stage(stage: &mut Self::StageRepr);

  /// Create a new program, attach the stages to it and link it.
  ///
  /// On link failure, the program handle must be released before returning. The stages are left
  /// untouched; their owner releases them.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Validate a linked program against the current device state.
  ///
  /// The returned error holds the backend diagnostic log. Validation is advisory.
  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String>;

  /// Release a program.
  unsafe fn destroy_program(program: &mut Self::ProgramRepr);

  /// Make a program the active one.
  unsafe fn bind_program(program: &Self::ProgramRepr);

  /// Clear the active program, whatever it is.
  unsafe fn unbind_program(program: &Self::ProgramRepr);

  /// Ask the device for the location of a uniform.
  unsafe fn query_uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation;
}

/// Types of values that can be written to uniforms.
///
/// # Safety
///
/// The program must be bound when [`Uniformable::set_uniform`] is called.
pub unsafe trait Uniformable<T>: Shader {
  /// Write a value to the uniform at `location` of the (bound) program.
  unsafe fn set_uniform(program: &Self::ProgramRepr, location: i32, value: T);
}
