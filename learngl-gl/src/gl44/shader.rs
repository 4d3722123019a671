use crate::gl44::state::GLState;
use crate::gl44::GL44;
use gl::types::*;
use learngl::backend::shader::{Shader, Uniformable};
use learngl::shader::{ProgramError, StageError, StageType, TessellationStages, UniformLocation};
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::null;
use std::rc::Rc;

/// Size of the buffer compile, link and validation logs are read into; longer logs are cut.
const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Stage {
  unsafe fn delete(&mut self) {
    if self.handle != 0 {
      gl_call!(gl::DeleteShader(self.handle));
      log::trace!("deleted {} {}", self.ty, self.handle);
      self.handle = 0;
    }
  }
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe { self.delete() }
  }
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Program {
  unsafe fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    gl_call!(gl::LinkProgram(handle));

    let mut linked: GLint = gl::FALSE.into();
    gl_call!(gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked));

    if linked == gl::TRUE.into() {
      Ok(())
    } else {
      Err(ProgramError::link_failed(program_info_log(handle)))
    }
  }

  unsafe fn delete(&mut self) {
    if self.handle != 0 {
      let mut state = self.state.borrow_mut();

      // a program in use is only flagged for deletion
      if state.current_program() == self.handle {
        state.use_program(0);
      }

      gl_call!(gl::DeleteProgram(self.handle));
      log::debug!("deleted shader program {}", self.handle);
      self.handle = 0;
    }
  }
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe { self.delete() }
  }
}

unsafe impl Shader for GL44 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(src.as_bytes())
      .map_err(|e| StageError::compilation_failed(ty, format!("invalid source: {}", e)))?;

    let handle = gl_call!(gl::CreateShader(opengl_shader_type(ty)));

    if handle == 0 {
      return Err(StageError::UnsupportedType(ty));
    }

    gl_call!(gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null()));
    gl_call!(gl::CompileShader(handle));

    let mut compiled: GLint = gl::FALSE.into();
    gl_call!(gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled));

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let log = info_log(|capacity, len, buf| {
        gl_call!(gl::GetShaderInfoLog(handle, capacity, len, buf))
      });

      gl_call!(gl::DeleteShader(handle));

      Err(StageError::compilation_failed(ty, log))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    stage.delete();
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl_call!(gl::CreateProgram());

    if handle == 0 {
      return Err(ProgramError::CreationFailed);
    }

    // from now on, dropping the program deletes it
    let program = Program {
      handle,
      state: self.state.clone(),
    };

    let mut stages = vec![vertex.handle];

    if let Some(TessellationStages {
      control,
      evaluation,
    }) = tess
    {
      stages.push(control.handle);
      stages.push(evaluation.handle);
    }

    if let Some(geometry) = geometry {
      stages.push(geometry.handle);
    }

    stages.push(fragment.handle);

    for &stage in &stages {
      gl_call!(gl::AttachShader(handle, stage));
    }

    program.link()?;

    // linked programs don’t need their stages anymore
    for &stage in &stages {
      gl_call!(gl::DetachShader(handle, stage));
    }

    log::debug!("linked shader program {}", handle);

    Ok(program)
  }

  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String> {
    let handle = program.handle;

    gl_call!(gl::ValidateProgram(handle));

    let mut validated: GLint = gl::FALSE.into();
    gl_call!(gl::GetProgramiv(handle, gl::VALIDATE_STATUS, &mut validated));

    if validated == gl::TRUE.into() {
      Ok(())
    } else {
      Err(program_info_log(handle))
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    program.delete();
  }

  unsafe fn bind_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn unbind_program(program: &Self::ProgramRepr) {
    program.state.borrow_mut().use_program(0);
  }

  unsafe fn query_uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation {
    let c_name = match CString::new(name.as_bytes()) {
      Ok(c_name) => c_name,
      Err(_) => return UniformLocation::NotFound,
    };

    let location = gl_call!(gl::GetUniformLocation(
      program.handle,
      c_name.as_ptr() as *const GLchar
    ));

    UniformLocation::from_raw(location)
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::TessellationControlShader => gl::TESS_CONTROL_SHADER,
    StageType::TessellationEvaluationShader => gl::TESS_EVALUATION_SHADER,
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::GeometryShader => gl::GEOMETRY_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

unsafe fn program_info_log(handle: GLuint) -> String {
  info_log(|capacity, len, buf| {
    gl_call!(gl::GetProgramInfoLog(handle, capacity, len, buf))
  })
}

// Read a diagnostic log into a bounded buffer.
unsafe fn info_log<F>(read: F) -> String
where
  F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
  let mut log = vec![0u8; INFO_LOG_CAPACITY];
  let mut len: GLsizei = 0;

  read(
    INFO_LOG_CAPACITY as GLsizei,
    &mut len,
    log.as_mut_ptr() as *mut GLchar,
  );

  decode_log(log, len)
}

fn decode_log(mut log: Vec<u8>, len: GLsizei) -> String {
  log.truncate(len.max(0) as usize);
  String::from_utf8_lossy(&log).into_owned()
}

macro_rules! impl_Uniformable {
  (vec $t:ty, $f:tt) => {
    unsafe impl Uniformable<$t> for GL44 {
      unsafe fn set_uniform(_: &Program, location: GLint, value: $t) {
        gl_call!(gl::$f(location, 1, value.as_ptr() as _));
      }
    }
  };

  (mat $t:ty, $f:tt) => {
    unsafe impl Uniformable<$t> for GL44 {
      unsafe fn set_uniform(_: &Program, location: GLint, value: $t) {
        // column-major
        gl_call!(gl::$f(location, 1, gl::FALSE, value.as_ptr() as _));
      }
    }
  };

  ($t:ty, $f:tt) => {
    unsafe impl Uniformable<$t> for GL44 {
      unsafe fn set_uniform(_: &Program, location: GLint, value: $t) {
        gl_call!(gl::$f(location, value));
      }
    }
  };
}

impl_Uniformable!(i32, Uniform1i);
impl_Uniformable!(vec [i32; 2], Uniform2iv);
impl_Uniformable!(vec [i32; 3], Uniform3iv);
impl_Uniformable!(vec [i32; 4], Uniform4iv);

impl_Uniformable!(u32, Uniform1ui);
impl_Uniformable!(vec [u32; 2], Uniform2uiv);
impl_Uniformable!(vec [u32; 3], Uniform3uiv);
impl_Uniformable!(vec [u32; 4], Uniform4uiv);

impl_Uniformable!(f32, Uniform1f);
impl_Uniformable!(vec [f32; 2], Uniform2fv);
impl_Uniformable!(vec [f32; 3], Uniform3fv);
impl_Uniformable!(vec [f32; 4], Uniform4fv);

impl_Uniformable!(mat [[f32; 2]; 2], UniformMatrix2fv);
impl_Uniformable!(mat [[f32; 3]; 3], UniformMatrix3fv);
impl_Uniformable!(mat [[f32; 4]; 4], UniformMatrix4fv);

unsafe impl Uniformable<bool> for GL44 {
  unsafe fn set_uniform(_: &Program, location: GLint, value: bool) {
    gl_call!(gl::Uniform1i(location, value as GLint));
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn shader_types() {
    assert_eq!(opengl_shader_type(StageType::VertexShader), gl::VERTEX_SHADER);
    assert_eq!(
      opengl_shader_type(StageType::FragmentShader),
      gl::FRAGMENT_SHADER
    );
    assert_eq!(
      opengl_shader_type(StageType::GeometryShader),
      gl::GEOMETRY_SHADER
    );
  }

  #[test]
  fn decode_truncates_to_written_length() {
    let mut buf = vec![0u8; INFO_LOG_CAPACITY];
    buf[..15].copy_from_slice(b"0:1: bad token\n");

    assert_eq!(decode_log(buf, 15), "0:1: bad token\n");
  }

  #[test]
  fn decode_empty_log() {
    assert_eq!(decode_log(vec![0u8; INFO_LOG_CAPACITY], 0), "");
    assert_eq!(decode_log(vec![0u8; INFO_LOG_CAPACITY], -1), "");
  }

  #[test]
  fn decode_log_at_capacity() {
    let log = decode_log(vec![b'x'; INFO_LOG_CAPACITY], INFO_LOG_CAPACITY as GLsizei);

    assert_eq!(log.len(), INFO_LOG_CAPACITY);
    assert!(log.bytes().all(|b| b == b'x'));
  }

  #[test]
  fn info_log_is_bounded() {
    let log = unsafe {
      info_log(|capacity, len, buf| {
        assert_eq!(capacity as usize, INFO_LOG_CAPACITY);

        for i in 0..capacity as usize {
          *buf.add(i) = b'x' as GLchar;
        }

        // a longer log than the buffer can hold
        *len = capacity * 2;
      })
    };

    assert_eq!(log.len(), INFO_LOG_CAPACITY);
  }

  #[test]
  fn decode_invalid_utf8() {
    let log = vec![b'e', b'r', 0xff, b'r'];
    assert_eq!(decode_log(log, 4), "er\u{fffd}r");
  }
}
