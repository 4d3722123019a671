//! A recording backend.
//!
//! Nothing reaches a device: every backend call is appended to a call log, live handles are
//! tracked per resource kind, and the current binding of each resource kind is kept explicitly in
//! [`Bindings`]. Failures can be injected through [`MockState`].

#![allow(dead_code)]

use learngl::backend::buffer::Buffer;
use learngl::backend::renderer::Renderer;
use learngl::backend::shader::{Shader, Uniformable};
use learngl::backend::vertex_array::VertexArray;
use learngl::buffer::{BufferError, IndexType};
use learngl::context::GraphicsContext;
use learngl::layout::{AttribDesc, AttribType};
use learngl::renderer::{PolygonMode, PrimitiveMode};
use learngl::shader::{ProgramError, StageError, StageType, TessellationStages, UniformLocation};
use learngl::vertex_array::VertexArrayError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// A recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
  CompileStage(StageType),
  DestroyStage(u32),
  CreateProgram(u32),
  AttachStage { program: u32, stage: u32 },
  LinkProgram(u32),
  ValidateProgram(u32),
  DestroyProgram(u32),
  UseProgram(u32),
  QueryUniform(String),
  SetUniform { program: u32, location: i32, value: String },
  CreateBuffer(u32),
  DestroyBuffer(u32),
  BindVertexBuffer(u32),
  BindIndexBuffer(u32),
  CreateVertexArray(u32),
  DestroyVertexArray(u32),
  BindVertexArray(u32),
  EnableAttrib {
    slot: u32,
    ty: AttribType,
    count: usize,
    normalized: bool,
    stride: usize,
    offset: usize,
  },
  Clear { color: [f32; 4], depth: bool },
  DrawIndexed { mode: PrimitiveMode, count: usize, index_type: IndexType },
  Viewport([i32; 4]),
  PolygonMode(PolygonMode),
}

/// Current binding of each resource kind; `0` means nothing is bound.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bindings {
  pub program: u32,
  pub vertex_array: u32,
  pub vertex_buffer: u32,
  pub index_buffer: u32,
}

#[derive(Debug)]
pub struct MockState {
  next_handle: u32,
  pub live_stages: HashSet<u32>,
  pub live_programs: HashSet<u32>,
  pub live_buffers: HashSet<u32>,
  pub live_vertex_arrays: HashSet<u32>,
  pub bindings: Bindings,
  pub calls: Vec<Call>,
  pub uniform_queries: usize,
  /// Uniforms the linked programs pretend to have.
  pub active_uniforms: HashMap<String, i32>,
  /// Stage type that fails to compile, if any.
  pub failing_stage: Option<StageType>,
  /// Link log to fail with, if any.
  pub failing_link: Option<String>,
  /// Validation log to fail with, if any.
  pub failing_validation: Option<String>,
  pub max_vertex_attribs: usize,
  /// Uploaded payloads, per buffer handle.
  pub payloads: HashMap<u32, Vec<u8>>,
}

impl Default for MockState {
  fn default() -> Self {
    MockState {
      next_handle: 1,
      live_stages: HashSet::new(),
      live_programs: HashSet::new(),
      live_buffers: HashSet::new(),
      live_vertex_arrays: HashSet::new(),
      bindings: Bindings::default(),
      calls: Vec::new(),
      uniform_queries: 0,
      active_uniforms: HashMap::new(),
      failing_stage: None,
      failing_link: None,
      failing_validation: None,
      max_vertex_attribs: 16,
      payloads: HashMap::new(),
    }
  }
}

impl MockState {
  fn new_handle(&mut self) -> u32 {
    let handle = self.next_handle;
    self.next_handle += 1;
    handle
  }

  /// Number of live handles, all kinds together.
  pub fn live_handles(&self) -> usize {
    self.live_stages.len()
      + self.live_programs.len()
      + self.live_buffers.len()
      + self.live_vertex_arrays.len()
  }

  /// Calls recorded since `start`.
  pub fn calls_since(&self, start: usize) -> &[Call] {
    &self.calls[start..]
  }
}

type SharedState = Rc<RefCell<MockState>>;

#[derive(Debug)]
pub struct Mock {
  state: SharedState,
}

#[derive(Debug)]
pub struct MockContext {
  backend: Mock,
}

impl MockContext {
  pub fn new() -> Self {
    MockContext {
      backend: Mock {
        state: Rc::new(RefCell::new(MockState::default())),
      },
    }
  }

  /// Shared access to the recorded state.
  pub fn state(&self) -> SharedState {
    self.backend.state.clone()
  }

  /// Number of calls recorded so far.
  pub fn mark(&self) -> usize {
    self.backend.state.borrow().calls.len()
  }
}

unsafe impl GraphicsContext for MockContext {
  type Backend = Mock;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

#[derive(Debug)]
pub struct MockStage {
  handle: u32,
  state: SharedState,
}

#[derive(Debug)]
pub struct MockProgram {
  pub handle: u32,
  state: SharedState,
}

#[derive(Debug)]
pub struct MockBuffer {
  pub handle: u32,
  state: SharedState,
}

#[derive(Debug)]
pub struct MockVertexArray {
  pub handle: u32,
  state: SharedState,
}

unsafe impl Shader for Mock {
  type StageRepr = MockStage;

  type ProgramRepr = MockProgram;

  unsafe fn new_stage(&mut self, ty: StageType, _: &str) -> Result<Self::StageRepr, StageError> {
    let mut st = self.state.borrow_mut();
    let handle = st.new_handle();
    st.calls.push(Call::CompileStage(ty));

    if st.failing_stage == Some(ty) {
      st.calls.push(Call::DestroyStage(handle));
      return Err(StageError::compilation_failed(ty, "0:1: mock error"));
    }

    st.live_stages.insert(handle);
    Ok(MockStage {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    if stage.handle != 0 {
      let mut st = stage.state.borrow_mut();
      st.live_stages.remove(&stage.handle);
      st.calls.push(Call::DestroyStage(stage.handle));
      stage.handle = 0;
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let mut st = self.state.borrow_mut();
    let handle = st.new_handle();
    st.live_programs.insert(handle);
    st.calls.push(Call::CreateProgram(handle));

    let mut stages = vec![vertex];
    if let Some(TessellationStages {
      control,
      evaluation,
    }) = tess
    {
      stages.push(control);
      stages.push(evaluation);
    }
    stages.extend(geometry);
    stages.push(fragment);

    for stage in stages {
      assert!(st.live_stages.contains(&stage.handle), "attaching a dead stage");
      st.calls.push(Call::AttachStage {
        program: handle,
        stage: stage.handle,
      });
    }

    st.calls.push(Call::LinkProgram(handle));

    if let Some(log) = st.failing_link.clone() {
      st.live_programs.remove(&handle);
      st.calls.push(Call::DestroyProgram(handle));
      return Err(ProgramError::link_failed(log));
    }

    Ok(MockProgram {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn validate_program(program: &Self::ProgramRepr) -> Result<(), String> {
    let mut st = program.state.borrow_mut();
    st.calls.push(Call::ValidateProgram(program.handle));

    match st.failing_validation.clone() {
      Some(log) => Err(log),
      None => Ok(()),
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    if program.handle != 0 {
      let mut st = program.state.borrow_mut();
      st.live_programs.remove(&program.handle);
      st.calls.push(Call::DestroyProgram(program.handle));

      if st.bindings.program == program.handle {
        st.bindings.program = 0;
      }

      program.handle = 0;
    }
  }

  unsafe fn bind_program(program: &Self::ProgramRepr) {
    let mut st = program.state.borrow_mut();
    st.bindings.program = program.handle;
    st.calls.push(Call::UseProgram(program.handle));
  }

  unsafe fn unbind_program(program: &Self::ProgramRepr) {
    let mut st = program.state.borrow_mut();
    st.bindings.program = 0;
    st.calls.push(Call::UseProgram(0));
  }

  unsafe fn query_uniform_location(program: &Self::ProgramRepr, name: &str) -> UniformLocation {
    let mut st = program.state.borrow_mut();
    st.uniform_queries += 1;
    st.calls.push(Call::QueryUniform(name.to_owned()));

    UniformLocation::from_raw(st.active_uniforms.get(name).copied().unwrap_or(-1))
  }
}

unsafe impl<T> Uniformable<T> for Mock
where
  T: fmt::Debug,
{
  unsafe fn set_uniform(program: &Self::ProgramRepr, location: i32, value: T) {
    let mut st = program.state.borrow_mut();
    assert_eq!(st.bindings.program, program.handle, "writing to an unbound program");

    st.calls.push(Call::SetUniform {
      program: program.handle,
      location,
      value: format!("{:?}", value),
    });
  }
}

impl Mock {
  fn new_buffer(&mut self, bytes: &[u8]) -> MockBuffer {
    let mut st = self.state.borrow_mut();
    let handle = st.new_handle();
    st.live_buffers.insert(handle);
    st.payloads.insert(handle, bytes.to_vec());
    st.calls.push(Call::CreateBuffer(handle));

    MockBuffer {
      handle,
      state: self.state.clone(),
    }
  }
}

unsafe impl Buffer for Mock {
  type BufferRepr = MockBuffer;

  unsafe fn new_vertex_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError> {
    Ok(self.new_buffer(bytes))
  }

  unsafe fn new_index_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError> {
    Ok(self.new_buffer(bytes))
  }

  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr) {
    if buffer.handle != 0 {
      let mut st = buffer.state.borrow_mut();
      st.live_buffers.remove(&buffer.handle);
      st.calls.push(Call::DestroyBuffer(buffer.handle));

      if st.bindings.vertex_buffer == buffer.handle {
        st.bindings.vertex_buffer = 0;
      }

      if st.bindings.index_buffer == buffer.handle {
        st.bindings.index_buffer = 0;
      }

      buffer.handle = 0;
    }
  }

  unsafe fn bind_vertex_buffer(buffer: &Self::BufferRepr) {
    let mut st = buffer.state.borrow_mut();
    st.bindings.vertex_buffer = buffer.handle;
    st.calls.push(Call::BindVertexBuffer(buffer.handle));
  }

  unsafe fn unbind_vertex_buffer(buffer: &Self::BufferRepr) {
    let mut st = buffer.state.borrow_mut();
    st.bindings.vertex_buffer = 0;
    st.calls.push(Call::BindVertexBuffer(0));
  }

  unsafe fn bind_index_buffer(buffer: &Self::BufferRepr) {
    let mut st = buffer.state.borrow_mut();
    st.bindings.index_buffer = buffer.handle;
    st.calls.push(Call::BindIndexBuffer(buffer.handle));
  }

  unsafe fn unbind_index_buffer(buffer: &Self::BufferRepr) {
    let mut st = buffer.state.borrow_mut();
    st.bindings.index_buffer = 0;
    st.calls.push(Call::BindIndexBuffer(0));
  }
}

unsafe impl VertexArray for Mock {
  type VertexArrayRepr = MockVertexArray;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut st = self.state.borrow_mut();
    let handle = st.new_handle();
    st.live_vertex_arrays.insert(handle);
    st.calls.push(Call::CreateVertexArray(handle));

    Ok(MockVertexArray {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr) {
    if vertex_array.handle != 0 {
      let mut st = vertex_array.state.borrow_mut();
      st.live_vertex_arrays.remove(&vertex_array.handle);
      st.calls.push(Call::DestroyVertexArray(vertex_array.handle));

      if st.bindings.vertex_array == vertex_array.handle {
        st.bindings.vertex_array = 0;
      }

      vertex_array.handle = 0;
    }
  }

  unsafe fn max_vertex_attribs(&mut self) -> usize {
    self.state.borrow().max_vertex_attribs
  }

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    let mut st = vertex_array.state.borrow_mut();
    st.bindings.vertex_array = vertex_array.handle;
    st.calls.push(Call::BindVertexArray(vertex_array.handle));
  }

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    let mut st = vertex_array.state.borrow_mut();
    st.bindings.vertex_array = 0;
    st.calls.push(Call::BindVertexArray(0));
  }

  unsafe fn enable_attrib(
    vertex_array: &mut Self::VertexArrayRepr,
    slot: u32,
    attrib: &AttribDesc,
    stride: usize,
    offset: usize,
  ) {
    let mut st = vertex_array.state.borrow_mut();
    assert_eq!(st.bindings.vertex_array, vertex_array.handle, "vertex array not bound");
    assert_ne!(st.bindings.vertex_buffer, 0, "no vertex buffer bound");

    st.calls.push(Call::EnableAttrib {
      slot,
      ty: attrib.ty,
      count: attrib.count,
      normalized: attrib.normalized,
      stride,
      offset,
    });
  }
}

unsafe impl Renderer for Mock {
  unsafe fn clear(&mut self, color: [f32; 4], depth: bool) {
    self.state.borrow_mut().calls.push(Call::Clear { color, depth });
  }

  unsafe fn draw_indexed(&mut self, mode: PrimitiveMode, count: usize, index_type: IndexType) {
    let mut st = self.state.borrow_mut();
    assert_ne!(st.bindings.program, 0, "drawing without program");
    assert_ne!(st.bindings.vertex_array, 0, "drawing without vertex array");
    assert_ne!(st.bindings.index_buffer, 0, "drawing without index buffer");

    st.calls.push(Call::DrawIndexed {
      mode,
      count,
      index_type,
    });
  }

  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.state.borrow_mut().calls.push(Call::Viewport(viewport));
  }

  unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) {
    self.state.borrow_mut().calls.push(Call::PolygonMode(mode));
  }
}

/// A minimal, valid combined shader source.
pub const BASIC_SHADER: &str = "#shader vertex\n\
                                #version 330 core\n\
                                layout(location = 0) in vec4 position;\n\
                                void main() { gl_Position = position; }\n\
                                #shader fragment\n\
                                #version 330 core\n\
                                layout(location = 0) out vec4 color;\n\
                                uniform vec4 u_Color;\n\
                                void main() { color = u_Color; }\n";
