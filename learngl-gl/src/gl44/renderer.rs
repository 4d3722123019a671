use crate::gl44::GL44;
use gl::types::*;
use learngl::backend::renderer::Renderer;
use learngl::buffer::IndexType;
use learngl::renderer::{PolygonMode, PrimitiveMode};
use std::ptr;

unsafe impl Renderer for GL44 {
  unsafe fn clear(&mut self, color: [f32; 4], depth: bool) {
    let depth_bit = if depth { gl::DEPTH_BUFFER_BIT } else { 0 };

    gl_call!(gl::ClearColor(color[0], color[1], color[2], color[3]));
    gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT | depth_bit));
  }

  unsafe fn draw_indexed(&mut self, mode: PrimitiveMode, count: usize, index_type: IndexType) {
    gl_call!(gl::DrawElements(
      opengl_mode(mode),
      index_count(count),
      index_type_to_glenum(index_type),
      ptr::null(),
    ));
  }

  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    gl_call!(gl::Viewport(
      viewport[0],
      viewport[1],
      viewport[2],
      viewport[3]
    ));
  }

  unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) {
    gl_call!(gl::PolygonMode(
      gl::FRONT_AND_BACK,
      opengl_polygon_mode(mode)
    ));
  }
}

// DrawElements takes a signed count; larger counts saturate.
fn index_count(count: usize) -> GLsizei {
  GLsizei::try_from(count).unwrap_or(GLsizei::MAX)
}

fn opengl_mode(mode: PrimitiveMode) -> GLenum {
  match mode {
    PrimitiveMode::Point => gl::POINTS,
    PrimitiveMode::Line => gl::LINES,
    PrimitiveMode::LineStrip => gl::LINE_STRIP,
    PrimitiveMode::Triangle => gl::TRIANGLES,
    PrimitiveMode::TriangleFan => gl::TRIANGLE_FAN,
    PrimitiveMode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}

fn opengl_polygon_mode(mode: PolygonMode) -> GLenum {
  match mode {
    PolygonMode::Point => gl::POINT,
    PolygonMode::Line => gl::LINE,
    PolygonMode::Fill => gl::FILL,
  }
}

fn index_type_to_glenum(ty: IndexType) -> GLenum {
  match ty {
    IndexType::UnsignedByte => gl::UNSIGNED_BYTE,
    IndexType::UnsignedShort => gl::UNSIGNED_SHORT,
    IndexType::UnsignedInt => gl::UNSIGNED_INT,
  }
}
