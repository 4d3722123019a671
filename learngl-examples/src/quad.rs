//! Draw an indexed quad whose color changes over time.
//!
//! The quad is made of four vertices and six indices (two triangles). The shader file is read
//! from `resources/shaders/Basic.shader` by default; run from this crate’s directory or pass
//! `--shader`.
//!
//! Press <escape> or close the window to quit.

use cgmath::{ortho, Matrix4};
use glfw::{Action, Key, WindowEvent};
use learngl::buffer::{IndexBuffer, VertexBuffer};
use learngl::layout::BufferLayout;
use learngl::renderer::{PolygonMode, Renderer};
use learngl::shader::Shader;
use learngl::vertex_array::VertexArray;
use learngl_glfw::GlfwSurface;
use learngl_windowing::{WindowDim, WindowOpt};
use std::{error::Error, path::PathBuf, process, time::Instant};
use structopt::StructOpt;

// positions only
const VERTICES: [f32; 12] = [
  0.5, 0.5, 0.0, // top right
  0.5, -0.5, 0.0, // bottom right
  -0.5, -0.5, 0.0, // bottom left
  -0.5, 0.5, 0.0, // top left
];

const INDICES: [u32; 6] = [
  0, 1, 3, // first triangle
  1, 2, 3, // second triangle
];

#[derive(Debug, StructOpt)]
#[structopt(name = "quad", about = "Draw an indexed quad with learngl")]
pub struct CLIOpts {
  #[structopt(short, long, default_value = "resources/shaders/Basic.shader")]
  /// Combined shader source file.
  shader: PathBuf,

  #[structopt(long, default_value = "800")]
  /// Width of the window.
  width: u32,

  #[structopt(long, default_value = "600")]
  /// Height of the window.
  height: u32,

  #[structopt(short, long)]
  /// Draw polygons as wireframes.
  wireframe: bool,

  #[structopt(long)]
  /// Don’t synchronize frames with the display.
  no_vsync: bool,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if let Err(e) = run(cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}

fn run(cli_opts: CLIOpts) -> Result<(), Box<dyn Error>> {
  let dim = WindowDim::Windowed {
    width: cli_opts.width,
    height: cli_opts.height,
  };
  let win_opt = WindowOpt::default()
    .set_dim(dim)
    .set_vsync(!cli_opts.no_vsync);

  let surface = GlfwSurface::new_gl44("Learn OpenGL", win_opt)?;
  let mut context = surface.context;
  let events = surface.events_rx;

  let mut shader = Shader::from_file(&mut context, &cli_opts.shader)?;

  let vb = VertexBuffer::new(&mut context, &VERTICES)?;
  let ib = IndexBuffer::new(&mut context, &INDICES)?;
  let mut va = VertexArray::new(&mut context)?;

  let mut layout = BufferLayout::new();
  layout.push::<f32>(3);
  va.add_buffer(&vb, &layout)?;

  let renderer = Renderer::new().set_clear_color([0.2, 0.3, 0.3, 1.0]);

  if cli_opts.wireframe {
    renderer.set_polygon_mode(&mut context, PolygonMode::Line);
  }

  let [width, height] = context.framebuffer_size();
  renderer.set_viewport(&mut context, 0, 0, width, height);
  shader.set_uniform("u_MVP", projection(width, height));

  let start_t = Instant::now();

  'app: loop {
    // handle events
    context.window.glfw.poll_events();
    for (_, event) in glfw::flush_messages(&events) {
      match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => break 'app,

        WindowEvent::FramebufferSize(width, height) => {
          let (width, height) = (width.max(0) as u32, height.max(0) as u32);
          log::debug!("framebuffer resized to {}×{}", width, height);

          renderer.set_viewport(&mut context, 0, 0, width, height);
          shader.set_uniform("u_MVP", projection(width, height));
        }

        _ => (),
      }
    }

    let t = start_t.elapsed().as_secs_f32();
    shader.set_uniform("u_Color", [t.sin() * 0.5 + 0.5, 0.3, 0.8, 1.0]);

    renderer.clear(&mut context);
    renderer.draw(&mut context, &va, &ib, &shader);

    context.swap_buffers();
  }

  Ok(())
}

// Keep the quad square whatever the aspect ratio of the framebuffer.
fn projection(width: u32, height: u32) -> [[f32; 4]; 4] {
  let aspect = width as f32 / height.max(1) as f32;
  let proj: Matrix4<f32> = ortho(-aspect, aspect, -1., 1., -1., 1.);
  proj.into()
}
