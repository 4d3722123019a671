//! # A thin, RAII-flavoured layer over a real-time graphics API
//!
//! learngl wraps the handful of objects every “first textured quad” program ends up writing by
//! hand: shaders, vertex buffers, index buffers, vertex arrays and a tiny renderer issuing clear and
//! indexed draw commands. Every object owns exactly one device handle and releases it when dropped.
//!
//! # Architecture
//!
//! The crate is split in two layers:
//!
//! - The [backend] interface, a set of `unsafe` traits a backend type implements to talk to the
//!   device. The OpenGL 4.4 implementation lives in the `learngl-gl` crate.
//! - The frontend types, parametric in a backend type `B`: [`Shader`], [`VertexBuffer`],
//!   [`IndexBuffer`], [`VertexArray`], [`BufferLayout`] and [`Renderer`].
//!
//! Objects are created through a [`GraphicsContext`], which is the only way to get a mutable
//! access to the backend. Once created, objects can be bound and used without the context: the
//! backend representations carry whatever they need to act on the device.
//!
//! # On binding state
//!
//! Binding (of a program, a vertex array, a vertex buffer or an index buffer) is global: binding
//! something replaces whatever was bound before for that resource kind. Nothing in this crate
//! restores a previous binding. Bind right before use; [`Renderer::draw`] does it for you.
//!
//! [`GraphicsContext`]: crate::context::GraphicsContext
//! [`Shader`]: crate::shader::Shader
//! [`VertexBuffer`]: crate::buffer::VertexBuffer
//! [`IndexBuffer`]: crate::buffer::IndexBuffer
//! [`VertexArray`]: crate::vertex_array::VertexArray
//! [`BufferLayout`]: crate::layout::BufferLayout
//! [`Renderer`]: crate::renderer::Renderer
//! [`Renderer::draw`]: crate::renderer::Renderer::draw

#![deny(missing_docs)]

pub mod backend;
pub mod buffer;
pub mod context;
pub mod debug;
pub mod layout;
pub mod renderer;
pub mod shader;
pub mod vertex_array;
