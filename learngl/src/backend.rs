//! Backend interfaces.
//!
//! This module exposes the `unsafe` traits a backend type must implement to be usable with the
//! frontend types of this crate. Each trait owns an associated _representation_ type for the
//! objects it creates; the frontend stores that representation and hands it back to the backend
//! whenever the object is bound, written to or destroyed.
//!
//! Representations are expected to carry whatever they need to reach the device (typically a
//! shared handle to the backend state), which is why most operations are associated functions
//! rather than methods: once created, an object doesn’t need the [`GraphicsContext`] anymore.
//!
//! [`GraphicsContext`]: crate::context::GraphicsContext

pub mod buffer;
pub mod renderer;
pub mod shader;
pub mod vertex_array;
