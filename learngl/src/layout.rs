//! Vertex buffer layouts.
//!
//! A [`BufferLayout`] describes how the records of a vertex buffer are split into attributes. Every
//! call to [`BufferLayout::push`] appends one attribute; the order of the calls defines the order
//! of the attribute slots, and the layout keeps track of the stride (the size in bytes of a whole
//! record).
//!
//! ```
//! use learngl::layout::BufferLayout;
//!
//! let mut layout = BufferLayout::new();
//! layout.push::<f32>(3).push::<f32>(2);
//!
//! assert_eq!(layout.stride(), 5 * 4);
//! assert_eq!(layout.offsets(), vec![0, 3 * 4]);
//! ```
//!
//! Records are tightly packed: no padding is ever inserted between attributes.

use std::fmt;
use std::mem;

/// Possible types of vertex attribute components.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttribType {
  /// 32-bit floating-point number.
  Float,
  /// 32-bit signed integer.
  Int,
  /// 32-bit unsigned integer.
  UnsignedInt,
  /// 16-bit signed integer.
  Short,
  /// 16-bit unsigned integer.
  UnsignedShort,
  /// 8-bit signed integer.
  Byte,
  /// 8-bit unsigned integer.
  UnsignedByte,
}

impl AttribType {
  /// Size in bytes of a single component.
  pub fn size(self) -> usize {
    match self {
      AttribType::Float => mem::size_of::<f32>(),
      AttribType::Int => mem::size_of::<i32>(),
      AttribType::UnsignedInt => mem::size_of::<u32>(),
      AttribType::Short => mem::size_of::<i16>(),
      AttribType::UnsignedShort => mem::size_of::<u16>(),
      AttribType::Byte => mem::size_of::<i8>(),
      AttribType::UnsignedByte => mem::size_of::<u8>(),
    }
  }
}

impl fmt::Display for AttribType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      AttribType::Float => f.write_str("float"),
      AttribType::Int => f.write_str("int"),
      AttribType::UnsignedInt => f.write_str("unsigned int"),
      AttribType::Short => f.write_str("short"),
      AttribType::UnsignedShort => f.write_str("unsigned short"),
      AttribType::Byte => f.write_str("byte"),
      AttribType::UnsignedByte => f.write_str("unsigned byte"),
    }
  }
}

/// Rust types that can be used as vertex attribute components.
pub trait LayoutElement {
  /// Component type associated with this Rust type.
  const ATTRIB_TYPE: AttribType;
}

macro_rules! impl_layout_element {
  ($($t:ty => $ty:ident),* $(,)?) => {
    $(
      impl LayoutElement for $t {
        const ATTRIB_TYPE: AttribType = AttribType::$ty;
      }
    )*
  };
}

impl_layout_element!(
  f32 => Float,
  i32 => Int,
  u32 => UnsignedInt,
  i16 => Short,
  u16 => UnsignedShort,
  i8 => Byte,
  u8 => UnsignedByte,
);

/// Description of a single vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AttribDesc {
  /// Type of the components.
  pub ty: AttribType,
  /// Number of components; must be in 1–4 to be attachable to a vertex array.
  pub count: usize,
  /// Whether integral components get normalized to `[0; 1]` (unsigned) or `[-1; 1]` (signed) when
  /// read as floating-point values.
  pub normalized: bool,
}

impl AttribDesc {
  /// Size in bytes of the whole attribute.
  pub fn size(&self) -> usize {
    self.count * self.ty.size()
  }
}

/// Ordered list of attribute descriptions, along with their stride.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BufferLayout {
  attribs: Vec<AttribDesc>,
  stride: usize,
}

impl BufferLayout {
  /// Create an empty layout.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an attribute of `count` components of type `T`.
  pub fn push<T>(&mut self, count: usize) -> &mut Self
  where
    T: LayoutElement,
  {
    self.push_attrib(T::ATTRIB_TYPE, count, false)
  }

  /// Append an attribute of `count` normalized components of type `T`.
  pub fn push_normalized<T>(&mut self, count: usize) -> &mut Self
  where
    T: LayoutElement,
  {
    self.push_attrib(T::ATTRIB_TYPE, count, true)
  }

  /// Append an attribute described at runtime.
  pub fn push_attrib(&mut self, ty: AttribType, count: usize, normalized: bool) -> &mut Self {
    let desc = AttribDesc {
      ty,
      count,
      normalized,
    };

    self.stride += desc.size();
    self.attribs.push(desc);
    self
  }

  /// Attribute descriptions, in slot order.
  pub fn attribs(&self) -> &[AttribDesc] {
    &self.attribs
  }

  /// Size in bytes of a whole record.
  pub fn stride(&self) -> usize {
    self.stride
  }

  /// Byte offset of each attribute inside a record.
  pub fn offsets(&self) -> Vec<usize> {
    self.iter().map(|(_, offset)| offset).collect()
  }

  /// Iterate over the attributes along with their byte offsets.
  pub fn iter(&self) -> impl Iterator<Item = (&AttribDesc, usize)> {
    self.attribs.iter().scan(0, |offset, desc| {
      let current = *offset;
      *offset += desc.size();
      Some((desc, current))
    })
  }

  /// Number of attributes.
  pub fn len(&self) -> usize {
    self.attribs.len()
  }

  /// Whether the layout has no attribute.
  pub fn is_empty(&self) -> bool {
    self.attribs.is_empty()
  }
}
