//! Uniform locations and their cache.

use std::collections::HashMap;
use std::fmt;

/// Location of a uniform in a linked program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UniformLocation {
  /// The uniform is active and lives at this location.
  Found(i32),
  /// The program has no active uniform with this name. Writing to it is a no-op.
  NotFound,
}

impl UniformLocation {
  /// Build a location out of a raw backend location, where negative values mean “not found”.
  pub fn from_raw(location: i32) -> Self {
    if location < 0 {
      UniformLocation::NotFound
    } else {
      UniformLocation::Found(location)
    }
  }

  /// Raw location, if found.
  pub fn index(self) -> Option<i32> {
    match self {
      UniformLocation::Found(location) => Some(location),
      UniformLocation::NotFound => None,
    }
  }

  /// Whether the uniform was found.
  pub fn is_found(self) -> bool {
    matches!(self, UniformLocation::Found(_))
  }
}

/// Advisory warnings related to uniforms. They never abort anything.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// The program has no active uniform with that name (unused in shaders or misspelled).
  NotFound(String),
}

impl UniformWarning {
  /// Create a not-found warning.
  pub fn not_found<N>(name: N) -> Self
  where
    N: Into<String>,
  {
    UniformWarning::NotFound(name.into())
  }
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::NotFound(ref name) => write!(f, "uniform {} does not exist", name),
    }
  }
}

/// Memoized name → location lookups for a single program.
///
/// The cache only grows; it lives and dies with the program owning it. Misses are cached too.
#[derive(Clone, Debug, Default)]
pub struct UniformLocationCache {
  locations: HashMap<String, UniformLocation>,
}

impl UniformLocationCache {
  /// Create an empty cache.
  pub fn new() -> Self {
    Self::default()
  }

  /// Cached location of `name`.
  ///
  /// `None` means the name was never resolved; `Some(UniformLocation::NotFound)` is a cached miss.
  pub fn get(&self, name: &str) -> Option<UniformLocation> {
    self.locations.get(name).copied()
  }

  /// Location of `name`, running `query` only if the name was never resolved before.
  pub fn resolve<F>(&mut self, name: &str, query: F) -> UniformLocation
  where
    F: FnOnce(&str) -> UniformLocation,
  {
    if let Some(location) = self.get(name) {
      return location;
    }

    let location = query(name);

    if location == UniformLocation::NotFound {
      log::warn!("{}", UniformWarning::not_found(name));
    }

    self.locations.insert(name.to_owned(), location);
    location
  }

  /// Number of resolved names.
  pub fn len(&self) -> usize {
    self.locations.len()
  }

  /// Whether nothing was resolved yet.
  pub fn is_empty(&self) -> bool {
    self.locations.is_empty()
  }
}
