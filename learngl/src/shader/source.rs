//! Combined shader source files.
//!
//! A combined shader source file holds several shader stages in a single text file. Each stage is
//! introduced by a directive line containing `#shader` followed by a stage keyword; every line
//! until the next directive (or the end of the file) belongs to that stage:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! layout(location = 0) in vec4 position;
//! void main() { gl_Position = position; }
//!
//! #shader fragment
//! #version 330 core
//! layout(location = 0) out vec4 color;
//! uniform vec4 u_Color;
//! void main() { color = u_Color; }
//! ```
//!
//! Recognized keywords are `vertex`, `fragment`, `geometry`, `tess_control` and
//! `tess_evaluation`. Directives are case-sensitive and never end up in the stage sources. Lines
//! are kept verbatim, line terminators included.
//!
//! The marker is matched anywhere on a line, as long as whitespace or the end of the line follows
//! it: `#shadervertex` is not a directive, but a comment such as `// see #shader above` is one
//! (and fails on its unknown keyword).
//!
//! A file is rejected if it has content before its first directive, or if a directive names an
//! unknown stage.

use std::collections::BTreeMap;
use std::error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::shader::{ShaderError, StageType};

/// Marker introducing a stage directive.
pub const DIRECTIVE: &str = "#shader";

/// Errors that can occur while parsing a combined shader source.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceError {
  /// A line appears before any stage directive; it has nowhere to go.
  MissingDirective {
    /// 1-based line number.
    line: usize,
  },
  /// A directive names a stage that is not recognized (or no stage at all).
  UnknownStage {
    /// 1-based line number.
    line: usize,
    /// The keyword found after the directive marker (empty if none).
    keyword: String,
  },
  /// A stage required to build a program is absent.
  MissingStage(StageType),
}

impl fmt::Display for SourceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      SourceError::MissingDirective { line } => {
        write!(f, "line {}: content before any {} directive", line, DIRECTIVE)
      }

      SourceError::UnknownStage { line, ref keyword } if keyword.is_empty() => {
        write!(f, "line {}: {} directive without stage", line, DIRECTIVE)
      }

      SourceError::UnknownStage { line, ref keyword } => {
        write!(f, "line {}: unknown shader stage “{}”", line, keyword)
      }

      SourceError::MissingStage(ty) => write!(f, "missing {}", ty),
    }
  }
}

impl error::Error for SourceError {}

/// Per-stage sources extracted from a combined shader source.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ShaderSource {
  stages: BTreeMap<StageType, String>,
}

impl ShaderSource {
  /// Split a combined shader source text into per-stage sources.
  pub fn parse(text: &str) -> Result<Self, SourceError> {
    let mut stages: BTreeMap<StageType, String> = BTreeMap::new();
    let mut current = None;

    for (i, line) in text.split_inclusive('\n').enumerate() {
      let line_nb = i + 1;

      if let Some(rest) = find_directive(line) {
        let keyword = rest
          .split_whitespace()
          .next()
          .unwrap_or("");
        let ty = StageType::from_keyword(keyword).ok_or_else(|| SourceError::UnknownStage {
          line: line_nb,
          keyword: keyword.to_owned(),
        })?;

        // a directive followed by nothing still declares the stage
        stages.entry(ty).or_default();
        current = Some(ty);
      } else {
        let ty = current.ok_or(SourceError::MissingDirective { line: line_nb })?;
        stages.entry(ty).or_default().push_str(line);
      }
    }

    Ok(ShaderSource { stages })
  }

  /// Read and parse a combined shader source file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ShaderError::Io(path.to_owned(), e))?;

    log::debug!("parsing shader source {}", path.display());
    Ok(Self::parse(&text)?)
  }

  /// Source of a given stage, if present.
  pub fn get(&self, ty: StageType) -> Option<&str> {
    self.stages.get(&ty).map(String::as_str)
  }

  /// Source of the vertex stage, if present.
  pub fn vertex(&self) -> Option<&str> {
    self.get(StageType::VertexShader)
  }

  /// Source of the fragment stage, if present.
  pub fn fragment(&self) -> Option<&str> {
    self.get(StageType::FragmentShader)
  }

  /// Iterate over the stages, in pipeline order.
  pub fn stages(&self) -> impl Iterator<Item = (StageType, &str)> {
    self.stages.iter().map(|(ty, src)| (*ty, src.as_str()))
  }

  /// Number of stages.
  pub fn len(&self) -> usize {
    self.stages.len()
  }

  /// Whether no stage was found.
  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }
}

// Text following the first directive marker of a line. The marker may sit anywhere on the line
// but must be followed by whitespace or end the line.
fn find_directive(line: &str) -> Option<&str> {
  line.match_indices(DIRECTIVE).find_map(|(index, _)| {
    let rest = &line[index + DIRECTIVE.len()..];

    match rest.chars().next() {
      None => Some(rest),
      Some(c) if c.is_whitespace() => Some(rest),
      _ => None,
    }
  })
}

impl FromStr for ShaderSource {
  type Err = SourceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn vertex_and_fragment() {
    let source = ShaderSource::parse("#shader vertex\nVERT\n#shader fragment\nFRAG\n").unwrap();

    assert_eq!(source.len(), 2);
    assert_eq!(source.vertex(), Some("VERT\n"));
    assert_eq!(source.fragment(), Some("FRAG\n"));
  }

  #[test]
  fn lines_are_kept_in_order_without_directives() {
    let text = "#shader vertex\n\
                #version 330 core\n\
                layout(location = 0) in vec4 position;\n\
                \n\
                void main() { gl_Position = position; }\n\
                #shader fragment\n\
                #version 330 core\n\
                out vec4 color;\n\
                void main() { color = vec4(1.); }\n";
    let source = ShaderSource::parse(text).unwrap();

    assert_eq!(
      source.vertex(),
      Some(
        "#version 330 core\nlayout(location = 0) in vec4 position;\n\nvoid main() { gl_Position = position; }\n"
      )
    );
    assert_eq!(
      source.fragment(),
      Some("#version 330 core\nout vec4 color;\nvoid main() { color = vec4(1.); }\n")
    );

    for (_, src) in source.stages() {
      assert!(!src.contains(DIRECTIVE));
    }
  }

  #[test]
  fn content_before_first_directive() {
    assert_eq!(
      ShaderSource::parse("void main() {}\n#shader vertex\n"),
      Err(SourceError::MissingDirective { line: 1 })
    );
    assert_eq!(
      ShaderSource::parse("\n#shader vertex\nVERT\n"),
      Err(SourceError::MissingDirective { line: 1 })
    );
  }

  #[test]
  fn unknown_stage_keyword() {
    assert_eq!(
      ShaderSource::parse("#shader vertex\nVERT\n#shader compute\nCOMP\n"),
      Err(SourceError::UnknownStage {
        line: 3,
        keyword: "compute".to_owned()
      })
    );
  }

  #[test]
  fn directives_are_case_sensitive() {
    assert_eq!(
      ShaderSource::parse("#shader VERTEX\n"),
      Err(SourceError::UnknownStage {
        line: 1,
        keyword: "VERTEX".to_owned()
      })
    );

    // not a directive at all; the line has nowhere to go
    assert_eq!(
      ShaderSource::parse("#SHADER vertex\n"),
      Err(SourceError::MissingDirective { line: 1 })
    );
  }

  #[test]
  fn marker_must_be_followed_by_whitespace() {
    assert_eq!(
      ShaderSource::parse("#shadervertex\nV\n#shader fragment\nF\n"),
      Err(SourceError::MissingDirective { line: 1 })
    );

    let source =
      ShaderSource::parse("#shader vertex\n// #shaders live here\n#shader\tfragment\nF").unwrap();
    assert_eq!(source.vertex(), Some("// #shaders live here\n"));
    assert_eq!(source.fragment(), Some("F"));
  }

  #[test]
  fn marker_is_matched_anywhere_on_the_line() {
    assert_eq!(
      ShaderSource::parse("#shader vertex\n// the #shader line above\nV\n"),
      Err(SourceError::UnknownStage {
        line: 2,
        keyword: "line".to_owned()
      })
    );

    let source = ShaderSource::parse("  #shader vertex // stage one\nV\n").unwrap();
    assert_eq!(source.vertex(), Some("V\n"));
  }

  #[test]
  fn directive_without_keyword() {
    let e = ShaderSource::parse("#shader\nVERT\n").unwrap_err();

    assert_eq!(
      e,
      SourceError::UnknownStage {
        line: 1,
        keyword: String::new()
      }
    );
    assert_eq!(e.to_string(), "line 1: #shader directive without stage");
  }

  #[test]
  fn repeated_directive_resumes_stage() {
    let source =
      ShaderSource::parse("#shader vertex\nA\n#shader fragment\nF\n#shader vertex\nB\n").unwrap();

    assert_eq!(source.vertex(), Some("A\nB\n"));
    assert_eq!(source.fragment(), Some("F\n"));
  }

  #[test]
  fn last_line_without_terminator() {
    let source = ShaderSource::parse("#shader vertex\r\nVERT\r\n#shader fragment\nFRAG").unwrap();

    assert_eq!(source.vertex(), Some("VERT\r\n"));
    assert_eq!(source.fragment(), Some("FRAG"));
  }

  #[test]
  fn empty_sections_and_optional_stages() {
    let source: ShaderSource = "#shader vertex\n#shader geometry\nGEOM\n#shader fragment\n"
      .parse()
      .unwrap();

    let stages: Vec<_> = source.stages().collect();
    assert_eq!(
      stages,
      vec![
        (StageType::VertexShader, ""),
        (StageType::GeometryShader, "GEOM\n"),
        (StageType::FragmentShader, ""),
      ]
    );
  }

  #[test]
  fn empty_text() {
    let source = ShaderSource::parse("").unwrap();
    assert!(source.is_empty());
  }
}
