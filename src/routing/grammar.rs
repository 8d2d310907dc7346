//! Path variable grammar.
//!
//! # Syntax
//! - Literal bytes match themselves
//! - `:name` captures a single segment (everything up to the next `/`)
//! - `*name` captures the remainder of the path, `/` included, and must be
//!   the last token of a pattern
//!
//! # Design Decisions
//! - Parsing is a pure function over a pattern fragment
//! - A pattern is fully tokenized before the tree is touched, so a rejected
//!   pattern never leaves a half-inserted route behind

use thiserror::Error;

/// Errors raised while registering a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `:` or `*` marker is not followed by a name.
    #[error("variable marker has no name")]
    EmptyVariable,

    /// A `*name` wildcard is followed by more path segments.
    #[error("wildcard must be the last segment of a pattern")]
    WildcardContainsSlash,

    /// A second marker appears before the current variable name ended.
    #[error("unexpected variable marker inside a variable name")]
    RedundantVariableChar,

    /// The pattern is the empty string.
    #[error("pattern is empty")]
    EmptyPattern,

    /// The pattern declares more variables than a match can hold.
    #[error("pattern declares more than {limit} variables")]
    TooManyVariables { limit: usize },
}

/// How much of the path a variable consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `:name`, one segment.
    Param,
    /// `*name`, the rest of the path.
    Wildcard,
}

/// A variable marker located inside a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Byte offset of the marker.
    pub start: usize,
    /// Byte offset one past the end of the name.
    pub end: usize,
    pub name: Box<str>,
    pub kind: VariableKind,
}

impl Variable {
    pub fn is_wildcard(&self) -> bool {
        self.kind == VariableKind::Wildcard
    }

    /// Consume the leading part of `path` this variable stands for.
    ///
    /// Returns `(captured, tail)`.
    pub fn capture<'p>(&self, path: &'p str) -> (&'p str, &'p str) {
        match self.kind {
            VariableKind::Param => {
                let end = path.find('/').unwrap_or(path.len());
                path.split_at(end)
            }
            VariableKind::Wildcard => (path, ""),
        }
    }

    /// The marker character that introduces this variable.
    pub fn marker(&self) -> char {
        match self.kind {
            VariableKind::Param => ':',
            VariableKind::Wildcard => '*',
        }
    }
}

/// Signature of a variable grammar.
///
/// Trees hold an optional parser; without one every pattern is literal.
pub type VariableParser = fn(&str) -> Result<Option<Variable>, PatternError>;

fn is_marker(byte: u8) -> bool {
    byte == b':' || byte == b'*'
}

/// Find and validate the first variable marker in `fragment`.
///
/// `Ok(None)` means the fragment is plain literal text.
pub fn parse(fragment: &str) -> Result<Option<Variable>, PatternError> {
    let bytes = fragment.as_bytes();
    let Some(start) = bytes.iter().position(|&b| is_marker(b)) else {
        return Ok(None);
    };

    let kind = if bytes[start] == b'*' {
        VariableKind::Wildcard
    } else {
        VariableKind::Param
    };

    let name_start = start + 1;
    let mut end = bytes.len();
    for (i, &b) in bytes.iter().enumerate().skip(name_start) {
        if b == b'/' {
            end = i;
            break;
        }
        if is_marker(b) {
            return Err(PatternError::RedundantVariableChar);
        }
    }

    if end == name_start {
        return Err(PatternError::EmptyVariable);
    }
    if kind == VariableKind::Wildcard && end < bytes.len() {
        return Err(PatternError::WildcardContainsSlash);
    }

    Ok(Some(Variable {
        start,
        end,
        name: fragment[name_start..end].into(),
        kind,
    }))
}

/// One token of a decomposed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'p> {
    Literal(&'p [u8]),
    Variable(Variable),
}

impl Segment<'_> {
    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable(_))
    }
}

/// Split `pattern` into alternating literal and variable segments.
///
/// Variable spans are absolute offsets into `pattern`. Empty literals are
/// never produced.
pub fn segments(pattern: &str, parser: Option<VariableParser>) -> Result<Vec<Segment<'_>>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    let Some(parse) = parser else {
        return Ok(vec![Segment::Literal(pattern.as_bytes())]);
    };

    let mut out = Vec::new();
    let mut rest = pattern;
    let mut offset = 0;

    while !rest.is_empty() {
        let Some(mut var) = parse(rest)? else {
            out.push(Segment::Literal(rest.as_bytes()));
            break;
        };

        if var.start > 0 {
            out.push(Segment::Literal(&rest.as_bytes()[..var.start]));
        }
        let consumed = var.end;
        var.start += offset;
        var.end += offset;
        out.push(Segment::Variable(var));

        rest = &rest[consumed..];
        offset += consumed;
    }

    Ok(out)
}
