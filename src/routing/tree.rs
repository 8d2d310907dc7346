//! Compressed prefix tree mapping path patterns to values.
//!
//! # Responsibilities
//! - Insert patterns by splitting, wrapping or extending nodes
//! - Resolve a path in one pass while extracting variables
//!
//! # Design Decisions
//! - Insertion never removes nodes
//! - Literal and variable children never share a parent; a route that would
//!   mix them is rejected with [`InsertError::ConflictingRoute`]
//! - Registering the same pattern twice keeps the last value
//! - Resolution follows a single branch and never backtracks

use std::fmt;

use thiserror::Error;

use crate::routing::grammar::{self, PatternError, Segment, VariableParser};
use crate::routing::matched::{Matched, DEFAULT_MAX_VARIABLES};
use crate::routing::node::{common_prefix, Node, Piece};

/// Errors returned by [`Tree::insert`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The pattern would put a literal and a variable (or two different
    /// variables) at the same position.
    #[error("pattern `{pattern}` conflicts with an existing route")]
    ConflictingRoute { pattern: String },
}

/// A routing tree holding at most `N` variables per pattern.
#[derive(Clone)]
pub struct Tree<V, const N: usize = DEFAULT_MAX_VARIABLES> {
    root: Option<Node<V>>,
    parser: Option<VariableParser>,
    len: usize,
}

impl<V> Tree<V> {
    /// An empty tree understanding `:name` and `*name`.
    pub fn new() -> Self {
        Self::with_parser(Some(grammar::parse))
    }

    /// An empty tree treating every pattern as literal text.
    pub fn literal_only() -> Self {
        Self::with_parser(None)
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, const N: usize> Tree<V, N> {
    pub fn with_parser(parser: Option<VariableParser>) -> Self {
        Self {
            root: None,
            parser,
            len: 0,
        }
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    /// Number of distinct patterns stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_variables(&self) -> usize {
        N
    }

    pub fn supports_variables(&self) -> bool {
        self.parser.is_some()
    }

    /// Register `value` under `pattern`.
    ///
    /// The pattern is validated completely before the tree changes, so an
    /// error leaves the tree as it was.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<(), InsertError> {
        let segments = grammar::segments(pattern, self.parser)?;
        if segments.iter().filter(|s| s.is_variable()).count() > N {
            return Err(PatternError::TooManyVariables { limit: N }.into());
        }
        let Some((head, tail)) = segments.split_first() else {
            return Err(PatternError::EmptyPattern.into());
        };

        let replaced = match self.root.as_mut() {
            None => {
                self.root = Some(Node::chain(head.into(), tail, value));
                false
            }
            Some(root) => insert_into(root, pattern, &segments, value)?,
        };

        if replaced {
            tracing::debug!(pattern, "Route replaced");
        } else {
            self.len += 1;
        }
        Ok(())
    }

    /// Find the value registered for `path` and extract its variables.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Matched<'a, V, N> {
        let mut matched = Matched::default();
        let Some(mut node) = self.root.as_ref() else {
            return matched;
        };
        if path.is_empty() {
            return matched;
        }

        let bytes = path.as_bytes();
        let mut offset = 0;
        loop {
            match node.variable() {
                Some(var) => {
                    let Some(rest) = path.get(offset..) else {
                        return Matched::default();
                    };
                    let (captured, _) = var.capture(rest);
                    if captured.is_empty() {
                        return Matched::default();
                    }
                    matched.push(&var.name, captured);
                    offset += captured.len();
                }
                None => {
                    if !bytes[offset..].starts_with(node.key()) {
                        return Matched::default();
                    }
                    offset += node.key().len();
                }
            }

            let Some(&next) = bytes.get(offset) else {
                return match node.value() {
                    Some(value) => matched.found(value),
                    None => Matched::default(),
                };
            };

            // Literal edges first, then the variable child.
            node = match node.edge(next).or_else(|| node.variable_child()) {
                Some(child) => child,
                None => return Matched::default(),
            };
        }
    }
}

/// Walk down from `root` placing `segments`. Returns whether an existing
/// value was replaced.
fn insert_into<V>(
    root: &mut Node<V>,
    pattern: &str,
    segments: &[Segment<'_>],
    value: V,
) -> Result<bool, InsertError> {
    let conflict = || InsertError::ConflictingRoute {
        pattern: pattern.to_owned(),
    };

    let Some(first) = segments.first() else {
        return Err(PatternError::EmptyPattern.into());
    };
    let mut node = root;
    let mut index = 0;
    let mut piece = Piece::from(first);

    loop {
        // Match `piece` against the current node. `None` means the current
        // segment is used up.
        let pending = match piece {
            Piece::Variable(var) => match node.variable() {
                Some(existing) if existing.name == var.name && existing.kind == var.kind => None,
                Some(_) => return Err(conflict()),
                // Only the root is compared against a variable without going
                // through its parent, and only an empty root may pass it on.
                None if node.key().is_empty() => Some(piece),
                None => return Err(conflict()),
            },
            Piece::Literal(bytes) => {
                if node.is_variable() {
                    return Err(conflict());
                }
                let common = common_prefix(node.key(), bytes);
                if common == 0 && !node.key().is_empty() {
                    node.wrap(Node::chain(piece, &segments[index + 1..], value));
                    return Ok(false);
                }
                if common < node.key().len() {
                    // The split leaves a literal child behind; a variable may
                    // not follow at the split point.
                    if common == bytes.len() && index + 1 < segments.len() {
                        return Err(conflict());
                    }
                    node.split(common);
                }
                (common < bytes.len()).then(|| Piece::Literal(&bytes[common..]))
            }
        };

        piece = match pending {
            Some(rest) => rest,
            None => {
                index += 1;
                match segments.get(index) {
                    Some(next) => Piece::from(next),
                    None => return Ok(node.replace_value(value).is_some()),
                }
            }
        };

        let child = match piece {
            Piece::Literal(bytes) => {
                if node.variable_child_index().is_some() {
                    return Err(conflict());
                }
                bytes.first().and_then(|&b| node.edge_index(b))
            }
            Piece::Variable(_) => {
                if node.has_literal_children() {
                    return Err(conflict());
                }
                node.variable_child_index()
            }
        };

        match child {
            Some(i) => node = node.child_mut(i),
            None => {
                node.push_child(Node::chain(piece, &segments[index + 1..], value));
                return Ok(false);
            }
        }
    }
}

impl<V: fmt::Debug, const N: usize> fmt::Display for Tree<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.write_outline(f, 0),
            None => writeln!(f, "(empty)"),
        }
    }
}

impl<V: fmt::Debug, const N: usize> fmt::Debug for Tree<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("variables", &self.parser.is_some())
            .field("root", &self.root)
            .finish()
    }
}
