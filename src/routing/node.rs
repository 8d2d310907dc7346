//! Radix tree vertices.
//!
//! A node owns a key fragment, an optional value and its children. Literal
//! children are dispatched on their first byte; a variable child is the only
//! child of its parent and is never picked by byte dispatch.

use std::fmt;
use std::mem;

use crate::routing::grammar::{Segment, Variable};

/// A vertex of the routing tree.
#[derive(Debug, Clone)]
pub struct Node<V> {
    key: Box<[u8]>,
    value: Option<V>,
    children: Vec<Node<V>>,
    variable: Option<Variable>,
}

/// Borrowed view of the next pattern token to place.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Piece<'s> {
    Literal(&'s [u8]),
    Variable(&'s Variable),
}

impl<'s> From<&'s Segment<'s>> for Piece<'s> {
    fn from(segment: &'s Segment<'s>) -> Self {
        match segment {
            Segment::Literal(bytes) => Piece::Literal(*bytes),
            Segment::Variable(var) => Piece::Variable(var),
        }
    }
}

impl<V> Node<V> {
    pub(crate) fn literal(key: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: Vec::new(),
            variable: None,
        }
    }

    pub(crate) fn variable_node(var: Variable) -> Self {
        Self {
            key: var.name.as_bytes().into(),
            value: None,
            children: Vec::new(),
            variable: Some(var),
        }
    }

    fn from_piece(piece: Piece<'_>) -> Self {
        match piece {
            Piece::Literal(bytes) => Self::literal(bytes),
            Piece::Variable(var) => Self::variable_node(var.clone()),
        }
    }

    /// Build the node chain for `head` followed by `tail`, with `value` on
    /// the last node.
    pub(crate) fn chain(head: Piece<'_>, tail: &[Segment<'_>], value: V) -> Self {
        let mut node = Self::from_piece(head);
        match tail.split_first() {
            Some((next, rest)) => node.children.push(Self::chain(next.into(), rest, value)),
            None => node.value = Some(value),
        }
        node
    }

    /// Key fragment. For a variable node this is the variable name.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    pub fn variable(&self) -> Option<&Variable> {
        self.variable.as_ref()
    }

    pub fn is_variable(&self) -> bool {
        self.variable.is_some()
    }

    /// Literal child whose key starts with `byte`.
    pub fn edge(&self, byte: u8) -> Option<&Node<V>> {
        self.edge_index(byte).map(|i| &self.children[i])
    }

    /// The variable child, if this position captures a variable.
    pub fn variable_child(&self) -> Option<&Node<V>> {
        self.variable_child_index().map(|i| &self.children[i])
    }

    pub(crate) fn edge_index(&self, byte: u8) -> Option<usize> {
        self.children
            .iter()
            .position(|c| !c.is_variable() && c.key.first() == Some(&byte))
    }

    pub(crate) fn variable_child_index(&self) -> Option<usize> {
        self.children.iter().position(Node::is_variable)
    }

    pub(crate) fn has_literal_children(&self) -> bool {
        self.children.iter().any(|c| !c.is_variable())
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut Node<V> {
        &mut self.children[index]
    }

    pub(crate) fn push_child(&mut self, child: Node<V>) {
        self.children.push(child);
    }

    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    /// Keep `key[..at]` here and move the suffix, the value and the children
    /// into a single new child.
    pub(crate) fn split(&mut self, at: usize) {
        let suffix = Node {
            key: self.key[at..].into(),
            value: self.value.take(),
            children: mem::take(&mut self.children),
            variable: None,
        };
        self.key = self.key[..at].into();
        self.children.push(suffix);
    }

    /// Turn this node into an empty-key node holding the old node and
    /// `sibling` as its two children.
    pub(crate) fn wrap(&mut self, sibling: Node<V>) {
        let old = mem::replace(self, Node::literal(b""));
        self.children.push(old);
        self.children.push(sibling);
    }

    /// Number of values stored in this subtree.
    pub fn route_count(&self) -> usize {
        usize::from(self.value.is_some())
            + self.children.iter().map(Node::route_count).sum::<usize>()
    }

    fn label(&self) -> String {
        match &self.variable {
            Some(var) => format!("{}{}", var.marker(), var.name),
            None => format!("{:?}", String::from_utf8_lossy(&self.key)),
        }
    }

    pub(crate) fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result
    where
        V: fmt::Debug,
    {
        write!(f, "{:indent$}{}", "", self.label(), indent = depth * 2)?;
        if let Some(value) = &self.value {
            write!(f, " => {:?}", value)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Length of the shared leading byte sequence.
pub(crate) fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
