//! Resolution results.

use arrayvec::ArrayVec;
use serde::Serialize;

/// How many variables a single match holds unless a tree says otherwise.
pub const DEFAULT_MAX_VARIABLES: usize = 3;

/// One extracted path variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Param<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Outcome of resolving a path.
///
/// A miss is `value() == None`, never an error. Names borrow from the tree
/// and values from the resolved path, so copy them out with
/// [`Matched::to_owned_params`] before the path buffer is reused.
#[derive(Debug)]
pub struct Matched<'a, V, const N: usize = DEFAULT_MAX_VARIABLES> {
    value: Option<&'a V>,
    params: ArrayVec<Param<'a>, N>,
}

impl<'a, V, const N: usize> Default for Matched<'a, V, N> {
    fn default() -> Self {
        Self {
            value: None,
            params: ArrayVec::new(),
        }
    }
}

impl<'a, V, const N: usize> Matched<'a, V, N> {
    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        // Capacity is enforced when patterns are inserted.
        let _ = self.params.try_push(Param { name, value });
    }

    pub(crate) fn found(mut self, value: &'a V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_match(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&'a V> {
        self.value
    }

    /// Value of the first variable called `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.params.iter().find(|p| p.name == name).map(|p| p.value)
    }

    pub fn params(&self) -> &[Param<'a>] {
        &self.params
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param<'a>> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_owned_params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|p| (p.name.to_owned(), p.value.to_owned()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let mut matched: Matched<'_, u8> = Matched::default();
        matched.push("id", "42");
        matched.push("who", "me");
        let matched = matched.found(&1);

        assert!(matched.is_match());
        assert_eq!(matched.get("who"), Some("me"));
        assert_eq!(matched.get("nope"), None);
        assert_eq!(matched.len(), 2);
        assert_eq!(
            matched.to_owned_params(),
            vec![("id".to_string(), "42".to_string()), ("who".to_string(), "me".to_string())]
        );
    }

    #[test]
    fn test_extra_params_are_dropped() {
        let mut matched: Matched<'_, u8, 1> = Matched::default();
        matched.push("a", "1");
        matched.push("b", "2");
        assert_eq!(matched.params(), &[Param { name: "a", value: "1" }]);
        assert!(!matched.is_match());
    }
}
