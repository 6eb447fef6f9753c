use crate::assertion::ExactEq;
use crate::error::PlotCheckError;
use itertools::Itertools;
use std::fmt::Debug;
use tracing::{debug, trace};

/// Maps each actual element to the expected element it corresponds to:
/// actual element `i` pairs with expected element `indices()[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Reorders expected values into actual draw order. Returns `None` when
    /// `expected` does not have one value per element.
    pub fn apply<T: Clone>(&self, expected: &[T]) -> Option<Vec<T>> {
        if expected.len() != self.indices.len() {
            return None;
        }
        self.indices
            .iter()
            .map(|j| expected.get(*j).cloned())
            .collect()
    }
}

/// Finds the first permutation, in lexicographic order, under which the
/// expected values line up exactly with the actual ones
pub fn find_permutation<T: ExactEq + Debug>(
    attribute: &str,
    expected: &[T],
    actual: &[T],
) -> Result<Permutation, PlotCheckError> {
    let not_found = || PlotCheckError::PermutationNotFound {
        attribute: attribute.to_string(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    };
    if expected.len() != actual.len() {
        return Err(not_found());
    }

    let n = actual.len();
    let mut tried = 0usize;
    let found = (0..n).permutations(n).find(|candidate| {
        tried += 1;
        candidate
            .iter()
            .enumerate()
            .all(|(i, j)| expected[*j].exact_eq(&actual[i]))
    });
    trace!(attribute, tried, "permutation candidates checked");

    match found {
        Some(indices) => {
            debug!(attribute, ?indices, "found permutation");
            Ok(Permutation { indices })
        }
        None => Err(not_found()),
    }
}
