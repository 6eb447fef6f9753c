use serde::{Deserialize, Serialize};

/// A per-element attribute that is either broadcast from a single value or
/// given explicitly for each element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarOrArray<T: Sync + Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Sync + Clone> ScalarOrArray<T> {
    pub fn new_scalar(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }

    pub fn new_array(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }

    /// The stored values, a scalar viewed as a one element slice
    pub fn values(&self) -> &[T] {
        match self {
            ScalarOrArray::Scalar(value) => std::slice::from_ref(value),
            ScalarOrArray::Array(values) => values.as_slice(),
        }
    }

    /// Expands to exactly `len` values. Returns `None` when an array of a
    /// different length is stored.
    pub fn broadcast(&self, len: usize) -> Option<Vec<T>> {
        match self {
            ScalarOrArray::Scalar(value) => Some(vec![value.clone(); len]),
            ScalarOrArray::Array(values) if values.len() == len => Some(values.clone()),
            ScalarOrArray::Array(_) => None,
        }
    }

    pub fn try_map<U: Sync + Clone, E>(
        &self,
        f: impl Fn(&T) -> Result<U, E>,
    ) -> Result<ScalarOrArray<U>, E> {
        Ok(match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)?),
            ScalarOrArray::Array(values) => {
                ScalarOrArray::Array(values.iter().map(f).collect::<Result<Vec<_>, _>>()?)
            }
        })
    }
}

impl<T: Sync + Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl From<f64> for ScalarOrArray<f64> {
    fn from(value: f64) -> Self {
        ScalarOrArray::Scalar(value)
    }
}
