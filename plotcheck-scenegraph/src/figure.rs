use crate::axes::Axes;
use crate::error::SceneGraphError;
use serde::{Deserialize, Serialize};

/// Top level container of one or more axes. A figure round trips through
/// JSON so a drawn scene can be saved by one program and checked by another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub axes: Vec<Axes>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// A figure with a single empty axes
    pub fn new() -> Self {
        Self::subplots(1)
    }

    pub fn subplots(n: usize) -> Self {
        Self {
            axes: (0..n).map(|_| Axes::default()).collect(),
        }
    }

    /// The first axes, created if the figure has none
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            self.axes.push(Axes::default());
        }
        &mut self.axes[0]
    }

    pub fn axes(&self, index: usize) -> Result<&Axes, SceneGraphError> {
        self.axes
            .get(index)
            .ok_or(SceneGraphError::AxesNotFound(index))
    }

    pub fn axes_mut(&mut self, index: usize) -> Result<&mut Axes, SceneGraphError> {
        self.axes
            .get_mut(index)
            .ok_or(SceneGraphError::AxesNotFound(index))
    }

    pub fn to_json(&self) -> Result<String, SceneGraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneGraphError> {
        Ok(serde_json::from_str(json)?)
    }
}
