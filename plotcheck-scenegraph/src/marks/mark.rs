use crate::marks::line::SceneLineMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::symbol::SceneSymbolMark;
use serde::{Deserialize, Serialize};

/// A drawn element of an axes, in the order it was drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SceneMark {
    Line(SceneLineMark),
    Symbol(SceneSymbolMark),
    Rect(SceneRectMark),
}

impl SceneMark {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Line(mark) => mark.label.as_deref(),
            Self::Symbol(mark) => mark.label.as_deref(),
            Self::Rect(mark) => mark.label.as_deref(),
        }
    }

    pub fn bounds(&self) -> Option<[f64; 4]> {
        match self {
            Self::Line(mark) => mark.bounds(),
            Self::Symbol(mark) => mark.bounds(),
            Self::Rect(mark) => mark.bounds(),
        }
    }
}
