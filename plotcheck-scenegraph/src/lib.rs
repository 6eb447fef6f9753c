pub mod axes;
pub mod defaults;
pub mod error;
pub mod figure;
pub mod legend;
pub mod marks;
pub mod opts;
pub mod ticks;
