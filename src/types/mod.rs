//! Value types of the report model.

mod cell;
mod line;
mod page;
mod style;

pub use cell::*;
pub use line::*;
pub use page::*;
pub use style::*;
