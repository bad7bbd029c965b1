//! Page layout: the measurement boundary, the page plan and the paginator.

mod measure;
mod paginator;
mod plan;

pub use measure::{Measurer, NoMeasure};
pub use paginator::{create_pages, paginate};
pub use plan::{Block, Page, PagePlan};
