//! Page model and the pagination algorithm

mod page;
mod paginate;

pub use page::{Page, PageMetrics, PageSet, ReflowConfig, A4_HEIGHT, A4_WIDTH};
pub use paginate::paginate;
