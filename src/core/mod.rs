pub mod catalog;
pub mod planner;

pub use catalog::PlaceCatalog;
pub use planner::Planner;
