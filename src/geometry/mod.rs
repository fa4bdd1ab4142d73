pub mod bounds;
pub mod polyline;

pub use bounds::Bounds;
pub use polyline::Polyline;
