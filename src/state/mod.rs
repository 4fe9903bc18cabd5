pub mod bounds;
pub mod brush;

pub use bounds::ink_anchor;
pub use brush::Brush;
