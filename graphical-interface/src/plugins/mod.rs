mod places;
mod puck;

pub use places::Places;
pub use puck::LocationPuck;
