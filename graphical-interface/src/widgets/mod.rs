mod notices;
mod permission;
mod places;
mod radius;
mod status;

pub use notices::show_notices;
pub use permission::DialogGate;
pub use places::WidgetPlaces;
pub use radius::WidgetRadius;
pub use status::WidgetStatus;
