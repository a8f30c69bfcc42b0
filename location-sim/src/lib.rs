//! Simulated location source: walks a route on a background clock and
//! reports position fixes, standing in for a GPS receiver.

pub mod route;
pub mod sim_error;
pub mod timer;
pub mod walk;

pub use route::{Route, WALKING_SPEED_MPS};
pub use sim_error::SimError;
pub use timer::Timer;
pub use walk::{Fix, SimulatedWalk};
