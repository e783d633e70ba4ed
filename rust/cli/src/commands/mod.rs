pub mod deal;
pub mod sim;

pub use deal::handle_deal;
pub use sim::{handle_sim, SimArgs};
