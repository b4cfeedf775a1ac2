pub mod human;
pub mod schedule;

pub use human::HumanMode;
pub use schedule::{Schedule, Wake};
