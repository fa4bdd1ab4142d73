mod moves;
mod submove;

pub use moves::{Move, Submoves};
pub use submove::{Submove, Termination};
