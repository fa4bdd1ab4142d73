mod eligible_destinations;
mod is_move_possible;
mod is_submove_possible;

pub use eligible_destinations::EligibleDestinations;
pub use is_move_possible::IsMovePossible;
pub use is_submove_possible::IsSubmovePossibleInFace;
