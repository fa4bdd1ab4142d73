mod apply_move;
mod fold_submoves;
mod insert_middle_sprout;
mod prune_cobweb;

pub use apply_move::ApplyMove;
pub use fold_submoves::{fold_submove, FoldSubmoves};
pub use insert_middle_sprout::InsertMiddleSprout;
pub use prune_cobweb::PruneCobweb;
