pub mod fuzzy;
pub mod normalize;

pub use fuzzy::{edit_distance, is_compound_match, is_match, similarity, MATCH_THRESHOLD};
pub use normalize::normalize;
