pub mod events;
pub mod match_state;
pub mod score;
pub mod serialization;
