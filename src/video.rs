pub mod engine;
pub mod player;
