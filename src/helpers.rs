mod per_player;

pub use per_player::PerPlayer;
