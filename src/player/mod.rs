pub(crate) mod config;
pub(crate) mod round_player;
pub(crate) mod snapshot;
