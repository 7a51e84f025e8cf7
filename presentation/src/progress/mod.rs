//! Progress reporting while a game is played

pub mod reporter;
