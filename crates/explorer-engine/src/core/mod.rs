pub mod cell;
pub mod game_loop;
pub mod loading;
pub mod physics;
pub mod rng;
pub mod schedule;
pub mod time;
