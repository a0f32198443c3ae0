pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod rendering;
pub mod scenario;
pub mod state;
pub mod terminal_io;
pub mod types;
