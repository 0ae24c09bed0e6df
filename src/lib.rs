//! Core simulation for a small fixed-arena shooter: one player, one bullet,
//! six bounce-and-descend enemies.  The library half is pure game logic;
//! all terminal I/O lives in the binary.

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
