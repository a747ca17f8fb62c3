#![allow(dead_code)]


pub use turns::{post_turn, post_turn_raw, TurnBody};
