#![no_std]
extern crate alloc;

pub mod autoplay;
pub mod card;
pub mod column;
pub mod engine;
pub mod formatter;
pub mod foundation;
pub mod hint;
pub mod moves;
pub mod shuffler;
pub mod stock;
