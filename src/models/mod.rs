// src/models/mod.rs

pub mod lead;
pub mod persona;
pub mod profile;
pub mod quiz;
