#![allow(dead_code)]

pub mod memory;
pub mod model;
