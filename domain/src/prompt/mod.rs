//! Prompt assembly for flow rounds

pub mod template;
