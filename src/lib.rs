//! Codest library: collect project source files into one document.

#![deny(missing_docs)]

pub mod cli;
pub mod collector;
pub mod config;
pub mod defaults;
pub mod discover;
pub mod error;
pub mod gitignore;
pub mod normalize;
pub mod render;
pub mod rules;
pub mod target;
