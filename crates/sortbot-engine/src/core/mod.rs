//! Core data types shared by the engine and its hosts.

pub use self::{example::*, label::*};

mod example;
mod label;
