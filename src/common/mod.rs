//! Common, shared types.

pub mod contact;
pub mod layers;
pub mod messages;
pub mod pool;
pub mod settings;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
