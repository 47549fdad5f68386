pub mod controller;
pub mod handlers;
pub mod history;
pub mod models;
pub mod render;

pub use controller::{SessionController, SessionSettings};

#[cfg(test)]
pub mod testing;
