//! Outer adapters that feed commands into the engine and render its state.

pub mod csv;
