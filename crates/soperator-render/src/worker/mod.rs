//! Worker node objects

mod container;
mod volume;

pub use container::{render_container_slurmd, render_container_toolkit_validation};
