mod component;
mod error;
mod geometry;
mod render;
mod state;

pub use component::GraphCanvas;
