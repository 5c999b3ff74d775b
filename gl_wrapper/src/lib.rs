pub mod context;
pub mod geometry;
pub mod program;
pub mod renderer;
