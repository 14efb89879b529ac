pub mod render;
pub mod template;
