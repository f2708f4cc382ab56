pub mod orbit;
pub mod picking;
pub mod planet;
pub mod render;
