pub mod clock;
pub mod error;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod session;
