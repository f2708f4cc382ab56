// extensions/mod.rs
//
// Pure math helpers shared across systems.
// Decoupled from the registry and selection state.

pub mod damping;

pub use damping::{damp, damp_factor, damp_vec3, lerp, lerp_vec3};
