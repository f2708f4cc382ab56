pub mod adapters;
pub mod keys;
pub mod queue;
