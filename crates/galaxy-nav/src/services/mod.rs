pub mod chat;
pub mod visit;

pub use chat::{ChatResponder, FallbackResponder, KeywordResponder};
pub use visit::{SessionVisitLogger, VisitLogger};
