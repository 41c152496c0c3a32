//! Domain layer - pure deprecation logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of the deprecation
//! system:
//! - Positional message template rendering
//! - Loose version ordering for versioned package ignores
//! - Caller frames and the called-from-outside classification
//! - Deprecation notices and their backend renderings
//!
//! All types in this layer are pure and easily testable.

pub mod frames;
pub mod notice;
pub mod template;
pub mod version;
