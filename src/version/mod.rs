//! Three-part release version numbers.

pub mod number;

pub use number::VersionNumber;
