//! Tree representations: the immutable `InputTree` and the mutable,
//! backtrackable `PatternTree` grown by the enumeration driver.

pub mod pattern;
pub mod projection;
pub mod tree;
