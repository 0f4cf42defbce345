pub mod flatfile;
pub mod grid;

/// Signed cell coordinate.
///
/// Callers may pass any value here; everything outside `[0, dim)` on either
/// axis is a permanently-dead position that no operation ever stores to.
pub type Coord = i64;
