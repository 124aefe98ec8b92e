//! Pure rendering helpers shared by the screens.
//!
//! Everything here is a function from snapshot data to widget content —
//! no state, no side effects — so the screens stay thin and the render
//! contract stays testable.

pub mod cards;
pub mod feed;
