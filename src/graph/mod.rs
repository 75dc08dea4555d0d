// Graph utilities - time-range navigation primitives
//
// Pure functions shared by the widget: a duration algebra for the
// human-readable range strings ("5m", "2h", ...) and window math for
// stepping the visible time window. No module state beyond the
// immutable range ladder.

pub mod duration;
pub mod window;
