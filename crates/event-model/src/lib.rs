//! fragreel Event Model
//!
//! Defines the data contracts shared by the highlight pipeline:
//! - **Events:** Kill events located in a demo log, and the CSV event table
//! - **Intervals:** Half-open time windows rendered as clips
//! - **Transitions:** Crossfade chains that stitch clips together
//! - **Demo paths:** Naming convention for a demo's inputs and outputs
//!
//! All times are seconds on the source recording's timeline.

pub mod demo;
pub mod event;
pub mod interval;
pub mod transition;

pub use demo::*;
pub use event::*;
pub use interval::*;
pub use transition::*;
