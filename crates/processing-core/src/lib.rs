//! fragreel Processing Core: the clip planner
//!
//! Turns a demo log into editing decisions for a highlight reel:
//! - **Locator:** Find kill events in the log and tag them with server frames
//! - **Windows:** Pad each event into a clip window and merge overlapping windows
//! - **Transitions:** Chain crossfades across the clips for video and audio
//!
//! This crate is pure computation with no I/O and no media engine.
//! All inputs are data; all outputs are data.

pub mod locator;
pub mod transitions;
pub mod windows;

pub use locator::{EventLocator, LocatorPatterns};
pub use transitions::{build_transition_plan, plan_stitch};
pub use windows::{compute_windows, merge_intervals, ClipPadding};
