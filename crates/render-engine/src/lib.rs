//! fragreel Render Engine
//!
//! Cuts clip windows out of the source recording and stitches them into
//! the final highlight reel.
//!
//! # Pipeline Architecture
//!
//! ```text
//! demo.mp4 ──┐
//!            ├── Trim (stream copy) ── clip_000.mp4 ─┐
//! windows ───┘                         clip_001.mp4 ─┤
//!                                      clip_002.mp4 ─┤
//!                                                    │
//! transition plan ── xfade / acrossfade graph ───────┤
//!                                                    ▼
//!                                            Encode (H.264 + AAC)
//!                                                    │
//!                                                    ▼
//!                                           demo-highlight.mp4
//! ```
//!
//! A single window skips the graph and is copied to the output as-is.

pub mod engine;
pub mod filter;
pub mod highlight;

pub use engine::*;
pub use highlight::*;
