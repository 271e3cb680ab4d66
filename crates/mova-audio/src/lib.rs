//! MovaType Audio - composition and rendering
//!
//! Flattens a timeline arrangement into a single mono buffer by
//! additive overlay: silence sized to the arrangement extent plus a
//! tail, each block's clip mixed in at its start offset. Decoded
//! clips are cached so repeated renders only pay for disk reads once.

pub mod cache;
pub mod compose;

pub use cache::ClipCache;
pub use compose::{ComposeError, ComposeResult, CompositionEngine, RenderConfig, TAIL_SECONDS};
