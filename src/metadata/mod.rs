//! Decoded metadata: the ordered tag map and value normalization.

mod normalize;
mod tag_map;

pub use normalize::{format_decimal, normalize_value, LIST_SEPARATOR};
pub use tag_map::TagMap;
