mod bounding_box;
mod is_valid;

pub use bounding_box::{bounds, HasBounds};
pub use is_valid::{IsValid, RingRef, ValidityIssue};
