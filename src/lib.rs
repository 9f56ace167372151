//! Vertex reduction and polygon offsetting for map geometry.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{GeomorphError, Result};
pub use geometry::{Bounds, Coord, LineString, MultiPolygon, Polygon, Ring, VectorData};
pub use operations::offset::{offset, JoinStyle, OffsetOptions, PolygonOffset};
pub use operations::query::{bounds, HasBounds, IsValid};
pub use operations::simplify::{
    DouglasPeucker, PathKind, Simplifier, Target, VisvalingamHeap, VisvalingamNaive,
};
