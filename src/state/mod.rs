//! State of the certificate layout panel.
//!
//! This module contains:
//! - Geometry in pixels and normalized coordinates
//! - The annotation surface (image, name box, drag state)
//! - Image decoding for uploads

mod decode;
mod geometry;
mod surface;

pub use decode::*;
pub use geometry::*;
pub use surface::*;
