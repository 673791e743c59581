//! Market data objects built from quoted levels.

pub mod fx_surface;

pub use fx_surface::{FxVolatilitySurface, FxVolatilitySurfacePoint, SmilePillars};
