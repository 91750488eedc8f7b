pub mod grid;
pub mod normalize;
pub mod projection;
pub mod raster;

pub use grid::{build_grid, DensityGrid};
pub use normalize::{Colorizer, IndexedRows};
pub use projection::{project, project_all, EARTH_RADIUS};
pub use raster::{Canvas, RasterWriter, RowProgress};
