pub mod hit;
pub mod raster;
pub mod svg;

pub use hit::{hit_test, hit_test_rect};
pub use raster::{ExportError, RasterFormat, RasterOptions, encode, rasterize};
pub use svg::render_svg;
