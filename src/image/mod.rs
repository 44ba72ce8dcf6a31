pub mod io;
pub mod raster;
pub mod traits;

pub use self::raster::{
    ColorRaster, IdRaster, InstanceIdRaster, InstanceRaster, LabelRaster, PanopticRaster, Raster,
};
pub use self::traits::{RasterView, Rows};
