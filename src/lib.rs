pub mod html;
pub mod png;
pub mod raster;
pub mod report;
pub mod table;
