pub mod model;
pub mod parsers;
pub mod share;
pub mod svg;
pub mod views;
