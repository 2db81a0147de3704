pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod marker;
pub mod place;
pub mod viewport;
