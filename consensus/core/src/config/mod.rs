pub mod constants;
pub mod params;
