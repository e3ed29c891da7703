pub mod cooling;
pub mod sample;
pub mod turbine;
pub mod vessel;
