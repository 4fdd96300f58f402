pub mod band;
pub mod meal;
