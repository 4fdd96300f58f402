pub mod backup;
pub mod history;
pub mod meal;
pub mod stats;
pub mod status;
