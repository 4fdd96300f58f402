pub mod backup;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod meal;
pub mod serve;
pub mod stats;
pub mod status;
