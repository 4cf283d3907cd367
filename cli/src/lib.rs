pub mod batch;
pub mod cli;
pub mod error;
pub mod io;
pub mod report;
