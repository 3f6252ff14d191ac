pub mod cli;
pub mod cohort;
pub mod compare;
pub mod ctx;
pub mod error;
pub mod io;
pub mod labels;
pub mod mapping;
pub mod metric;
pub mod pipeline;
pub mod release;
