pub mod report;
pub mod summary;
pub mod table;
pub mod tsv_writer;
