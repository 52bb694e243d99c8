pub mod json_report;
pub mod rendered_report;
pub mod status;
pub mod summary;
