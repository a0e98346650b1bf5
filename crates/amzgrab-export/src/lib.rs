pub mod rows;
pub mod sheet;

pub use rows::{headers, max_image_count, project, BASE_HEADERS};
pub use sheet::{default_output_name, write_csv, ExportError};
