pub mod extractor;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{SafeIDI64, SafeMajorIdI64};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
