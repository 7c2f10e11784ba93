// Defaults for the answering service and logging, overridable from the environment.

use std::env;

/// Endpoint used when neither `--endpoint` nor `MEDIMIND_ENDPOINT` is given.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/ask/";

/// File name of the terminal UI's log inside `LOG_DIR`.
pub const LOG_FILE_NAME: &str = "medimind.log";

lazy_static::lazy_static! {
    pub static ref LOG_DIR: String = env::var("MEDIMIND_LOG_DIR").unwrap_or_else(|_| ".".to_string());
}
