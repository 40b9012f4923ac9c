pub mod detect;
pub mod formats;
pub mod locale;
pub mod options;
pub mod reader;

pub use detect::TypeDetector;
pub use formats::CellParser;
pub use locale::Locale;
pub use options::{CsvReadOptions, CsvReadOptionsBuilder, DEFAULT_SAMPLE_SIZE};
pub use reader::CsvReader;
