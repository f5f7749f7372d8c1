pub mod directory;
pub mod recorder;

pub use directory::HttpAccountDirectory;
pub use recorder::HttpTransactionRecorder;
