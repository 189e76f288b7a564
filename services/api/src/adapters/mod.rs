pub mod catalog_files;
pub mod completion_llm;

pub use catalog_files::FileCatalogSource;
pub use completion_llm::OpenAiCompletionAdapter;
