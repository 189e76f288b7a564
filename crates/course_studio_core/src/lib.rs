pub mod catalog;
pub mod domain;
pub mod export;
pub mod filter;
pub mod history;
pub mod ports;
pub mod prompt;
pub mod recorder;
pub mod session;
pub mod table;

pub use catalog::{Catalog, CatalogLoad, CatalogStats};
pub use domain::{
    Course, Exercise, ExerciseCategory, FilterParameters, GenerationRecord, GenerationRequest,
    GenerationType, Module, OutputFormat, Role, Turn,
};
pub use ports::{CatalogSource, CompletionService, PortError, PortResult};
pub use session::{GenerationSession, PreparedGeneration};
