pub mod accession;
pub mod activity;
pub mod error;
pub mod target;

pub use accession::{Accession, OUTPUT_FILE_SUFFIX};
pub use activity::{ActivityRecord, StandardType, DEFAULT_STANDARD_TYPE};
pub use error::ExportError;
pub use target::{ResolutionPolicy, TargetComponent, TargetRecord};
