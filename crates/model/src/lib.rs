//! Domain records and the content repository abstraction.
//!
//! Every record type carries a visibility switch and a canonical date
//! used for ordering. The ordering is declared once, here, and is the
//! only ordering the rest of the pipeline ever sees: canonical date
//! descending, with equal dates keeping their insertion order.

mod error;
mod records;
mod repository;

pub use error::ModelError;
pub use records::{
    AcademicProduct, CourseEntry, EducationEntry, ExperienceEntry, FileRef, HasCertificate,
    Profile, ProjectEntry, RecognitionEntry, SaleCondition, SaleItem,
};
pub use repository::{ContentRepository, CvData, InMemoryRepository};
