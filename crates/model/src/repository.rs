//! The content repository abstraction and its in-memory implementation.
//!
//! The pipeline is strictly read-only over this interface. Every
//! collection query applies the same contract: visible (or active)
//! records only, canonical date descending, insertion order preserved
//! between equal dates.

use crate::error::ModelError;
use crate::records::{
    AcademicProduct, CourseEntry, EducationEntry, ExperienceEntry, Profile, ProjectEntry,
    RecognitionEntry, SaleItem,
};
use serde::Deserialize;
use std::cmp::Reverse;
use std::fmt::Debug;
use std::path::Path;

/// Read-only access to the CV content collections.
///
/// Implementations must return collections already filtered to visible
/// records and sorted by the type's canonical date, descending. Ties
/// keep the repository's natural (insertion) order across calls.
pub trait ContentRepository: Send + Sync + Debug {
    /// The first profile record, or `None` if none exists.
    fn profile(&self) -> Option<Profile>;

    fn experience(&self) -> Vec<ExperienceEntry>;
    fn education(&self) -> Vec<EducationEntry>;
    fn courses(&self) -> Vec<CourseEntry>;
    fn recognitions(&self) -> Vec<RecognitionEntry>;
    fn projects(&self) -> Vec<ProjectEntry>;
    fn sale_items(&self) -> Vec<SaleItem>;
    fn academic_products(&self) -> Vec<AcademicProduct>;
}

/// The full content document, as loaded from JSON.
#[derive(Debug, Default, Deserialize)]
pub struct CvData {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub recognitions: Vec<RecognitionEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub sale_items: Vec<SaleItem>,
    #[serde(default)]
    pub academic_products: Vec<AcademicProduct>,
}

/// An in-memory repository over a deserialized [`CvData`] document.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    data: CvData,
}

impl InMemoryRepository {
    pub fn new(data: CvData) -> Self {
        Self { data }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let data: CvData = serde_json::from_str(json)?;
        Ok(Self::new(data))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Clones the visible records and sorts them newest-first.
///
/// `Vec::sort_by_key` is stable, so equal keys retain insertion order.
fn sorted_desc<T, K, V, F>(items: &[T], visible: V, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    V: Fn(&T) -> bool,
    F: Fn(&T) -> K,
{
    let mut out: Vec<T> = items.iter().filter(|r| visible(r)).cloned().collect();
    out.sort_by_key(|r| Reverse(key(r)));
    out
}

impl ContentRepository for InMemoryRepository {
    fn profile(&self) -> Option<Profile> {
        self.data.profiles.first().cloned()
    }

    fn experience(&self) -> Vec<ExperienceEntry> {
        sorted_desc(&self.data.experience, |e| e.visible, |e| e.canonical_date())
    }

    fn education(&self) -> Vec<EducationEntry> {
        sorted_desc(&self.data.education, |e| e.visible, |e| e.canonical_date())
    }

    fn courses(&self) -> Vec<CourseEntry> {
        sorted_desc(&self.data.courses, |c| c.visible, |c| c.canonical_date())
    }

    fn recognitions(&self) -> Vec<RecognitionEntry> {
        sorted_desc(&self.data.recognitions, |r| r.visible, |r| r.canonical_date())
    }

    fn projects(&self) -> Vec<ProjectEntry> {
        sorted_desc(&self.data.projects, |p| p.visible, |p| p.canonical_date())
    }

    fn sale_items(&self) -> Vec<SaleItem> {
        sorted_desc(&self.data.sale_items, |s| s.active, |s| s.canonical_date())
    }

    fn academic_products(&self) -> Vec<AcademicProduct> {
        sorted_desc(
            &self.data.academic_products,
            |p| p.visible,
            |p| p.canonical_date(),
        )
    }
}
