//! CV record types.
//!
//! Field inventory follows the portfolio data model: a single profile,
//! plus dated entry collections. Records that can carry a certificate
//! implement [`HasCertificate`] so callers never probe field names.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A reference to a certificate file, classified by URI scheme.
///
/// `http`/`https` references are remote and fetched over the network;
/// anything else is a path relative to the media root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileRef {
    Remote(String),
    Local(String),
}

impl FileRef {
    pub fn as_str(&self) -> &str {
        match self {
            FileRef::Remote(s) | FileRef::Local(s) => s,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, FileRef::Remote(_))
    }
}

impl From<String> for FileRef {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            FileRef::Remote(value)
        } else {
            FileRef::Local(value)
        }
    }
}

impl From<FileRef> for String {
    fn from(value: FileRef) -> Self {
        match value {
            FileRef::Remote(s) | FileRef::Local(s) => s,
        }
    }
}

/// Capability trait for records that may carry an attached certificate.
///
/// The certificate is never required to exist or be reachable; callers
/// must tolerate fetch failures per record.
pub trait HasCertificate {
    /// The certificate file reference, if this record has one.
    fn certificate_ref(&self) -> Option<&FileRef>;

    /// Human-readable title used in the certificate index block.
    fn certificate_title(&self) -> &str;
}

fn default_true() -> bool {
    true
}

/// The site owner's identity and contact data. Single record, used as
/// template context in every section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    #[serde(default)]
    pub landline: Option<String>,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub home_address: Option<String>,
    #[serde(default)]
    pub work_address: Option<String>,
    #[serde(default)]
    pub driving_licence: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    /// Privacy switch: show the mobile phone on public pages.
    #[serde(default = "default_true")]
    pub show_phone: bool,
    /// Privacy switch: show the home address on public pages.
    #[serde(default)]
    pub show_home_address: bool,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    /// `None` means the position is current.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub certificate: Option<FileRef>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl ExperienceEntry {
    /// Canonical ordering key: most recent start date first.
    pub fn canonical_date(&self) -> NaiveDate {
        self.start_date
    }
}

impl HasCertificate for ExperienceEntry {
    fn certificate_ref(&self) -> Option<&FileRef> {
        self.certificate.as_ref()
    }

    fn certificate_title(&self) -> &str {
        &self.position
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: NaiveDate,
    /// `None` means the studies are ongoing.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl EducationEntry {
    /// Canonical ordering key: completion date, most recent first.
    /// Ongoing studies sort ahead of everything completed.
    pub fn canonical_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    pub name: String,
    pub institution: String,
    /// Academic hours.
    #[serde(default)]
    pub hours: u32,
    pub completed_on: NaiveDate,
    #[serde(default)]
    pub certificate: Option<FileRef>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl CourseEntry {
    pub fn canonical_date(&self) -> NaiveDate {
        self.completed_on
    }
}

impl HasCertificate for CourseEntry {
    fn certificate_ref(&self) -> Option<&FileRef> {
        self.certificate.as_ref()
    }

    fn certificate_title(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionEntry {
    pub name: String,
    pub institution: String,
    pub awarded_on: NaiveDate,
    #[serde(default)]
    pub registry_code: String,
    #[serde(default)]
    pub certificate: Option<FileRef>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl RecognitionEntry {
    pub fn canonical_date(&self) -> NaiveDate {
        self.awarded_on
    }
}

impl HasCertificate for RecognitionEntry {
    fn certificate_ref(&self) -> Option<&FileRef> {
        self.certificate.as_ref()
    }

    fn certificate_title(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub registry_id: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl ProjectEntry {
    pub fn canonical_date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleCondition {
    New,
    Good,
    Fair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub condition: SaleCondition,
    pub item_id: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: u32,
    pub published_at: NaiveDateTime,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl SaleItem {
    /// Canonical ordering key: publication timestamp, newest first.
    pub fn canonical_date(&self) -> NaiveDateTime {
        self.published_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicProduct {
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    pub published_on: NaiveDate,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl AcademicProduct {
    pub fn canonical_date(&self) -> NaiveDate {
        self.published_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ref_classifies_remote() {
        let r = FileRef::from("https://certs.example.com/a.pdf".to_string());
        assert!(r.is_remote());
        assert_eq!(r.as_str(), "https://certs.example.com/a.pdf");

        let r = FileRef::from("http://certs.example.com/a.pdf".to_string());
        assert!(r.is_remote());
    }

    #[test]
    fn test_file_ref_classifies_local() {
        let r = FileRef::from("courses/certificates/rust.pdf".to_string());
        assert!(!r.is_remote());
        assert_eq!(r.as_str(), "courses/certificates/rust.pdf");
    }

    #[test]
    fn test_file_ref_json_round_trip_is_a_plain_string() {
        let r: FileRef = serde_json::from_str("\"https://x.test/c.pdf\"").unwrap();
        assert!(r.is_remote());
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"https://x.test/c.pdf\"");
    }

    #[test]
    fn test_education_canonical_date_ongoing_sorts_first() {
        let ongoing = EducationEntry {
            degree: "MSc".into(),
            institution: "UTN".into(),
            start_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            end_date: None,
            visible: true,
        };
        let done = EducationEntry {
            degree: "BSc".into(),
            institution: "UTN".into(),
            start_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 7, 1),
            visible: true,
        };
        assert!(ongoing.canonical_date() > done.canonical_date());
    }

    #[test]
    fn test_has_certificate_via_trait_object() {
        let course = CourseEntry {
            name: "Welding".into(),
            institution: "SECAP".into(),
            hours: 40,
            completed_on: NaiveDate::from_ymd_opt(2021, 3, 10).unwrap(),
            certificate: Some(FileRef::Local("cursos/welding.pdf".into())),
            visible: true,
        };
        let record: &dyn HasCertificate = &course;
        assert_eq!(record.certificate_title(), "Welding");
        assert!(record.certificate_ref().is_some());
    }
}
