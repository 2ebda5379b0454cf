//! The orchestrator: one request in, one assembled PDF out.

use crate::fetch::{CertificateFetcher, FetchError};
use crate::filter::SectionInclusionSet;
use crate::request::CvRequest;
use std::sync::Arc;
use thiserror::Error;
use vitae_composer::lopdf::Document;
use vitae_composer::{ComposerError, append_pages, load_document, numbering, page_count};
use vitae_model::{ContentRepository, HasCertificate, Profile};
use vitae_render::{
    CertificateIndexEntry, ConversionError, FragmentRenderer, HtmlConverter, RenderContext,
    RenderError, SectionMode, TextFlowConverter,
};
use vitae_resource::UriResolver;

/// Failure of one render+convert invocation. Fatal for the top block,
/// logged and skipped elsewhere.
#[derive(Error, Debug)]
enum SectionError {
    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Convert(#[from] ConversionError),
}

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("renderer initialization failed: {0}")]
    Renderer(#[from] RenderError),

    #[error("mandatory top section failed: {0}")]
    TopSection(String),

    #[error("PDF composition error: {0}")]
    Compose(#[from] ComposerError),

    #[error("failed to serialize final document: {0}")]
    Serialize(std::io::Error),
}

/// The final document plus its download filename.
#[derive(Debug, Clone)]
pub struct AssembledCv {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Sequences filtering, querying, rendering, conversion, certificate
/// merging and page numbering for one request. Owns no mutable state
/// across requests; every intermediate document is request-scoped.
pub struct CvAssembler {
    repository: Arc<dyn ContentRepository>,
    renderer: FragmentRenderer,
    converter: Box<dyn HtmlConverter>,
    fetcher: CertificateFetcher,
    resolver: Box<dyn UriResolver>,
}

impl CvAssembler {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        fetcher: CertificateFetcher,
        resolver: Box<dyn UriResolver>,
    ) -> Result<Self, AssembleError> {
        Ok(Self {
            repository,
            renderer: FragmentRenderer::new()?,
            converter: Box::new(TextFlowConverter::new()),
            fetcher,
            resolver,
        })
    }

    /// Swaps in a different HTML→PDF converter implementation.
    pub fn with_converter(mut self, converter: Box<dyn HtmlConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn assemble(&self, request: &CvRequest) -> Result<AssembledCv, AssembleError> {
        let include = SectionInclusionSet::from_request(request);
        let styles = request.style_options();

        let profile = self.repository.profile();
        if profile.is_none() {
            log::warn!("no profile record found, assembling with placeholder identity");
        }

        // Excluded categories become empty collections, never absent.
        let experience = if include.experience {
            self.repository.experience()
        } else {
            Vec::new()
        };
        let education = if include.education {
            self.repository.education()
        } else {
            Vec::new()
        };
        let courses = if include.courses() {
            self.repository.courses()
        } else {
            Vec::new()
        };
        let recognitions = if include.recognitions {
            self.repository.recognitions()
        } else {
            Vec::new()
        };
        let projects = if include.projects {
            self.repository.projects()
        } else {
            Vec::new()
        };
        let sale_items = if include.sales {
            self.repository.sale_items()
        } else {
            Vec::new()
        };
        let academic_products = if include.academic_products {
            self.repository.academic_products()
        } else {
            Vec::new()
        };

        // Top block: always rendered, even over empty collections, so
        // the document always has a page 1. Failure here fails the
        // whole request.
        let mut context = RenderContext::with_profile(profile.clone(), styles.clone());
        context.experience = experience.clone();
        context.education = education.clone();
        let mut document = self
            .section_document(SectionMode::Top, &context)
            .map_err(|e| AssembleError::TopSection(e.to_string()))?;

        // Courses block: skipped silently when empty, skipped with a
        // log entry when conversion fails.
        if !courses.is_empty() {
            let mut context = RenderContext::with_profile(profile.clone(), styles.clone());
            context.courses = courses.clone();
            match self.section_document(SectionMode::Courses, &context) {
                Ok(section) => {
                    append_pages(&mut document, &section)?;
                }
                Err(e) => log::warn!("skipping courses block: {}", e),
            }
        }

        // Bottom block: only when it has anything to show; an empty
        // bottom block would be a blank page.
        let bottom_has_content = !(recognitions.is_empty()
            && projects.is_empty()
            && sale_items.is_empty()
            && academic_products.is_empty());
        if bottom_has_content {
            let mut context = RenderContext::with_profile(profile.clone(), styles.clone());
            context.recognitions = recognitions.clone();
            context.projects = projects.clone();
            context.sale_items = sale_items.clone();
            context.academic_products = academic_products.clone();
            match self.section_document(SectionMode::Bottom, &context) {
                Ok(section) => {
                    append_pages(&mut document, &section)?;
                }
                Err(e) => log::warn!("skipping bottom block: {}", e),
            }
        }

        let certificate_records = collect_certificate_records(&experience, &courses, &recognitions);

        // Certificate index: appended only when its conversion yields
        // at least one page.
        if !(experience.is_empty() && courses.is_empty() && recognitions.is_empty()) {
            let mut context = RenderContext::with_profile(profile.clone(), styles.clone());
            context.certificate_index = certificate_records
                .iter()
                .map(|(section, record)| CertificateIndexEntry {
                    section: section.to_string(),
                    title: record.certificate_title().to_string(),
                })
                .collect();
            match self.section_document(SectionMode::CertificateIndex, &context) {
                Ok(section) if page_count(&section) > 0 => {
                    append_pages(&mut document, &section)?;
                }
                Ok(_) => log::debug!("certificate index rendered no pages, skipping"),
                Err(e) => log::warn!("skipping certificate index: {}", e),
            }
        }

        // Certificate attachments, in record order. Each failure skips
        // that record only.
        for (section, record) in &certificate_records {
            self.append_certificate(&mut document, *section, *record);
        }

        // Page numbering last, over the true final page count. On
        // failure the unstamped document is returned instead.
        let mut stamped = document.clone();
        match numbering::stamp_page_numbers(&mut stamped) {
            Ok(()) => document = stamped,
            Err(e) => log::warn!("page numbering failed, returning unstamped document: {}", e),
        }

        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(AssembleError::Serialize)?;

        Ok(AssembledCv {
            bytes,
            filename: cv_filename(profile.as_ref()),
        })
    }

    fn section_document(
        &self,
        mode: SectionMode,
        context: &RenderContext,
    ) -> Result<Document, SectionError> {
        let html = self.renderer.render(mode, context)?;
        Ok(self.converter.convert(&html, self.resolver.as_ref())?)
    }

    fn append_certificate(
        &self,
        document: &mut Document,
        section: &'static str,
        record: &dyn HasCertificate,
    ) {
        let bytes = match self.fetcher.fetch(record) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return,
            Err(e) => {
                log::warn!(
                    "skipping certificate for {} '{}': {}",
                    section,
                    record.certificate_title(),
                    e
                );
                return;
            }
        };

        let certificate = match load_document(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!(
                    "certificate for {} '{}' is not a readable PDF: {}",
                    section,
                    record.certificate_title(),
                    e
                );
                return;
            }
        };

        if let Err(e) = append_pages(document, &certificate) {
            log::warn!(
                "failed to merge certificate for {} '{}': {}",
                section,
                record.certificate_title(),
                e
            );
        }
    }
}

/// All certificate-bearing records, in the deterministic attachment
/// order: experience, then courses, then recognitions, each in its
/// canonical collection order.
fn collect_certificate_records<'a>(
    experience: &'a [vitae_model::ExperienceEntry],
    courses: &'a [vitae_model::CourseEntry],
    recognitions: &'a [vitae_model::RecognitionEntry],
) -> Vec<(&'static str, &'a dyn HasCertificate)> {
    let mut records: Vec<(&'static str, &dyn HasCertificate)> = Vec::new();
    records.extend(
        experience
            .iter()
            .map(|e| ("Experience", e as &dyn HasCertificate)),
    );
    records.extend(courses.iter().map(|c| ("Courses", c as &dyn HasCertificate)));
    records.extend(
        recognitions
            .iter()
            .map(|r| ("Recognitions", r as &dyn HasCertificate)),
    );
    records
        .into_iter()
        .filter(|(_, record)| record.certificate_ref().is_some())
        .collect()
}

/// `CV_<name>.pdf`, with everything but alphanumerics, spaces and
/// underscores stripped from the name.
fn cv_filename(profile: Option<&Profile>) -> String {
    let base = profile
        .map(Profile::full_name)
        .unwrap_or_else(|| "Curriculum".to_string());
    let sanitized: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    format!("CV_{}.pdf", sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cv_filename_strips_punctuation() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "id_number": "1",
            "first_name": "Ana-María",
            "last_name": "Mora (PhD)",
            "phone": "0",
            "email": "a@b.c"
        }))
        .unwrap();
        assert_eq!(cv_filename(Some(&profile)), "CV_AnaMaría Mora PhD.pdf");
    }

    #[test]
    fn test_cv_filename_without_profile() {
        assert_eq!(cv_filename(None), "CV_Curriculum.pdf");
    }
}
