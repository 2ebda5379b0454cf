//! Smoke test over the facade crate's re-exported API.

use std::sync::Arc;
use std::time::Duration;
use vitae::pipeline::{CertificateFetcher, CvAssembler, CvRequest};
use vitae::resource::PassthroughResolver;
use vitae::{ContentRepository, InMemoryRepository};

#[test]
fn test_assemble_through_facade() {
    let repository = InMemoryRepository::from_json(
        r#"{
            "profiles": [{
                "id_number": "1712345678",
                "first_name": "Ana",
                "last_name": "Mora",
                "phone": "0991234567",
                "email": "ana@example.com"
            }],
            "education": [
                {"degree": "BSc", "institution": "UTN", "start_date": "2015-09-01", "end_date": "2020-07-01"}
            ]
        }"#,
    )
    .unwrap();
    let repository: Arc<dyn ContentRepository> = Arc::new(repository);

    let media = tempfile::tempdir().unwrap();
    let fetcher = CertificateFetcher::new(media.path(), Duration::from_millis(500)).unwrap();
    let assembler =
        CvAssembler::new(repository, fetcher, Box::new(PassthroughResolver)).unwrap();

    let cv = assembler.assemble(&CvRequest::default()).unwrap();
    assert_eq!(cv.filename, "CV_Ana Mora.pdf");
    assert!(cv.bytes.starts_with(b"%PDF"));

    let doc = vitae::lopdf::Document::load_mem(&cv.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}
