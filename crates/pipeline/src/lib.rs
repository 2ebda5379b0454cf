//! The PDF assembly pipeline.
//!
//! One request flows through a fixed sequence: derive the section
//! inclusion set, query the content repository, render and convert the
//! section blocks, merge fetched certificate attachments, stamp page
//! numbers, serialize. Only a top-block conversion failure aborts a
//! request; everything else is logged and skipped.

mod assembler;
mod fetch;
mod filter;
mod request;

pub use assembler::{AssembleError, AssembledCv, CvAssembler};
pub use fetch::{CertificateFetcher, DEFAULT_FETCH_TIMEOUT, FetchError};
pub use filter::SectionInclusionSet;
pub use request::CvRequest;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Binds a loopback listener that answers exactly one HTTP request
    /// with the given raw response, returning the base URL.
    pub fn serve_one_response(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }
}
