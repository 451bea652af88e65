//! Upload pipeline services

pub mod records;
pub mod signer;
pub mod upload;

pub use records::RecordUpdater;
pub use signer::UrlSigner;
pub use upload::UploadService;
