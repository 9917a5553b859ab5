//! Harvester core: pure naming, link selection and report types.
//!
//! Nothing in this crate touches the network or the filesystem.
mod candidate;
mod document;
mod links;
mod report;

pub use candidate::CandidateUrl;
pub use document::{derive_document_name, has_pdf_suffix, DocumentName, NoMatch, PDF_EXTENSION};
pub use links::filter_links;
pub use report::{FailureReason, FetchResult, HarvestReport, ReportBuilder, RunOutcome};
