//! Harvester engine: network fetch, site adapters, output store and the
//! harvest pipeline.
pub mod adapters;
mod config;
mod decode;
mod fetch;
mod harvest;
mod pipeline;
mod registry;
mod store;
mod types;

pub use adapters::{AdapterError, ArchiveAdapter, FirstMatchAdapter, NoCandidatesFound, SiteAdapter};
pub use config::{EngineConfig, PipelineConfig, RetryPolicy, DEFAULT_CONCURRENCY};
pub use decode::{decode_listing_page, DecodeError, DecodedPage};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use harvest::Harvester;
pub use pipeline::FetchPipeline;
pub use registry::{RegistryError, Site, SiteRegistry};
pub use store::{ensure_output_dir, DirectoryStore, OutputStore, PersistError, DEFAULT_OUTPUT_DIR};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ResourceKind};
