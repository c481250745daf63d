#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`InventoryError`)
//! - [`config`]: Scan configuration (`InventoryConfig`, builder)
//! - [`version`]: Archive file name version keys (`VersionKey`)
//! - [`archive`]: Archive discovery and descriptor extraction (`ArchiveScanner`)
//! - [`descriptor`]: `inventory.xml` parsing (`DescriptorParser`)
//! - [`report`]: Bug de-duplication and line rendering (`ReportBuilder`, `Report`)
//! - [`writer`]: Output file naming and persistence (`ReportWriter`)
//! - [`runner`]: One-shot orchestrator (`run`, `RunSummary`)
//!
//! # Architecture
//!
//! ```text
//! scan_dir --> ArchiveScanner --> Vec<DiscoveredDescriptor>
//!                                          |
//!                                   DescriptorParser
//!                                          |
//!                                     PatchRecord
//!                                          |
//!                                    ReportBuilder (seen-set)
//!                                          |
//!                                       Report --> ReportWriter --> Fixed_Bug_For_<ver>_<date>.txt
//! ```

pub mod archive;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod report;
pub mod runner;
pub mod version;
pub mod writer;

// --- Public API Re-exports ---

// Runner (main orchestrator)
pub use runner::{RunSummary, merge_descriptors, run};

// Configuration
pub use config::{InventoryConfig, InventoryConfigBuilder};

// Error
pub use error::InventoryError;

// Archive
pub use archive::{ArchiveScanner, DiscoveredDescriptor, ScanOutcome};

// Descriptor
pub use descriptor::DescriptorParser;

// Report
pub use report::{Report, ReportBuilder, extract_sub_version};

// Version
pub use version::{VersionKey, version_key, version_token};

// Writer
pub use writer::{ReportWriter, default_file_name};
