//! `idtrust-recon`: multi-source identity document reconciliation engine.
//!
//! Pure engine crate: receives up to three pre-extracted field records
//! (OCR, QR, XML), returns a scored verdict. No CLI or IO dependencies.

pub mod aggregate;
pub mod checksum;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod mask;
pub mod model;
pub mod normalize;
pub mod similarity;

pub use checksum::verhoeff_valid;
pub use config::ScoringConfig;
pub use engine::{decide, Engine};
pub use error::ReconError;
pub use model::{FieldRecord, Outcome, Preview, Source, Submission, Verdict};
pub use similarity::NameSimilarity;
