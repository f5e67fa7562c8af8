//! doctor_core: classify-then-prompt diagnosis of frontend/backend
//! integration errors.
//!
//! A keyword [`classifier`] guesses the faulty side from the error text. The
//! [`DiagnosisOrchestrator`] then asks the model for a structured answer,
//! parses it totally, and lets a decisive rule verdict override the model.
//! Every failure ends in a complete [`Diagnosis`].
//!
//! ```rust,no_run
//! use doctor_core::{DiagnosisOrchestrator, DoctorSettings, IssueReport};
//!
//! # async fn run() -> doctor_core::Result<()> {
//! let orchestrator = DiagnosisOrchestrator::from_env(DoctorSettings::from_env()?);
//! let report = IssueReport::new("CORS error: Access-Control-Allow-Origin missing")
//!     .with_frontend("http://localhost:5173", "React")
//!     .with_backend("http://localhost:8000", "FastAPI");
//! let diagnosis = orchestrator.analyze(&report).await;
//! assert_eq!(diagnosis.side.as_str(), "backend");
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod diagnosis;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod report;
pub mod settings;
pub mod verdict;

pub use classifier::{classify, explain, Classification, RuleClassifier};
pub use diagnosis::{reconcile, Diagnosis, DiagnosisSource};
pub use error::{DoctorError, Result};
pub use orchestrator::DiagnosisOrchestrator;
pub use parse::{parse_model_output, ModelReply};
pub use report::IssueReport;
pub use settings::DoctorSettings;
pub use verdict::{RuleVerdict, Side};
