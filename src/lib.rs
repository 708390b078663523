//! Auditready - compliance readiness scanning
//!
//! A local-first scanner that evaluates compliance document packages against
//! hardcoded regulatory rule sets and produces severity-classified findings,
//! composite readiness scores, and remediation reports.
//!
//! Two pipelines share the same shape (load documents, run rule evaluators,
//! aggregate findings, project scores):
//! - `inspection` - CPA practice inspection readiness (CSQM 1 / CSRS 4200)
//! - `claim` - SR&ED claim package readiness (T661 / ITC estimation)

pub mod claim;
pub mod cli;
pub mod config;
pub mod doctree;
pub mod inspection;
pub mod loader;
pub mod reporters;
