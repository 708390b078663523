//! Inspection rule evaluators
//!
//! Each firm-level component implements [`ComponentCheck`]; engagement files
//! go through [`check_engagement_file`]. Checks are pure functions over the
//! loaded documents: a missing document or field reads as non-compliant,
//! never as an error, so evaluation cannot fail.

mod acceptance;
mod communication;
mod engagement;
mod ethics;
mod governance;
mod monitoring;
mod resources;

pub use engagement::check_engagement_file;

use crate::inspection::docs::FirmDocuments;
use crate::inspection::models::Finding;

/// Location carried by every firm-level finding
pub const FIRM_LEVEL: &str = "Firm-Level";

/// One firm-level quality-management component check
pub trait ComponentCheck {
    /// Display name of the component
    fn name(&self) -> &'static str;

    /// CSQM 1 component description
    fn description(&self) -> &'static str;

    /// Evaluate the component's rules in their fixed internal order.
    fn check(&self, docs: &FirmDocuments) -> Vec<Finding>;
}

/// All firm-level checks, in registration order. The aggregator relies on
/// this order when concatenating findings.
pub fn component_checks() -> Vec<Box<dyn ComponentCheck>> {
    vec![
        Box::new(governance::GovernanceCheck),
        Box::new(ethics::EthicsCheck),
        Box::new(acceptance::AcceptanceCheck),
        Box::new(resources::ResourcesCheck),
        Box::new(communication::CommunicationCheck),
        Box::new(monitoring::MonitoringCheck),
    ]
}
