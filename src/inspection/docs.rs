//! Typed views over firm-level and engagement-file documents
//!
//! Source documents are arbitrary JSON; each rule reads them through an
//! explicit optional-field struct so that "missing means false" is a
//! documented default rather than an implicit fallback. A document that fails
//! to deserialize degrades to the struct's default in the same way, since a
//! malformed record is evidence of non-compliance, not an error.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Firm registration metadata from `firm_profile.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FirmProfile {
    pub firm_name: String,
    pub license_number: String,
    pub jurisdiction: String,
    pub next_inspection_due: String,
}

/// All loaded firm-level documents, keyed by document type.
///
/// Keys come from each file's `document_type` field, falling back to the file
/// stem. Unknown document types are kept; they still contribute assertions.
#[derive(Debug, Clone, Default)]
pub struct FirmDocuments {
    docs: BTreeMap<String, Value>,
}

impl FirmDocuments {
    pub fn new(docs: BTreeMap<String, Value>) -> Self {
        Self { docs }
    }

    pub fn insert(&mut self, doc_type: String, doc: Value) {
        self.docs.insert(doc_type, doc);
    }

    /// Deserialize one document into its typed view, degrading to the
    /// default when the document is absent or malformed.
    pub fn view<T>(&self, doc_type: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.docs
            .get(doc_type)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Whether a document of this type was loaded with any content. An
    /// empty or null document counts as absent.
    pub fn has_content(&self, doc_type: &str) -> bool {
        match self.docs.get(doc_type) {
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }

    /// Raw document trees, in key order. Used for assertion counting.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.docs.values()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Firm-level document shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GovernancePolicies {
    pub tone_at_top_policy: bool,
    pub quality_responsibility_assigned_to: Option<String>,
    pub strategic_quality_review_documented: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndependenceDeclarations {
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Declaration {
    pub person: String,
    pub signed: bool,
    pub status: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConflictRegister {
    pub exists: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientAcceptanceForms {
    pub forms: Vec<AcceptanceForm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AcceptanceForm {
    pub client: String,
    pub form_exists: bool,
    pub risk_assessment: bool,
    pub integrity_eval: bool,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpdRecords {
    pub records: Vec<CpdRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpdRecord {
    pub person: String,
    pub status: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyDistributionLog {
    pub distributions: Vec<PolicyDistribution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyDistribution {
    pub missing_acknowledgment: Vec<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComplaintsProcedure {
    pub procedure_exists: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonitoringLog {
    pub annual_file_monitoring: MonitoringActivity,
    pub completed_engagement_monitoring: MonitoringActivity,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonitoringActivity {
    pub performed: bool,
    pub reviewer_independent: bool,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SoqmEvaluation {
    pub overdue: bool,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemediationLog {
    pub entries: Vec<RemediationEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemediationEntry {
    pub status: Option<String>,
    pub deficiency: Option<String>,
    pub corrective_action: Option<String>,
    pub root_cause: Option<String>,
    pub issue: Option<String>,
}

// ---------------------------------------------------------------------------
// Engagement file shapes
// ---------------------------------------------------------------------------

/// One engagement file as loaded from `documents/engagement_files/`.
///
/// `client_name` and `engagement_type` stay optional because their defaults
/// differ by consumer: rules fall back to "Unknown"/"compilation", result
/// metadata falls back to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngagementFile {
    pub file_id: String,
    pub client_name: Option<String>,
    pub engagement_type: Option<String>,
    pub standard: String,
    pub engagement_partner: String,
    pub prepared_by: String,
    pub assertions_passed: usize,
    pub assertions_total: usize,
    pub overall_status: String,
    pub checks: EngagementChecks,
}

impl EngagementFile {
    /// Location string used by every finding raised against this file.
    pub fn location(&self) -> String {
        format!(
            "{} ({})",
            self.client_name.as_deref().unwrap_or("Unknown"),
            self.file_id
        )
    }

    /// Engagement type with the rule-side default applied.
    pub fn rule_engagement_type(&self) -> &str {
        self.engagement_type.as_deref().unwrap_or("compilation")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngagementChecks {
    pub engagement_letter: EngagementLetter,
    pub independence: IndependenceCheck,
    pub financial_statements: FinancialStatementsCheck,
    pub report: ReportCheck,
    pub file_assembly: FileAssemblyCheck,
    pub compilation_procedures: CompilationProceduresCheck,
    pub analytical_procedures: AnalyticalProceduresCheck,
    pub management_representation_letter: ManagementRepLetterCheck,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngagementLetter {
    pub exists: bool,
    pub signed_by_client: bool,
    pub signed_by_firm: bool,
    pub date_signed: Option<String>,
    pub work_start_date: Option<String>,
    pub references_csrs_4200: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndependenceCheck {
    pub assessment_documented: bool,
    pub status: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FinancialStatementsCheck {
    pub basis_of_accounting_note: bool,
    pub status: Option<String>,
    pub issue: Option<String>,
}

/// `not_old_section_9200` is tri-state: only an explicit `false` means the
/// report was confirmed to use the outdated wording.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportCheck {
    pub not_old_section_9200: Option<bool>,
    pub issue: Option<String>,
}

/// `assembled_within_60_days` is tri-state for the same reason.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileAssemblyCheck {
    pub status: Option<String>,
    pub assembled_within_60_days: Option<bool>,
    pub days_elapsed: Option<i64>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompilationProceduresCheck {
    pub status: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticalProceduresCheck {
    pub performed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManagementRepLetterCheck {
    pub obtained: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_of_missing_document_is_default() {
        let docs = FirmDocuments::default();
        let gov: GovernancePolicies = docs.view("governance_policies");
        assert!(!gov.tone_at_top_policy);
        assert!(gov.quality_responsibility_assigned_to.is_none());
    }

    #[test]
    fn test_view_ignores_unknown_fields() {
        let mut docs = FirmDocuments::default();
        docs.insert(
            "governance_policies".to_string(),
            json!({
                "document_type": "governance_policies",
                "tone_at_top_policy": true,
                "reviewed_by": "A. Partner"
            }),
        );
        let gov: GovernancePolicies = docs.view("governance_policies");
        assert!(gov.tone_at_top_policy);
        assert!(!gov.strategic_quality_review_documented);
    }

    #[test]
    fn test_malformed_document_degrades_to_default() {
        let mut docs = FirmDocuments::default();
        docs.insert(
            "conflict_register".to_string(),
            json!({"exists": "definitely"}),
        );
        let reg: ConflictRegister = docs.view("conflict_register");
        assert!(!reg.exists);
    }

    #[test]
    fn test_has_content() {
        let mut docs = FirmDocuments::default();
        assert!(!docs.has_content("soqm_manual"));
        docs.insert("soqm_manual".to_string(), json!({}));
        assert!(!docs.has_content("soqm_manual"));
        docs.insert("soqm_manual".to_string(), json!({"approved": true}));
        assert!(docs.has_content("soqm_manual"));
    }

    #[test]
    fn test_engagement_file_location_defaults() {
        let ef: EngagementFile = serde_json::from_value(json!({
            "file_id": "EF-2024-001"
        }))
        .unwrap();
        assert_eq!(ef.location(), "Unknown (EF-2024-001)");
        assert_eq!(ef.rule_engagement_type(), "compilation");
    }

    #[test]
    fn test_tri_state_report_field() {
        let explicit: ReportCheck =
            serde_json::from_value(json!({"not_old_section_9200": false})).unwrap();
        assert_eq!(explicit.not_old_section_9200, Some(false));

        let absent: ReportCheck = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.not_old_section_9200, None);
    }
}
