//! Narrative length and quality assessment (T661 Part 2, Section B)
//!
//! Each project's three narrative lines are measured against the fixed word
//! limits, banded on strict <50% / <75% breakpoints. Eligible projects also
//! get a keyword scan over the narrative text; a narrative that never
//! mentions a hypothesis or an experiment reads like routine development to
//! a reviewer, whatever the word count says.

use crate::claim::constants::{LINE_242_WORD_LIMIT, LINE_244_WORD_LIMIT, LINE_246_WORD_LIMIT};
use crate::claim::docs::Project;
use crate::claim::models::{NarrativeAssessment, NarrativeBand, NarrativeLine, QualityIndicator};

/// Keywords a defensible narrative is expected to touch, with report labels.
pub static QUALITY_KEYWORDS: &[(&str, &str)] = &[
    ("hypothesis", "Hypotheses mentioned"),
    ("experiment", "Experiments referenced"),
    ("systematic", "Systematic approach described"),
    ("uncertainty", "Uncertainty articulated"),
    ("advancement", "Advancement claimed"),
    ("measured", "Measurements cited"),
    ("documented", "Documentation referenced"),
];

fn line(code: &str, label: &str, word_count: usize, limit: usize) -> NarrativeLine {
    let ratio = word_count as f64 / limit as f64;
    NarrativeLine {
        line: code.to_string(),
        label: label.to_string(),
        word_count,
        limit,
        ratio,
        band: NarrativeBand::from_ratio(ratio),
    }
}

/// Assess one project's narratives. Quality indicators are skipped for
/// ineligible projects; there is no narrative worth polishing there.
pub fn assess_project(project: &Project) -> NarrativeAssessment {
    let lines = vec![
        line(
            "242",
            "Line 242 — Scientific/Technological Advancement",
            project.line_242_word_count,
            LINE_242_WORD_LIMIT,
        ),
        line(
            "244",
            "Line 244 — Technological Uncertainty",
            project.line_244_word_count,
            LINE_244_WORD_LIMIT,
        ),
        line(
            "246",
            "Line 246 — Work Performed",
            project.line_246_word_count,
            LINE_246_WORD_LIMIT,
        ),
    ];

    let quality = if project.is_ineligible() {
        Vec::new()
    } else {
        let text = project.narrative_text();
        QUALITY_KEYWORDS
            .iter()
            .map(|(keyword, label)| QualityIndicator {
                keyword: keyword.to_string(),
                label: label.to_string(),
                present: text.contains(keyword),
            })
            .collect()
    };

    NarrativeAssessment {
        project_id: project.project_id.clone(),
        lines,
        quality,
    }
}
