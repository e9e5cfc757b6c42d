//! Per-stage checklist templates and due-day offsets for auto-generated tasks.
//!
//! The tables are process-wide read-only lookups: built once at startup via
//! [`ChecklistTable::standard`] and injected into the task generator rather
//! than referenced as ad-hoc globals, so tests can supply alternate tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Priority of a checklist task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse a stored priority string, defaulting to `Medium` for anything
    /// unrecognised (dirty data tolerance, same rule as monetary coercion).
    pub fn parse_or_medium(s: &str) -> Self {
        match s {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

/// One checklist task template: title plus priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub title: String,
    pub priority: TaskPriority,
}

impl TaskTemplate {
    fn new(title: &str, priority: TaskPriority) -> Self {
        Self {
            title: title.to_string(),
            priority,
        }
    }
}

/// Stage-name → checklist template and due-day lookup table.
///
/// Stage names absent from the template map produce no tasks; stage names
/// absent from the due-day map fall back to `default_due_days`.
#[derive(Debug, Clone)]
pub struct ChecklistTable {
    templates: HashMap<String, Vec<TaskTemplate>>,
    due_days: HashMap<String, i64>,
    default_due_days: i64,
}

impl ChecklistTable {
    /// Build a table from explicit maps. Intended for tests.
    pub fn new(
        templates: HashMap<String, Vec<TaskTemplate>>,
        due_days: HashMap<String, i64>,
        default_due_days: i64,
    ) -> Self {
        Self {
            templates,
            due_days,
            default_due_days,
        }
    }

    /// Checklist template for a stage name. Empty slice when the stage has
    /// no checklist (not an error).
    pub fn tasks_for(&self, stage_name: &str) -> &[TaskTemplate] {
        self.templates
            .get(stage_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Due-date offset in days for a stage name.
    pub fn due_days_for(&self, stage_name: &str) -> i64 {
        self.due_days
            .get(stage_name)
            .copied()
            .unwrap_or(self.default_due_days)
    }

    /// The standard production table covering all 13 default stages.
    pub fn standard() -> Self {
        use TaskPriority::{High, Low, Medium};
        let t = TaskTemplate::new;

        let mut templates = HashMap::new();
        templates.insert(
            "Prospects".to_string(),
            vec![
                t("Research investor background", Medium),
                t("Confirm check size range", High),
                t("Confirm sector alignment", High),
                t("Confirm geography alignment", Medium),
                t("Review prior portfolio", Medium),
                t("Identify warm intro path", Medium),
                t("Assign relationship owner", High),
            ],
        );
        templates.insert(
            "Investors".to_string(),
            vec![
                t("Validate contact information", High),
                t("Identify decision maker", High),
                t("Map internal champion", Medium),
                t("Log relationship strength (1-5)", Medium),
                t(
                    "Tag investor type (Institutional / Family Office / Individual)",
                    Medium,
                ),
                t("Assign outreach strategy", Medium),
                t("Prepare intro blurb", Medium),
            ],
        );
        templates.insert(
            "Intro Email".to_string(),
            vec![
                t("Draft personalized intro email", High),
                t("Attach teaser (if applicable)", Medium),
                t("Confirm warm intro path", Medium),
                t("Send intro email", High),
                t("Log send date", Medium),
                t("Set follow-up reminder (5-7 days)", Medium),
            ],
        );
        templates.insert(
            "Opportunity Email".to_string(),
            vec![
                t("Send pitch deck", High),
                t("Send one-pager", High),
                t("Send data room access", Medium),
                t("Log materials shared", Medium),
                t("Confirm NDA (if required)", Medium),
                t("Schedule call", High),
                t("Log engagement score", Medium),
            ],
        );
        templates.insert(
            "Phone Call".to_string(),
            vec![
                t("Prepare call agenda", High),
                t("Review investor notes", Medium),
                t("Confirm call participants", Medium),
                t("Log meeting notes", High),
                t("Log objections", Medium),
                t("Assign follow-up owner", Medium),
                t("Schedule first meeting", High),
            ],
        );
        templates.insert(
            "First Meeting".to_string(),
            vec![
                t("Prepare detailed presentation", High),
                t("Customize slides for investor", High),
                t("Identify potential objections", Medium),
                t("Log meeting notes", High),
                t("Log level of interest (Hot / Warm / Cold)", High),
                t("Identify decision timeline", Medium),
                t("Schedule second meeting", High),
            ],
        );
        templates.insert(
            "Second Meeting".to_string(),
            vec![
                t("Send financial model", High),
                t("Share cap table", High),
                t("Share legal structure", Medium),
                t("Share performance reports", Medium),
                t("Answer follow-up questions", High),
                t("Log DD checklist", Medium),
                t("Confirm soft commitment amount", High),
            ],
        );
        templates.insert(
            "Follow Up Email".to_string(),
            vec![
                t("Send summary email", High),
                t("Address objections", High),
                t("Confirm allocation size", High),
                t("Confirm timeline", Medium),
                t("Request subscription agreement", High),
            ],
        );
        templates.insert(
            "Signing Contract".to_string(),
            vec![
                t("Send subscription agreement", High),
                t("Confirm entity name", High),
                t("Confirm allocation amount", High),
                t("Confirm wire instructions", High),
                t("Collect signed docs", High),
                t("Upload signed docs", Medium),
            ],
        );
        templates.insert(
            "Signing Subscription".to_string(),
            vec![
                t("Confirm countersignature", High),
                t("Confirm compliance review", High),
                t("Confirm AML/KYC", High),
                t("Confirm transfer instructions", High),
            ],
        );
        templates.insert(
            "Letter for Capital Call".to_string(),
            vec![
                t("Draft capital call letter", High),
                t("Confirm transfer details", High),
                t("Send capital call", High),
                t("Confirm receipt of confirmation", Medium),
            ],
        );
        templates.insert(
            "Money Transfer".to_string(),
            vec![
                t("Confirm transfer initiated", High),
                t("Confirm bank confirmation", High),
                t("Match funds to investor", High),
                t("Log amount received", High),
                t("Update total raised", Medium),
            ],
        );
        templates.insert(
            "Transfer Date".to_string(),
            vec![
                t("Confirm funds settled", High),
                t("Update capital table", High),
                t("Notify finance", Medium),
                t("Send confirmation email", Medium),
                t("Send thank-you note", Low),
                t("Mark investor as Active", High),
            ],
        );

        let due_days = [
            ("Prospects", 3),
            ("Investors", 3),
            ("Intro Email", 3),
            ("Opportunity Email", 5),
            ("Phone Call", 5),
            ("First Meeting", 7),
            ("Second Meeting", 10),
            ("Follow Up Email", 5),
            ("Signing Contract", 7),
            ("Signing Subscription", 7),
            ("Letter for Capital Call", 10),
            ("Money Transfer", 14),
            ("Transfer Date", 7),
        ]
        .into_iter()
        .map(|(name, days)| (name.to_string(), days))
        .collect();

        Self {
            templates,
            due_days,
            default_due_days: 5,
        }
    }
}
