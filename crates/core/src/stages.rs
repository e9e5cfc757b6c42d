//! Canonical default pipeline stage set.
//!
//! Every fund gets the same 13-stage pipeline on first registry access.
//! Positions define the left-to-right kanban order; "Prospects" is the
//! stage new investors land in when no explicit placement is given.

/// One entry of the canonical default stage template.
#[derive(Debug, Clone, Copy)]
pub struct DefaultStage {
    pub name: &'static str,
    pub position: i32,
    pub is_default: bool,
}

/// Default pipeline stages seeded for a fund with no stages yet,
/// in canonical position order.
pub const DEFAULT_STAGES: [DefaultStage; 13] = [
    DefaultStage {
        name: "Prospects",
        position: 0,
        is_default: true,
    },
    DefaultStage {
        name: "Investors",
        position: 1,
        is_default: false,
    },
    DefaultStage {
        name: "Intro Email",
        position: 2,
        is_default: false,
    },
    DefaultStage {
        name: "Opportunity Email",
        position: 3,
        is_default: false,
    },
    DefaultStage {
        name: "Phone Call",
        position: 4,
        is_default: false,
    },
    DefaultStage {
        name: "First Meeting",
        position: 5,
        is_default: false,
    },
    DefaultStage {
        name: "Second Meeting",
        position: 6,
        is_default: false,
    },
    DefaultStage {
        name: "Follow Up Email",
        position: 7,
        is_default: false,
    },
    DefaultStage {
        name: "Signing Contract",
        position: 8,
        is_default: false,
    },
    DefaultStage {
        name: "Signing Subscription",
        position: 9,
        is_default: false,
    },
    DefaultStage {
        name: "Letter for Capital Call",
        position: 10,
        is_default: false,
    },
    DefaultStage {
        name: "Money Transfer",
        position: 11,
        is_default: false,
    },
    DefaultStage {
        name: "Transfer Date",
        position: 12,
        is_default: false,
    },
];
