//! Capital bucket classification and fund-level aggregation.
//!
//! Partitions a fund's pipeline into deployed / final-stage / potential /
//! excluded capital based on stage names, with dirty-data-tolerant amount
//! coercion. Everything here is a pure read: inputs come in as a snapshot,
//! aggregates come out, nothing is mutated.
//!
//! Fallback rule (resolved drift): for both the final-stage and potential
//! buckets, `expected_ticket_amount` is used when positive, otherwise
//! `investment_size` when positive, otherwise the investor lands on the
//! missing-ticket diagnostic list. The deployed bucket only ever counts
//! `investment_size`. The same rule applies on the per-fund and
//! platform-wide paths.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Capital bucket a stage belongs to, determined by stage name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageClass {
    /// Money already received: "Money Transfer", "Transfer Date".
    Deployed,
    /// Late but not yet funded: contract / subscription / capital call.
    FinalStage,
    /// "Declined" (case-insensitive): counts toward nothing.
    Excluded,
    /// Every other stage.
    Potential,
}

impl StageClass {
    pub fn classify(stage_name: &str) -> Self {
        match stage_name {
            "Money Transfer" | "Transfer Date" => Self::Deployed,
            "Signing Contract" | "Signing Subscription" | "Letter for Capital Call" => {
                Self::FinalStage
            }
            other if other.eq_ignore_ascii_case("declined") => Self::Excluded,
            _ => Self::Potential,
        }
    }
}

/// Coerce an optional monetary field to a usable amount.
///
/// Missing, non-finite, and non-positive values all become 0.0 — dirty
/// data is absorbed here rather than surfaced (`InvalidCoercion` is a
/// silent rule, not an error).
pub fn coerce_amount(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// One pipeline entry joined with its investor's monetary fields.
#[derive(Debug, Clone)]
pub struct EntryCapital {
    pub investor_id: DbId,
    pub investor_name: String,
    pub investor_type: Option<String>,
    pub stage_name: String,
    pub stage_entered_at: Timestamp,
    pub investment_size: Option<f64>,
    pub expected_ticket_amount: Option<f64>,
}

/// One investor's contribution (or missing contribution) to a bucket.
#[derive(Debug, Clone, Serialize)]
pub struct CapitalLine {
    pub investor_id: DbId,
    pub investor_name: String,
    pub investor_type: Option<String>,
    pub pipeline_stage: String,
    pub amount: f64,
}

/// Aggregated capital position of one fund.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FundCapital {
    pub deployed: f64,
    pub potential: f64,
    pub final_stage: f64,
    pub deployed_investors: Vec<CapitalLine>,
    pub potential_investors: Vec<CapitalLine>,
    pub final_stage_investors: Vec<CapitalLine>,
    /// Investors in a deployed stage with no usable `investment_size`.
    pub missing_investment_size: Vec<CapitalLine>,
    /// Investors in a potential or final stage with neither amount usable.
    pub missing_expected_ticket: Vec<CapitalLine>,
    /// Largest single deployed investment.
    pub largest_deployed: f64,
    /// Most recent `stage_entered_at` among counted deployed investors.
    pub last_close: Option<Timestamp>,
}

impl FundCapital {
    /// Average deployed investment across counted deployed investors.
    pub fn average_deployed(&self) -> f64 {
        if self.deployed_investors.is_empty() {
            0.0
        } else {
            self.deployed / self.deployed_investors.len() as f64
        }
    }
}

/// Classify every entry of a fund into capital buckets.
pub fn classify_fund(entries: &[EntryCapital]) -> FundCapital {
    let mut capital = FundCapital::default();

    for entry in entries {
        let line = |amount: f64| CapitalLine {
            investor_id: entry.investor_id,
            investor_name: entry.investor_name.clone(),
            investor_type: entry.investor_type.clone(),
            pipeline_stage: entry.stage_name.clone(),
            amount,
        };

        let investment = coerce_amount(entry.investment_size);
        let ticket = coerce_amount(entry.expected_ticket_amount);

        match StageClass::classify(&entry.stage_name) {
            StageClass::Deployed => {
                if investment > 0.0 {
                    capital.deployed += investment;
                    if investment > capital.largest_deployed {
                        capital.largest_deployed = investment;
                    }
                    if capital.last_close.map_or(true, |c| entry.stage_entered_at > c) {
                        capital.last_close = Some(entry.stage_entered_at);
                    }
                    capital.deployed_investors.push(line(investment));
                } else {
                    capital.missing_investment_size.push(line(0.0));
                }
            }
            StageClass::FinalStage => {
                let amount = if ticket > 0.0 { ticket } else { investment };
                if amount > 0.0 {
                    capital.final_stage += amount;
                    capital.final_stage_investors.push(line(amount));
                } else {
                    capital.missing_expected_ticket.push(line(0.0));
                }
            }
            StageClass::Potential => {
                let amount = if ticket > 0.0 { ticket } else { investment };
                if amount > 0.0 {
                    capital.potential += amount;
                    capital.potential_investors.push(line(amount));
                } else {
                    capital.missing_expected_ticket.push(line(0.0));
                }
            }
            StageClass::Excluded => {}
        }
    }

    capital
}

/// Deployed capital as a percentage of the fund's target raise.
/// Zero when no target is set.
pub fn percent_of_goal(deployed: f64, target_raise: Option<f64>) -> f64 {
    match target_raise {
        Some(target) if target > 0.0 => deployed / target * 100.0,
        _ => 0.0,
    }
}

/// Severity of a derived alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Informational alert derived from a fund's capital position.
/// Non-authoritative: never blocks anything.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub alert_type: &'static str,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Days since the most recent close, if any.
pub fn days_since_last_close(capital: &FundCapital, now: Timestamp) -> Option<i64> {
    capital.last_close.map(|close| (now - close).num_days())
}

/// Derive the informational alert set for a fund.
pub fn alerts(capital: &FundCapital, target_raise: Option<f64>, now: Timestamp) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let pct = percent_of_goal(capital.deployed, target_raise);
    if target_raise.is_some_and(|t| t > 0.0) && pct < 50.0 {
        alerts.push(Alert {
            alert_type: "behind_target",
            severity: AlertSeverity::Warning,
            message: format!("Only {pct:.0}% of target achieved"),
        });
    }

    if capital.final_stage > 0.0 {
        match days_since_last_close(capital, now) {
            Some(days) if days > 30 => alerts.push(Alert {
                alert_type: "stalled_final_stage",
                severity: AlertSeverity::Warning,
                message: format!(
                    "No closes in {days} days with ${:.0} in final stages",
                    capital.final_stage
                ),
            }),
            None => alerts.push(Alert {
                alert_type: "stalled_final_stage",
                severity: AlertSeverity::Info,
                message: format!(
                    "${:.0} in final stages awaiting first close",
                    capital.final_stage
                ),
            }),
            Some(_) => {}
        }
    }

    if capital.deployed > 0.0 && capital.largest_deployed > 0.0 {
        let concentration = capital.largest_deployed / capital.deployed * 100.0;
        if concentration > 40.0 {
            alerts.push(Alert {
                alert_type: "concentration_risk",
                severity: if concentration > 60.0 {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                },
                message: format!(
                    "Top investor represents {concentration:.0}% of deployed capital"
                ),
            });
        }
    }

    alerts
}

/// Platform-wide capital totals folded from per-fund results.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PlatformCapital {
    pub total_deployed_capital: f64,
    pub total_potential_capital: f64,
    pub capital_in_final_stages: f64,
}

/// Fold per-fund capital results into platform totals.
pub fn platform_totals<'a>(funds: impl IntoIterator<Item = &'a FundCapital>) -> PlatformCapital {
    funds
        .into_iter()
        .fold(PlatformCapital::default(), |mut acc, fund| {
            acc.total_deployed_capital += fund.deployed;
            acc.total_potential_capital += fund.potential;
            acc.capital_in_final_stages += fund.final_stage;
            acc
        })
}
