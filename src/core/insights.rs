use crate::domain::model::{Contract, CopilotMessage};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Notice deadlines are placed a fixed 90 days before renewal.
pub const NOTICE_LEAD_DAYS: i64 = 90;

/// More SLA breaches than this marks the vendor as underperforming.
pub const UNDERPERFORMING_BREACHES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    /// Under 30 days.
    Critical,
    /// Under 60 days.
    Warning,
    Comfortable,
}

impl Urgency {
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::Critical => "#DC2626",
            Urgency::Warning => "#D97706",
            Urgency::Comfortable => "#059669",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedAction {
    pub title: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractInsights {
    pub notice_deadline: Option<NaiveDate>,
    pub urgency: Urgency,
    pub underperforming: bool,
    pub messages: Vec<CopilotMessage>,
    pub actions: Vec<RecommendedAction>,
}

pub fn notice_deadline(contract: &Contract) -> Option<NaiveDate> {
    contract
        .renewal_date
        .checked_sub_signed(Duration::days(NOTICE_LEAD_DAYS))
}

pub fn urgency(contract: &Contract) -> Urgency {
    match contract.days_remaining {
        d if d < 30 => Urgency::Critical,
        d if d < 60 => Urgency::Warning,
        _ => Urgency::Comfortable,
    }
}

pub fn is_underperforming(contract: &Contract) -> bool {
    contract.sla_breaches > UNDERPERFORMING_BREACHES
}

pub fn copilot_messages(contract: &Contract) -> Vec<CopilotMessage> {
    vec![
        CopilotMessage::Narration {
            vendor_name: contract.vendor_name.clone(),
        },
        CopilotMessage::Analysis {
            renewal_date: contract.renewal_date,
            term: contract.term.clone(),
            uplift: contract.uplift.clone(),
            sla_breaches: contract.sla_breaches,
        },
    ]
}

pub fn recommended_actions(contract: &Contract) -> Vec<RecommendedAction> {
    vec![
        RecommendedAction {
            title: "Renegotiate Pricing",
            detail: format!(
                "Leverage uptime failures to waive the {} uplift and lock in current rates.",
                contract.uplift
            ),
        },
        RecommendedAction {
            title: "Update DPA Terms",
            detail: "Bring data processing addendum in line with new 2025 security policies."
                .to_string(),
        },
    ]
}

pub fn insights(contract: &Contract) -> ContractInsights {
    ContractInsights {
        notice_deadline: notice_deadline(contract),
        urgency: urgency(contract),
        underperforming: is_underperforming(contract),
        messages: copilot_messages(contract),
        actions: recommended_actions(contract),
    }
}
