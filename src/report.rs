//! Text, CSV and JSON renderings of radar views for the command line.

use crate::core::aggregator::{value_contribution, RadarView};
use crate::core::insights::ContractInsights;
use crate::domain::model::{Contract, TileFilter};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::{self, Write as _};

pub fn render_json(view: &RadarView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    vendor: &'a str,
    contract: &'a str,
    region: &'a str,
    renewal_date: String,
    days_remaining: i64,
    value: &'a str,
    value_millions: f64,
    commercial_risk: &'a str,
    compliance_risk: &'a str,
    overall_risk: &'a str,
    risk_reason: &'a str,
}

/// One CSV record per visible row, in table order.
pub fn render_csv(view: &RadarView) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for contract in &view.rows {
        writer.serialize(CsvRow {
            id: &contract.id,
            vendor: &contract.vendor_name,
            contract: &contract.contract_name,
            region: contract.region.as_str(),
            renewal_date: contract.renewal_date.to_string(),
            days_remaining: contract.days_remaining,
            value: &contract.value,
            value_millions: value_contribution(&contract.value),
            commercial_risk: contract.commercial_risk.as_str(),
            compliance_risk: contract.compliance_risk.as_str(),
            overall_risk: contract.overall_risk().as_str(),
            risk_reason: &contract.risk_reason,
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::RadarError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_table(view: &RadarView) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_table(&mut out, view);
    out
}

fn write_table(out: &mut String, view: &RadarView) -> fmt::Result {
    let filter = &view.filter;

    writeln!(
        out,
        "Renewal Risk Radar | next {} days | {}",
        filter.days_horizon, filter.region
    )?;
    if filter.tile != TileFilter::All {
        writeln!(out, "Showing: {}", filter.tile.label())?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:<6} {:<22} {:<32} {:<6} {:<12} {:>6} {:<8} {:<7} {:<7}",
        "ID", "VENDOR", "CONTRACT", "REGION", "RENEWAL", "DAYS", "VALUE", "COMM", "COMP"
    )?;
    if view.rows.is_empty() {
        writeln!(
            out,
            "No contracts found. Try adjusting your time window, region, or clear the tile."
        )?;
    }
    for c in &view.rows {
        writeln!(
            out,
            "{:<6} {:<22} {:<32} {:<6} {:<12} {:>6} {:<8} {:<7} {:<7}",
            c.id,
            truncate(&c.vendor_name, 22),
            truncate(&c.contract_name, 32),
            c.region.as_str(),
            c.renewal_date.to_string(),
            c.days_remaining,
            c.value,
            c.commercial_risk.as_str(),
            c.compliance_risk.as_str()
        )?;
    }

    writeln!(
        out,
        "\nViewing {} of {} renewals",
        view.visible_count, view.context_count
    )?;

    let metrics = &view.metrics;
    writeln!(out, "\nThis quarter at a glance")?;
    writeln!(out, "  {:>6}  High Risk Renewals", metrics.high_risk_count)?;
    writeln!(out, "  {:>6}  Total Spend at Risk", metrics.formatted_total_spend)?;
    writeln!(out, "  {:>6}  Non-compliant DPAs", metrics.dpa_issue_count)?;
    if !metrics.malformed_values.is_empty() {
        writeln!(
            out,
            "  (value unreadable, counted as zero: {})",
            metrics.malformed_values.join(", ")
        )?;
    }

    writeln!(out, "\nRenewal risk distribution")?;
    for slice in &view.distribution {
        writeln!(out, "  {:<7} {:>3}", slice.level.as_str(), slice.count)?;
    }

    Ok(())
}

pub fn render_detail(contract: &Contract, insights: &ContractInsights) -> String {
    let mut out = String::new();
    let _ = write_detail(&mut out, contract, insights);
    out
}

fn write_detail(out: &mut String, contract: &Contract, insights: &ContractInsights) -> fmt::Result {
    writeln!(out, "{} ({})", contract.contract_name, contract.id.to_uppercase())?;
    writeln!(out, "Vendor: {}", contract.vendor_name)?;
    writeln!(out, "Annual contract value: {}", contract.value)?;
    writeln!(
        out,
        "{} | notice by {} | commercial risk {} | compliance risk {}{}",
        contract.renewal_type,
        contract.notice_period,
        contract.commercial_risk,
        contract.compliance_risk,
        if insights.underperforming {
            " | Underperforming Vendor"
        } else {
            ""
        }
    )?;
    writeln!(out)?;
    writeln!(out, "Current term:    {}", contract.term)?;
    writeln!(
        out,
        "Renewal date:    {} (in {} days, {:?})",
        contract.renewal_date, contract.days_remaining, insights.urgency
    )?;
    match insights.notice_deadline {
        Some(deadline) => writeln!(out, "Notice deadline: {}", deadline)?,
        None => writeln!(out, "Notice deadline: n/a")?,
    }
    writeln!(out, "Price uplift:    {}", contract.uplift)?;
    writeln!(out, "SLA breaches:    {}", contract.sla_breaches)?;
    writeln!(out, "\nRisk details: {}", contract.risk_reason)?;

    writeln!(out, "\nRenewal copilot")?;
    for message in &insights.messages {
        writeln!(out, "  > {}", message.to_string().replace('\n', "\n    "))?;
    }

    writeln!(out, "\nRecommended strategy")?;
    for action in &insights.actions {
        writeln!(out, "  - {}: {}", action.title, action.detail)?;
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
