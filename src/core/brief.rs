//! Negotiation brief generation with an offline fallback.
//!
//! One live call at most per brief, never retried. Every path ends in a
//! string; failures are logged and replaced by the offline template.

use crate::domain::model::Contract;
use crate::domain::ports::TextGenerator;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Returned when the service succeeds but produces no text.
pub const EMPTY_RESPONSE_SENTINEL: &str = "Error generating content.";

pub struct BriefGenerator<G: TextGenerator> {
    generator: G,
    model: String,
}

impl<G: TextGenerator> BriefGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self::with_model(generator, DEFAULT_MODEL)
    }

    pub fn with_model(generator: G, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the brief for `contract`.
    ///
    /// An empty `credential` selects the mock brief without touching the
    /// generator.
    pub async fn generate_brief(&self, contract: &Contract, credential: &str) -> String {
        let credential = credential.trim();
        if credential.is_empty() {
            tracing::info!(
                "No API key configured, using mock brief for contract {}",
                contract.id
            );
            return mock_brief(contract);
        }

        let prompt = build_prompt(contract);
        tracing::debug!(
            "Requesting brief for contract {} from model {}",
            contract.id,
            self.model
        );

        match self.generator.generate(credential, &self.model, &prompt).await {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!(
                    "Generation service returned no text for contract {}",
                    contract.id
                );
                EMPTY_RESPONSE_SENTINEL.to_string()
            }
            Err(e) => {
                tracing::warn!(
                    "Brief generation failed for contract {}, falling back to offline brief: {}",
                    contract.id,
                    e
                );
                offline_brief(contract)
            }
        }
    }

    /// Like [`generate_brief`](Self::generate_brief), but yields `None` once
    /// `token` is cancelled so a stale result is never applied.
    pub async fn generate_brief_cancellable(
        &self,
        contract: &Contract,
        credential: &str,
        token: &CancellationToken,
    ) -> Option<String> {
        let brief = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            brief = self.generate_brief(contract, credential) => Some(brief),
        };

        if token.is_cancelled() {
            tracing::debug!("Discarding brief for contract {} after cancellation", contract.id);
            return None;
        }
        brief
    }
}

pub fn build_prompt(contract: &Contract) -> String {
    format!(
        "You are an expert legal and procurement copilot.\n\
         Draft a professional \"Negotiation Strategy Brief\" for the following contract renewal.\n\
         Use Markdown formatting.\n\
         \n\
         Context:\n\
         - Vendor: {vendor}\n\
         - Contract: {contract_name}\n\
         - Value: {value}\n\
         - Renewal Date: {renewal_date} ({days} days remaining)\n\
         - Term: {term}\n\
         - Uplift Clause: {uplift}\n\
         - SLA Breaches: {breaches}\n\
         - Risk Reason: {reason}\n\
         \n\
         Structure:\n\
         1. Executive Summary\n\
         2. Key Issues & Leverage Points (Highlight the risk reason and SLA breaches)\n\
         3. Proposed Ask (Suggest specific remedies for the uplift and risks)\n\
         4. BATNA",
        vendor = contract.vendor_name,
        contract_name = contract.contract_name,
        value = contract.value,
        renewal_date = contract.renewal_date,
        days = contract.days_remaining,
        term = contract.term,
        uplift = contract.uplift,
        breaches = contract.sla_breaches,
        reason = contract.risk_reason,
    )
}

/// The full brief used when no service is configured.
pub fn mock_brief(contract: &Contract) -> String {
    format!(
        "## **Negotiation Strategy Brief**\n\
         \n\
         **Subject:** Renewal Negotiation - {contract_name}\n\
         **Vendor:** {vendor}\n\
         **Current Annual Value:** {value}\n\
         **Renewal Date:** {renewal_date}\n\
         \n\
         ### **Executive Summary**\n\
         The current agreement with {vendor} is set to auto-renew in {days} days. \
         Based on performance data and market benchmarks, the current terms expose the organization \
         to unnecessary commercial and compliance risks. Specifically, the automatic {uplift} price \
         uplift and {breaches} recorded SLA breaches warrant a renegotiation.\n\
         \n\
         ### **Key Issues & Leverage Points**\n\
         1.  **Commercial Risk:** The contract includes a mandatory {uplift} uplift. Market analysis \
         suggests a flat renewal or max 2% CPI cap is achievable given our increased volume.\n\
         2.  **Performance Issues:** Vendor has breached critical uptime SLAs {breaches} times in the \
         last term. This should be used as leverage to waive the price uplift.\n\
         3.  **Compliance Gaps:** Current DPA terms are outdated and do not reflect our 2025 data \
         policy standards.\n\
         \n\
         ### **Proposed Ask**\n\
         *   **Pricing:** Waive the {uplift} uplift; lock in current rates for 24 months.\n\
         *   **Terms:** Remove auto-renewal clause in favor of mutual option to renew.\n\
         *   **SLA Credits:** Retroactive service credits for past breaches (approx. value $15k).\n\
         *   **Compliance:** Sign updated DPA addendum.\n\
         \n\
         ### **BATNA (Best Alternative to Negotiated Agreement)**\n\
         If the vendor refuses to engage, we are prepared to issue a Notice of Non-Renewal \
         (required {notice} prior) and issue an RFP to alternate vendors identified in the category \
         strategy.",
        contract_name = contract.contract_name,
        vendor = contract.vendor_name,
        value = contract.value,
        renewal_date = contract.renewal_date,
        days = contract.days_remaining,
        uplift = contract.uplift,
        breaches = contract.sla_breaches,
        notice = contract.notice_period,
    )
}

/// The abbreviated brief used when a live call fails.
pub fn offline_brief(contract: &Contract) -> String {
    format!(
        "## **Negotiation Strategy Brief (Offline Mode)**\n\
         \n\
         **Subject:** Renewal Negotiation - {contract_name}\n\
         **Vendor:** {vendor}\n\
         \n\
         ### **Executive Summary**\n\
         The current agreement is set to auto-renew in {days} days. \
         Note: Live AI generation failed, showing cached strategy.\n\
         \n\
         ### **Key Issues**\n\
         1.  **Commercial Risk:** {uplift} uplift is above market.\n\
         2.  **Performance:** {breaches} SLA breaches recorded.\n\
         \n\
         ### **Proposed Ask**\n\
         *   Waive uplift.\n\
         *   Remove auto-renewal.",
        contract_name = contract.contract_name,
        vendor = contract.vendor_name,
        days = contract.days_remaining,
        uplift = contract.uplift,
        breaches = contract.sla_breaches,
    )
}
