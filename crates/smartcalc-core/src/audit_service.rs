//! Declared-versus-apparent discrepancy ratio.

use smartcalc_domain::{
    amount_or_zero, AuditInput, AuditRecord, AuditResult, AuditThresholds, AuditTier, Owner,
};
use uuid::Uuid;

use crate::time::Clock;

/// Added to declared capacity so the ratio is always finite.
pub const AUDIT_EPSILON: f64 = 1e-9;

/// Sums amounts, saturating at `f64::MAX` instead of overflowing to infinity.
fn saturating_total(amounts: &[f64]) -> f64 {
    amounts
        .iter()
        .map(|amount| amount_or_zero(Some(*amount)))
        .sum::<f64>()
        .min(f64::MAX)
}

pub struct AuditService;

impl AuditService {
    pub fn audit(input: &AuditInput, thresholds: &AuditThresholds) -> AuditResult {
        let declared_capacity =
            saturating_total(&[input.declared_income, input.declared_assets, AUDIT_EPSILON]);
        let apparent_total = saturating_total(&[
            input.estimated_assets,
            input.known_contracts,
            input.claimed_spend,
        ]);
        // Capacity is at least epsilon, so only overflow can leave the finite range.
        let ratio = (apparent_total / declared_capacity).min(f64::MAX);
        let tier = AuditTier::classify(ratio, thresholds);

        AuditResult {
            declared_capacity,
            apparent_total,
            ratio,
            tier,
            explained_amount: apparent_total.min(declared_capacity),
            unexplained_amount: (apparent_total - declared_capacity).max(0.0),
        }
    }

    /// Audits `input` and wraps the result for the session audit ledger.
    pub fn record(
        clock: &dyn Clock,
        subject: impl Into<String>,
        owner: Owner,
        input: AuditInput,
        thresholds: &AuditThresholds,
    ) -> AuditRecord {
        let subject = subject.into();
        let result = Self::audit(&input, thresholds);
        tracing::info!(
            subject = %subject,
            ratio = result.ratio,
            tier = %result.tier,
            "audit computed"
        );
        AuditRecord {
            id: Uuid::new_v4(),
            timestamp: clock.now(),
            subject,
            owner,
            input,
            result,
        }
    }
}
