//! Log-scale net-worth comparison.

use smartcalc_domain::{amount_or_zero, NetWorthBounds, NetWorthResult, NetWorthStanding};

/// Guards against coinciding bounds.
pub const NET_WORTH_EPSILON: f64 = 1e-9;

pub struct NetWorthService;

impl NetWorthService {
    /// Sums assets and liabilities and places `|net|` between the bounds on a
    /// log10 scale. The sign of `net` does not affect the position.
    pub fn score(assets: &[f64], liabilities: &[f64], bounds: &NetWorthBounds) -> NetWorthResult {
        let assets = Self::total(assets);
        let liabilities = Self::total(liabilities);
        let net = assets - liabilities;
        let relative_position = Self::relative_position(net, bounds.lower, bounds.upper);
        let standing = NetWorthStanding::classify(net, bounds.building_threshold);

        tracing::debug!(net, relative_position, %standing, "scored net worth");

        NetWorthResult {
            assets,
            liabilities,
            net,
            relative_position,
            standing,
        }
    }

    /// Non-finite items count as zero; the sum saturates at `f64::MAX`, which
    /// keeps `net` finite.
    pub fn total(items: &[f64]) -> f64 {
        items
            .iter()
            .map(|item| amount_or_zero(Some(*item)))
            .sum::<f64>()
            .min(f64::MAX)
    }

    /// Position of `|net|` in `[0, 1]` between `lower` and `upper`.
    pub fn relative_position(net: f64, lower: f64, upper: f64) -> f64 {
        let v_log = (net.abs().max(0.0) + 1.0).log10();
        let lo_log = (lower.max(0.0) + 1.0).log10();
        let hi_log = (upper.max(1.0) + 1.0).log10();
        let position = (v_log - lo_log) / (hi_log - lo_log).max(NET_WORTH_EPSILON);
        if position.is_finite() {
            position.clamp(0.0, 1.0)
        } else if position == f64::INFINITY {
            1.0
        } else {
            0.0
        }
    }
}
