//! Employer cost accrual model.
//!
//! A salaried worker costs the employer more than the monthly gross:
//! annual obligations accrue every month. The model amortizes them into
//! monthly shares:
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Thirteenth-salary share: gross / 12 |
//! | 2    | Vacation one-third bonus share: (gross / 3) / 12 |
//! | 3    | FGTS severance deposit: gross × deposit rate |
//! | 4    | Monthly burden: lines 1–3 plus meal and health benefits |
//! | 5    | Total monthly cost: gross + line 4 |
//!
//! The burden (line 4) is what the break-even solver charges against the
//! contractor's revenue; as a PJ the worker self-funds everything the
//! employer was paying on top of gross.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::TaxTables;
use crate::calculations::common::round_half_up;

/// The amortized monthly cost of a salaried worker, line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCost {
    /// Monthly share of the year-end thirteenth salary.
    pub thirteenth_salary_share: Decimal,

    /// Monthly share of the vacation one-third bonus.
    pub vacation_bonus_share: Decimal,

    /// Monthly FGTS deposit.
    pub severance_deposit: Decimal,

    /// Everything the employer pays beyond gross salary, benefits
    /// included.
    pub monthly_burden: Decimal,

    /// Gross salary plus the burden. Never below gross for non-negative
    /// inputs.
    pub total_monthly_cost: Decimal,
}

/// Computes the employer's amortized monthly cost of a salaried worker.
pub fn monthly_cost(
    tables: &TaxTables,
    gross_salary: Decimal,
    food_benefit: Decimal,
    health_benefit: Decimal,
) -> EmployerCost {
    let twelve = dec!(12);
    let thirteenth_salary_share = round_half_up(gross_salary / twelve);
    let vacation_bonus_share = round_half_up(gross_salary / dec!(3) / twelve);
    let severance_deposit = round_half_up(gross_salary * tables.severance_fund_rate);

    let monthly_burden = round_half_up(
        thirteenth_salary_share
            + vacation_bonus_share
            + severance_deposit
            + food_benefit
            + health_benefit,
    );

    EmployerCost {
        thirteenth_salary_share,
        vacation_bonus_share,
        severance_deposit,
        monthly_burden,
        total_monthly_cost: round_half_up(gross_salary + monthly_burden),
    }
}

/// The salaried worker's monthly net including benefits, the target the
/// break-even solver must reproduce on the contractor side.
pub fn net_with_benefits(
    gross_salary: Decimal,
    inss: Decimal,
    irrf: Decimal,
    food_benefit: Decimal,
    health_benefit: Decimal,
    commute_cost: Decimal,
) -> Decimal {
    round_half_up(gross_salary - inss - irrf + food_benefit + health_benefit - commute_cost)
}
