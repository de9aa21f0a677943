//! Full CLT vs PJ comparison.
//!
//! Chains the calculators in the order the presentation layer drives
//! them: validate inputs, withhold INSS, withhold IRRF, derive the CLT
//! net-with-benefits target, accrue the employer cost, then solve for
//! the break-even contractor billing. The solver's cost stack is the
//! employer's monthly burden plus the contractor's own recurring costs
//! (accounting fee, private pension, commute): matching a CLT package as
//! a PJ means self-funding everything the employer was paying on top of
//! gross, and the contractor's own overhead besides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{CompensationInputs, InputError, TaxTables};
use crate::calculations::common::round_half_up;
use crate::calculations::contractor::{ContractorSolution, ContractorSolver};
use crate::calculations::employer::{self, EmployerCost};
use crate::calculations::inss::{InssCalculator, InssError};
use crate::calculations::irrf::{IrrfCalculator, IrrfError};

/// Errors that can occur while running the full comparison.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("invalid inputs: {0}")]
    InvalidInputs(#[from] InputError),

    #[error("INSS withholding failed: {0}")]
    Inss(#[from] InssError),

    #[error("IRRF withholding failed: {0}")]
    Irrf(#[from] IrrfError),
}

/// Every derived figure of one comparison. Purely a function of the
/// inputs and the tax-table snapshot; nothing is cached or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// INSS contribution withheld from the CLT salary.
    pub inss: Decimal,

    /// IRRF income tax withheld from the CLT salary.
    pub irrf: Decimal,

    /// CLT monthly net including benefits, net of commute.
    pub clt_net: Decimal,

    /// The employer's amortized monthly cost of the CLT package.
    pub employer_cost: EmployerCost,

    /// The monthly cost stack charged against the contractor's revenue.
    pub contractor_cost_stack: Decimal,

    /// The solved break-even contractor figures.
    pub contractor: ContractorSolution,
}

/// Orchestrator for the full comparison over one tax-year snapshot.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    tables: &'a TaxTables,
}

impl<'a> Comparison<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Runs the whole pipeline for one set of inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError`] if the inputs fail validation or a
    /// withholding table is malformed. Valid inputs over a validated
    /// table always succeed.
    pub fn calculate(
        &self,
        inputs: &CompensationInputs,
    ) -> Result<ComparisonResult, ComparisonError> {
        inputs.validate()?;

        let inss = InssCalculator::new(self.tables).withholding(inputs.gross_salary)?;
        let irrf = IrrfCalculator::new(self.tables).withholding(
            inputs.gross_salary,
            inss,
            inputs.dependents,
        )?;

        let clt_net = employer::net_with_benefits(
            inputs.gross_salary,
            inss,
            irrf,
            inputs.meal_benefit,
            inputs.health_plan,
            inputs.commute_cost,
        );

        let employer_cost = employer::monthly_cost(
            self.tables,
            inputs.gross_salary,
            inputs.meal_benefit,
            inputs.health_plan,
        );

        let contractor_cost_stack = round_half_up(
            employer_cost.monthly_burden
                + inputs.accounting_fee
                + inputs.pension_contribution
                + inputs.contractor_commute_cost,
        );

        debug!(%clt_net, %contractor_cost_stack, "solving break-even billing");
        let contractor = ContractorSolver::new(self.tables).solve(
            clt_net,
            contractor_cost_stack,
            inputs.contractor_tax_rate,
        );

        Ok(ComparisonResult {
            inss,
            irrf,
            clt_net,
            employer_cost,
            contractor_cost_stack,
            contractor,
        })
    }
}
