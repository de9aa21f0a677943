//! IRRF income-tax withholding.
//!
//! Distinct algorithm shape from the INSS walk: IRRF finds the single
//! tier matching the whole taxable base and applies
//! `base * rate - deduction`. The fixed deduction makes the whole-base
//! formula equivalent to a marginal schedule, so there is no cumulative
//! walk here and the two must not be conflated.
//!
//! The taxable base is gross pay minus the INSS contribution minus a
//! fixed allowance per dependent. A base at or below the zero tier's
//! bound owes exactly nothing; the tier's rate and deduction are both
//! zero, so a base driven negative by dependent allowances also lands
//! on zero tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use cltpj_core::TaxTables;
//! use cltpj_core::calculations::IrrfCalculator;
//!
//! let tables = TaxTables::brazil_2025();
//! let irrf = IrrfCalculator::new(&tables);
//!
//! // base 9048.38, top tier: 9048.38 * 27.5% - 896.00
//! let tax = irrf.withholding(dec!(10000.00), dec!(951.62), 0).unwrap();
//! assert_eq!(tax, dec!(1592.30));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxTables;
use crate::calculations::common::round_half_up;

/// Errors that can occur during IRRF withholding calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IrrfError {
    /// Negative gross pay is a caller contract violation.
    #[error("gross pay must be non-negative, got {0}")]
    NegativeGrossPay(Decimal),

    /// The income-tax table has no brackets.
    #[error("no IRRF brackets provided")]
    EmptyBracketTable,

    /// No tier matched the taxable base. Cannot happen for a table that
    /// passed [`TaxTables::validate`]; kept so the lookup stays a total
    /// function.
    #[error("no IRRF bracket found for taxable base {0}")]
    NoMatchingBracket(Decimal),
}

/// Calculator for the IRRF withholding.
#[derive(Debug, Clone)]
pub struct IrrfCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> IrrfCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Computes the income tax withheld from `gross_pay`, given the INSS
    /// contribution already withheld and the number of dependents.
    ///
    /// # Errors
    ///
    /// Returns [`IrrfError`] for negative gross pay or a malformed table.
    pub fn withholding(
        &self,
        gross_pay: Decimal,
        inss: Decimal,
        dependents: u32,
    ) -> Result<Decimal, IrrfError> {
        if gross_pay < Decimal::ZERO {
            return Err(IrrfError::NegativeGrossPay(gross_pay));
        }
        if self.tables.irrf_brackets.is_empty() {
            return Err(IrrfError::EmptyBracketTable);
        }

        let base = gross_pay - inss - Decimal::from(dependents) * self.tables.dependent_deduction;

        let bracket = self
            .tables
            .irrf_brackets
            .iter()
            .find(|b| b.max_base.is_none_or(|bound| base <= bound))
            .ok_or(IrrfError::NoMatchingBracket(base))?;

        Ok(round_half_up(base * bracket.rate - bracket.deduction))
    }
}
