//! Progressive INSS contribution withholding.
//!
//! The contribution is a cumulative bracket walk: each tier's rate
//! applies only to the slice of pay falling inside that tier. Two
//! independent bounds cap the result:
//!
//! 1. Pay is clamped to the contribution ceiling before the walk, so
//!    pay above the top bracket accrues nothing further.
//! 2. The accumulated contribution is capped at the published absolute
//!    maximum. The bracket arithmetic at the ceiling can land a fraction
//!    of a cent above the published cap, so the cap is enforced even
//!    after the clamp.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use cltpj_core::TaxTables;
//! use cltpj_core::calculations::InssCalculator;
//!
//! let tables = TaxTables::brazil_2025();
//! let inss = InssCalculator::new(&tables);
//!
//! assert_eq!(inss.withholding(dec!(1518.00)).unwrap(), dec!(113.85));
//! assert_eq!(inss.withholding(dec!(10000.00)).unwrap(), dec!(951.62));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::TaxTables;
use crate::calculations::common::{max, min, round_half_up};

/// Errors that can occur during INSS withholding calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InssError {
    /// Negative gross pay is a caller contract violation; inputs are
    /// validated before reaching the calculators.
    #[error("gross pay must be non-negative, got {0}")]
    NegativeGrossPay(Decimal),

    /// The contribution table has no brackets.
    #[error("no INSS brackets provided")]
    EmptyBracketTable,
}

/// Calculator for the progressive INSS contribution.
#[derive(Debug, Clone)]
pub struct InssCalculator<'a> {
    tables: &'a TaxTables,
}

impl<'a> InssCalculator<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Computes the monthly contribution withheld from `gross_pay`.
    ///
    /// # Errors
    ///
    /// Returns [`InssError`] for negative gross pay or an empty bracket
    /// table. Any non-negative pay over a validated table succeeds.
    pub fn withholding(
        &self,
        gross_pay: Decimal,
    ) -> Result<Decimal, InssError> {
        if gross_pay < Decimal::ZERO {
            return Err(InssError::NegativeGrossPay(gross_pay));
        }
        if self.tables.inss_brackets.is_empty() {
            return Err(InssError::EmptyBracketTable);
        }

        let clamped = min(gross_pay, self.tables.inss_ceiling);

        let mut contribution = Decimal::ZERO;
        for bracket in &self.tables.inss_brackets {
            let slice = max(
                min(clamped, bracket.max_pay) - bracket.min_pay,
                Decimal::ZERO,
            );
            contribution += slice * bracket.rate;
        }

        if contribution > self.tables.inss_cap {
            debug!(%gross_pay, %contribution, cap = %self.tables.inss_cap, "contribution capped");
            contribution = self.tables.inss_cap;
        }

        Ok(round_half_up(contribution))
    }
}
