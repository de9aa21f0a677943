use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{InssBracket, IrrfBracket};

/// Errors raised by [`TaxTables::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The INSS contribution table has no brackets.
    #[error("INSS bracket table is empty")]
    EmptyInssTable,

    /// The IRRF income-tax table has no brackets.
    #[error("IRRF bracket table is empty")]
    EmptyIrrfTable,

    /// The first INSS bracket does not start at zero.
    #[error("INSS brackets must start at 0, got {0}")]
    InssGapAtZero(Decimal),

    /// Adjacent INSS brackets leave a gap or overlap.
    #[error("INSS bracket starting at {found} does not continue from {expected}")]
    InssNotContiguous { expected: Decimal, found: Decimal },

    /// An INSS bracket has an upper bound at or below its lower bound.
    #[error("INSS bracket [{min_pay}, {max_pay}] is empty or inverted")]
    InssInvertedBracket { min_pay: Decimal, max_pay: Decimal },

    /// The contribution ceiling disagrees with the top INSS bracket.
    #[error("contribution ceiling {ceiling} does not match top bracket bound {top_bound}")]
    CeilingMismatch { ceiling: Decimal, top_bound: Decimal },

    /// IRRF bracket bounds are not strictly ascending.
    #[error("IRRF bracket bound {0} is not above the previous bound")]
    IrrfNotAscending(Decimal),

    /// The final IRRF bracket has an upper bound; the table would not
    /// cover all incomes.
    #[error("final IRRF bracket must be unbounded")]
    IrrfBoundedTop,

    /// A rate is outside [0, 1].
    #[error("rate must be a fraction between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    /// A fixed monetary figure is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeFigure {
        field: &'static str,
        value: Decimal,
    },
}

/// A versioned snapshot of every published figure the calculators need.
///
/// The bracket tables and fixed amounts change yearly; everything lives
/// here so a new tax year swaps in as data without touching the walking
/// algorithms. [`TaxTables::brazil_2025`] carries the current snapshot,
/// and `cltpj-data` can load a replacement set from CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    pub tax_year: i32,

    /// Progressive INSS contribution brackets, ascending and contiguous
    /// from zero up to the contribution ceiling.
    pub inss_brackets: Vec<InssBracket>,

    /// Pay above this ceiling accrues no further contribution. Must
    /// equal the top bracket's upper bound.
    pub inss_ceiling: Decimal,

    /// Absolute cap on the monthly contribution. Held as a second,
    /// independent bound on top of the ceiling clamp.
    pub inss_cap: Decimal,

    /// IRRF brackets, ascending by `max_base` with an unbounded top tier.
    pub irrf_brackets: Vec<IrrfBracket>,

    /// IRRF taxable-base deduction per dependent.
    pub dependent_deduction: Decimal,

    /// FGTS deposit rate on gross salary.
    pub severance_fund_rate: Decimal,

    /// Monthly revenue limit of the Simples regime; at or above it the
    /// solver's standard branch applies.
    pub simples_monthly_limit: Decimal,

    /// Reduction factor applied to the tax rate in the reduced-regime
    /// denominator.
    pub reduction_factor: Decimal,

    /// Micro-enterprise revenue threshold added into the reduced-regime
    /// gross formula.
    pub micro_revenue_threshold: Decimal,
}

impl TaxTables {
    /// The 2025 published figures.
    pub fn brazil_2025() -> Self {
        Self {
            tax_year: 2025,
            inss_brackets: vec![
                InssBracket {
                    min_pay: dec!(0.00),
                    max_pay: dec!(1518.00),
                    rate: dec!(0.075),
                },
                InssBracket {
                    min_pay: dec!(1518.00),
                    max_pay: dec!(2793.88),
                    rate: dec!(0.09),
                },
                InssBracket {
                    min_pay: dec!(2793.88),
                    max_pay: dec!(4190.83),
                    rate: dec!(0.12),
                },
                InssBracket {
                    min_pay: dec!(4190.83),
                    max_pay: dec!(8157.41),
                    rate: dec!(0.14),
                },
            ],
            inss_ceiling: dec!(8157.41),
            inss_cap: dec!(951.62),
            irrf_brackets: vec![
                IrrfBracket {
                    max_base: Some(dec!(2259.20)),
                    rate: dec!(0.00),
                    deduction: dec!(0.00),
                },
                IrrfBracket {
                    max_base: Some(dec!(2826.65)),
                    rate: dec!(0.075),
                    deduction: dec!(169.44),
                },
                IrrfBracket {
                    max_base: Some(dec!(3751.05)),
                    rate: dec!(0.15),
                    deduction: dec!(381.44),
                },
                IrrfBracket {
                    max_base: Some(dec!(4664.68)),
                    rate: dec!(0.225),
                    deduction: dec!(662.77),
                },
                IrrfBracket {
                    max_base: None,
                    rate: dec!(0.275),
                    deduction: dec!(896.00),
                },
            ],
            dependent_deduction: dec!(189.59),
            severance_fund_rate: dec!(0.08),
            simples_monthly_limit: dec!(30000.00),
            reduction_factor: dec!(0.65),
            micro_revenue_threshold: dec!(6750.00),
        }
    }

    /// Checks the structural invariants of the snapshot.
    ///
    /// The INSS brackets must partition [0, ceiling] with no gaps or
    /// overlaps; the IRRF bounds must be strictly ascending and end in
    /// an unbounded tier; every rate must be a fraction and every fixed
    /// figure non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`TableError`] found, in table order.
    pub fn validate(&self) -> Result<(), TableError> {
        self.validate_inss()?;
        self.validate_irrf()?;
        self.validate_figures()
    }

    fn validate_inss(&self) -> Result<(), TableError> {
        let Some(first) = self.inss_brackets.first() else {
            return Err(TableError::EmptyInssTable);
        };
        if first.min_pay != Decimal::ZERO {
            return Err(TableError::InssGapAtZero(first.min_pay));
        }

        let mut expected = Decimal::ZERO;
        for bracket in &self.inss_brackets {
            if bracket.min_pay != expected {
                return Err(TableError::InssNotContiguous {
                    expected,
                    found: bracket.min_pay,
                });
            }
            if bracket.max_pay <= bracket.min_pay {
                return Err(TableError::InssInvertedBracket {
                    min_pay: bracket.min_pay,
                    max_pay: bracket.max_pay,
                });
            }
            check_rate(bracket.rate)?;
            expected = bracket.max_pay;
        }

        if self.inss_ceiling != expected {
            return Err(TableError::CeilingMismatch {
                ceiling: self.inss_ceiling,
                top_bound: expected,
            });
        }
        Ok(())
    }

    fn validate_irrf(&self) -> Result<(), TableError> {
        if self.irrf_brackets.is_empty() {
            return Err(TableError::EmptyIrrfTable);
        }

        let mut previous: Option<Decimal> = None;
        for (i, bracket) in self.irrf_brackets.iter().enumerate() {
            let last = i == self.irrf_brackets.len() - 1;
            match bracket.max_base {
                Some(bound) => {
                    if last {
                        return Err(TableError::IrrfBoundedTop);
                    }
                    if previous.is_some_and(|p| bound <= p) {
                        return Err(TableError::IrrfNotAscending(bound));
                    }
                    previous = Some(bound);
                }
                // An unbounded tier anywhere but last would shadow the
                // tiers after it.
                None if !last => return Err(TableError::IrrfBoundedTop),
                None => {}
            }
            check_rate(bracket.rate)?;
            if bracket.deduction < Decimal::ZERO {
                return Err(TableError::NegativeFigure {
                    field: "IRRF deduction",
                    value: bracket.deduction,
                });
            }
        }
        Ok(())
    }

    fn validate_figures(&self) -> Result<(), TableError> {
        check_rate(self.severance_fund_rate)?;
        check_rate(self.reduction_factor)?;
        let figures = [
            ("INSS cap", self.inss_cap),
            ("dependent deduction", self.dependent_deduction),
            ("Simples monthly limit", self.simples_monthly_limit),
            ("micro revenue threshold", self.micro_revenue_threshold),
        ];
        for (field, value) in figures {
            if value < Decimal::ZERO {
                return Err(TableError::NegativeFigure { field, value });
            }
        }
        Ok(())
    }
}

fn check_rate(rate: Decimal) -> Result<(), TableError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(TableError::InvalidRate(rate));
    }
    Ok(())
}
