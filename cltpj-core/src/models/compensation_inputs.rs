use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`CompensationInputs::validate`].
///
/// Calculation code never sees invalid inputs; validation runs at the
/// boundary, before any calculator is invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// A monetary field holds a negative amount.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount {
        field: &'static str,
        value: Decimal,
    },

    /// The contractor tax rate is outside [0, 1].
    #[error("contractor tax rate must be a fraction between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
}

/// The full set of user-supplied figures for one CLT vs PJ comparison.
///
/// All monetary amounts are monthly values in BRL. `contractor_tax_rate`
/// is a fraction (the presentation layer collects it as a 0–30 %
/// percentage and converts before constructing this struct).
///
/// Inputs are built fresh per invocation and discarded after the result
/// is rendered; nothing is cached between comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInputs {
    /// Gross CLT salary.
    pub gross_salary: Decimal,

    /// Monthly meal/food benefit paid by the employer.
    pub meal_benefit: Decimal,

    /// Monthly health-plan cost covered by the employer.
    pub health_plan: Decimal,

    /// Number of dependents for the IRRF deduction.
    pub dependents: u32,

    /// Monthly commute cost borne by the salaried worker.
    pub commute_cost: Decimal,

    /// Monthly accounting fee on the contractor side.
    pub accounting_fee: Decimal,

    /// Monthly private-pension contribution on the contractor side.
    pub pension_contribution: Decimal,

    /// Monthly commute cost on the contractor side.
    pub contractor_commute_cost: Decimal,

    /// Effective revenue-tax rate for the contractor entity, as a fraction.
    pub contractor_tax_rate: Decimal,
}

impl CompensationInputs {
    /// Checks every field against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the first offending field: any
    /// negative monetary amount, or a tax rate outside [0, 1].
    pub fn validate(&self) -> Result<(), InputError> {
        let monetary = [
            ("gross salary", self.gross_salary),
            ("meal benefit", self.meal_benefit),
            ("health plan", self.health_plan),
            ("commute cost", self.commute_cost),
            ("accounting fee", self.accounting_fee),
            ("pension contribution", self.pension_contribution),
            ("contractor commute cost", self.contractor_commute_cost),
        ];
        for (field, value) in monetary {
            if value < Decimal::ZERO {
                return Err(InputError::NegativeAmount { field, value });
            }
        }
        if self.contractor_tax_rate < Decimal::ZERO || self.contractor_tax_rate > Decimal::ONE {
            return Err(InputError::InvalidTaxRate(self.contractor_tax_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_inputs() -> CompensationInputs {
        CompensationInputs {
            gross_salary: dec!(10000.00),
            meal_benefit: dec!(1000.00),
            health_plan: dec!(200.00),
            dependents: 0,
            commute_cost: dec!(0.00),
            accounting_fee: dec!(250.00),
            pension_contribution: dec!(0.00),
            contractor_commute_cost: dec!(0.00),
            contractor_tax_rate: dec!(0.10),
        }
    }

    #[test]
    fn validate_accepts_valid_inputs() {
        let result = valid_inputs().validate();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn validate_accepts_all_zero_inputs() {
        let inputs = CompensationInputs {
            gross_salary: Decimal::ZERO,
            meal_benefit: Decimal::ZERO,
            health_plan: Decimal::ZERO,
            dependents: 0,
            commute_cost: Decimal::ZERO,
            accounting_fee: Decimal::ZERO,
            pension_contribution: Decimal::ZERO,
            contractor_commute_cost: Decimal::ZERO,
            contractor_tax_rate: Decimal::ZERO,
        };

        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_gross_salary() {
        let inputs = CompensationInputs {
            gross_salary: dec!(-1.00),
            ..valid_inputs()
        };

        let result = inputs.validate();

        assert_eq!(
            result,
            Err(InputError::NegativeAmount {
                field: "gross salary",
                value: dec!(-1.00),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_accounting_fee() {
        let inputs = CompensationInputs {
            accounting_fee: dec!(-250.00),
            ..valid_inputs()
        };

        let result = inputs.validate();

        assert_eq!(
            result,
            Err(InputError::NegativeAmount {
                field: "accounting fee",
                value: dec!(-250.00),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_tax_rate() {
        let inputs = CompensationInputs {
            contractor_tax_rate: dec!(-0.10),
            ..valid_inputs()
        };

        let result = inputs.validate();

        assert_eq!(result, Err(InputError::InvalidTaxRate(dec!(-0.10))));
    }

    #[test]
    fn validate_rejects_tax_rate_above_one() {
        let inputs = CompensationInputs {
            contractor_tax_rate: dec!(1.01),
            ..valid_inputs()
        };

        let result = inputs.validate();

        assert_eq!(result, Err(InputError::InvalidTaxRate(dec!(1.01))));
    }

    #[test]
    fn validate_accepts_tax_rate_of_exactly_one() {
        let inputs = CompensationInputs {
            contractor_tax_rate: Decimal::ONE,
            ..valid_inputs()
        };

        assert_eq!(inputs.validate(), Ok(()));
    }
}
