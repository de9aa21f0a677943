use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of the progressive INSS contribution table.
///
/// The withholding algorithm walks these cumulatively: each bracket
/// contributes `rate` applied to the slice of pay falling between
/// `min_pay` and `max_pay`. The table is bounded above by the
/// contribution ceiling, so every bracket carries a concrete upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssBracket {
    pub min_pay: Decimal,
    pub max_pay: Decimal,
    pub rate: Decimal,
}

/// One tier of the IRRF income-tax table.
///
/// Unlike INSS, IRRF applies a single matching tier to the whole taxable
/// base: `base * rate - deduction`. `max_base` is `None` for the
/// open-ended top tier. The lowest tier is modeled with rate and
/// deduction both zero, which yields exactly zero tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfBracket {
    pub max_base: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}
