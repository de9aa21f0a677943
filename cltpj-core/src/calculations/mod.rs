//! CLT vs PJ compensation calculators.
//!
//! Each module implements one step of the comparison: progressive INSS
//! withholding, IRRF income tax, the employer cost accrual model, and the
//! PJ break-even solver. [`comparison`] chains them into the full
//! comparison the presentation layer consumes.

pub mod common;
pub mod comparison;
pub mod contractor;
pub mod employer;
pub mod inss;
pub mod irrf;

pub use comparison::{Comparison, ComparisonError, ComparisonResult};
pub use contractor::{ContractorRegime, ContractorSolution, ContractorSolver, net_income};
pub use employer::{EmployerCost, monthly_cost, net_with_benefits};
pub use inss::{InssCalculator, InssError};
pub use irrf::{IrrfCalculator, IrrfError};
