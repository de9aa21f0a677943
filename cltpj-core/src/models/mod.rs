mod compensation_inputs;
mod tax_bracket;
mod tax_tables;

pub use compensation_inputs::{CompensationInputs, InputError};
pub use tax_bracket::{InssBracket, IrrfBracket};
pub use tax_tables::{TableError, TaxTables};
