//! CSV loaders for yearly tax-table snapshots.
//!
//! The published figures change every year; loading them from data files
//! lets a new tax year swap in without touching the calculators. A
//! snapshot is split across three CSV files, each carrying a `tax_year`
//! column that must agree across the whole set:
//!
//! - INSS brackets: `tax_year,min_pay,max_pay,rate`
//! - IRRF brackets: `tax_year,max_base,rate,deduction` (`max_base`
//!   empty for the unbounded top tier)
//! - Parameters: `tax_year,name,value`, one row per fixed figure
//!
//! The loaded set is rejected unless it passes the same structural
//! validation as the built-in snapshot.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use cltpj_core::{InssBracket, IrrfBracket, TableError, TaxTables};

/// The fixed figures the parameters file must supply, one row each.
const REQUIRED_PARAMETERS: [&str; 6] = [
    "inss_cap",
    "dependent_deduction",
    "severance_fund_rate",
    "simples_monthly_limit",
    "reduction_factor",
    "micro_revenue_threshold",
];

/// Errors that can occur when loading a tax-table snapshot.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no rows found in any input file")]
    EmptyInput,

    #[error("row for tax year {found} in a file set for tax year {expected}")]
    InconsistentTaxYear { expected: i32, found: i32 },

    #[error("required parameter '{0}' is missing")]
    MissingParameter(&'static str),

    #[error("parameter '{0}' appears more than once")]
    DuplicateParameter(String),

    #[error("invalid table: {0}")]
    InvalidTable(#[from] TableError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct InssRecord {
    tax_year: i32,
    min_pay: Decimal,
    max_pay: Decimal,
    rate: Decimal,
}

#[derive(Debug, Deserialize)]
struct IrrfRecord {
    tax_year: i32,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    max_base: Option<Decimal>,
    rate: Decimal,
    deduction: Decimal,
}

#[derive(Debug, Deserialize)]
struct ParameterRecord {
    tax_year: i32,
    name: String,
    value: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Tracks the single tax year a file set is allowed to carry.
#[derive(Default)]
struct YearCheck(Option<i32>);

impl YearCheck {
    fn accept(
        &mut self,
        year: i32,
    ) -> Result<(), LoaderError> {
        match self.0 {
            None => {
                self.0 = Some(year);
                Ok(())
            }
            Some(expected) if expected == year => Ok(()),
            Some(expected) => Err(LoaderError::InconsistentTaxYear {
                expected,
                found: year,
            }),
        }
    }
}

/// Loads a [`TaxTables`] snapshot from CSV sources.
pub struct TablesLoader;

impl TablesLoader {
    /// Reads the three CSV sources and assembles a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError`] on malformed CSV, mixed tax years,
    /// missing or duplicated parameters, or a table set that fails
    /// [`TaxTables::validate`].
    pub fn from_readers(
        inss: impl Read,
        irrf: impl Read,
        parameters: impl Read,
    ) -> Result<TaxTables, LoaderError> {
        let mut year = YearCheck::default();

        let mut inss_brackets = Vec::new();
        for record in csv::Reader::from_reader(inss).deserialize() {
            let record: InssRecord = record?;
            year.accept(record.tax_year)?;
            inss_brackets.push(InssBracket {
                min_pay: record.min_pay,
                max_pay: record.max_pay,
                rate: record.rate,
            });
        }

        let mut irrf_brackets = Vec::new();
        for record in csv::Reader::from_reader(irrf).deserialize() {
            let record: IrrfRecord = record?;
            year.accept(record.tax_year)?;
            irrf_brackets.push(IrrfBracket {
                max_base: record.max_base,
                rate: record.rate,
                deduction: record.deduction,
            });
        }

        let mut parameters_found: Vec<(String, Decimal)> = Vec::new();
        for record in csv::Reader::from_reader(parameters).deserialize() {
            let record: ParameterRecord = record?;
            year.accept(record.tax_year)?;
            if parameters_found.iter().any(|(name, _)| *name == record.name) {
                return Err(LoaderError::DuplicateParameter(record.name));
            }
            if !REQUIRED_PARAMETERS.contains(&record.name.as_str()) {
                warn!(name = %record.name, "unknown parameter ignored");
                continue;
            }
            parameters_found.push((record.name, record.value));
        }

        let tax_year = year.0.ok_or(LoaderError::EmptyInput)?;
        let parameter = |name: &'static str| -> Result<Decimal, LoaderError> {
            parameters_found
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| *v)
                .ok_or(LoaderError::MissingParameter(name))
        };

        // The ceiling is the top bracket's bound; validate() rejects an
        // empty INSS table before the value matters.
        let inss_ceiling = inss_brackets
            .last()
            .map(|b| b.max_pay)
            .unwrap_or(Decimal::ZERO);

        let tables = TaxTables {
            tax_year,
            inss_brackets,
            inss_ceiling,
            inss_cap: parameter("inss_cap")?,
            irrf_brackets,
            dependent_deduction: parameter("dependent_deduction")?,
            severance_fund_rate: parameter("severance_fund_rate")?,
            simples_monthly_limit: parameter("simples_monthly_limit")?,
            reduction_factor: parameter("reduction_factor")?,
            micro_revenue_threshold: parameter("micro_revenue_threshold")?,
        };
        tables.validate()?;
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const INSS_CSV: &str = "\
tax_year,min_pay,max_pay,rate
2025,0.00,1518.00,0.075
2025,1518.00,2793.88,0.09
2025,2793.88,4190.83,0.12
2025,4190.83,8157.41,0.14
";

    const IRRF_CSV: &str = "\
tax_year,max_base,rate,deduction
2025,2259.20,0.00,0.00
2025,2826.65,0.075,169.44
2025,3751.05,0.15,381.44
2025,4664.68,0.225,662.77
2025,,0.275,896.00
";

    const PARAMS_CSV: &str = "\
tax_year,name,value
2025,inss_cap,951.62
2025,dependent_deduction,189.59
2025,severance_fund_rate,0.08
2025,simples_monthly_limit,30000.00
2025,reduction_factor,0.65
2025,micro_revenue_threshold,6750.00
";

    #[test]
    fn loads_a_complete_snapshot() {
        let tables = TablesLoader::from_readers(
            INSS_CSV.as_bytes(),
            IRRF_CSV.as_bytes(),
            PARAMS_CSV.as_bytes(),
        )
        .unwrap();

        assert_eq!(tables, TaxTables::brazil_2025());
    }

    #[test]
    fn empty_max_base_becomes_the_unbounded_tier() {
        let tables = TablesLoader::from_readers(
            INSS_CSV.as_bytes(),
            IRRF_CSV.as_bytes(),
            PARAMS_CSV.as_bytes(),
        )
        .unwrap();

        assert_eq!(tables.irrf_brackets.last().unwrap().max_base, None);
        assert_eq!(tables.irrf_brackets.last().unwrap().rate, dec!(0.275));
    }

    #[test]
    fn rejects_mixed_tax_years() {
        let mixed = INSS_CSV.replace("2025,4190.83", "2026,4190.83");

        let result = TablesLoader::from_readers(
            mixed.as_bytes(),
            IRRF_CSV.as_bytes(),
            PARAMS_CSV.as_bytes(),
        );

        assert!(matches!(
            result,
            Err(LoaderError::InconsistentTaxYear {
                expected: 2025,
                found: 2026,
            })
        ));
    }

    #[test]
    fn rejects_missing_parameter() {
        let params = PARAMS_CSV.replace("2025,inss_cap,951.62\n", "");

        let result = TablesLoader::from_readers(
            INSS_CSV.as_bytes(),
            IRRF_CSV.as_bytes(),
            params.as_bytes(),
        );

        assert!(matches!(
            result,
            Err(LoaderError::MissingParameter("inss_cap"))
        ));
    }

    #[test]
    fn rejects_duplicate_parameter() {
        let params = format!("{PARAMS_CSV}2025,inss_cap,900.00\n");

        let result = TablesLoader::from_readers(
            INSS_CSV.as_bytes(),
            IRRF_CSV.as_bytes(),
            params.as_bytes(),
        );

        assert!(matches!(
            result,
            Err(LoaderError::DuplicateParameter(name)) if name == "inss_cap"
        ));
    }

    #[test]
    fn ignores_unknown_parameters() {
        let params = format!("{PARAMS_CSV}2025,some_future_figure,1.00\n");

        let tables = TablesLoader::from_readers(
            INSS_CSV.as_bytes(),
            IRRF_CSV.as_bytes(),
            params.as_bytes(),
        )
        .unwrap();

        assert_eq!(tables, TaxTables::brazil_2025());
    }

    #[test]
    fn rejects_gapped_inss_brackets() {
        let gapped = INSS_CSV.replace("2025,1518.00,", "2025,1600.00,");

        let result = TablesLoader::from_readers(
            gapped.as_bytes(),
            IRRF_CSV.as_bytes(),
            PARAMS_CSV.as_bytes(),
        );

        assert!(matches!(
            result,
            Err(LoaderError::InvalidTable(TableError::InssNotContiguous { .. }))
        ));
    }

    #[test]
    fn rejects_unparseable_csv() {
        let result = TablesLoader::from_readers(
            "tax_year,min_pay,max_pay,rate\n2025,abc,1518.00,0.075\n".as_bytes(),
            IRRF_CSV.as_bytes(),
            PARAMS_CSV.as_bytes(),
        );

        assert!(matches!(result, Err(LoaderError::CsvParse(_))));
    }

    #[test]
    fn rejects_fully_empty_input() {
        let result = TablesLoader::from_readers(
            "tax_year,min_pay,max_pay,rate\n".as_bytes(),
            "tax_year,max_base,rate,deduction\n".as_bytes(),
            "tax_year,name,value\n".as_bytes(),
        );

        assert!(matches!(result, Err(LoaderError::EmptyInput)));
    }
}
