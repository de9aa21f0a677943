//! Plain-text rendering of a comparison result.

use cltpj_core::calculations::{ComparisonResult, ContractorRegime};

use crate::format::brl;

/// Renders the side-by-side CLT vs PJ summary as display lines.
pub fn render(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str("CLT\n");
    out.push_str(&format!("  INSS withheld          {}\n", brl(result.inss)));
    out.push_str(&format!("  IRRF withheld          {}\n", brl(result.irrf)));
    out.push_str(&format!("  Net with benefits      {}\n", brl(result.clt_net)));
    out.push_str(&format!(
        "  Employer monthly cost  {}\n",
        brl(result.employer_cost.total_monthly_cost)
    ));

    out.push_str("PJ\n");
    match result.contractor.regime {
        ContractorRegime::Degenerate => {
            out.push_str("  No break-even billing exists for these parameters.\n");
        }
        regime => {
            out.push_str(&format!(
                "  Break-even billing     {}  ({} regime)\n",
                brl(result.contractor.gross),
                regime.as_str(),
            ));
            out.push_str(&format!(
                "  Revenue tax            {}\n",
                brl(result.contractor.tax)
            ));
            out.push_str(&format!(
                "  Monthly cost stack     {}\n",
                brl(result.contractor_cost_stack)
            ));
            out.push_str(&format!(
                "  Net income             {}\n",
                brl(result.contractor.net)
            ));
        }
    }

    out
}
