use serde::{Deserialize, Serialize};

/// Structured expense data extracted from one receipt.
///
/// This is the shape every successful `/process-receipt/` response carries.
/// `paymentMethod` is the only nullable field; the validator guarantees the
/// rest are always present and type-correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Total amount of the expense, non-negative.
    pub amount: f64,
    /// Expense date, normalized to `YYYY-MM-DDTHH:MM:SS`.
    pub date: String,
    /// People the expense was shared with; almost always empty for receipts.
    pub companions: Vec<String>,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub payment_method: Option<String>,
}
