pub mod error;
pub mod record;
pub mod traits;

pub use error::ReciboError;
pub use record::ExpenseRecord;
pub use traits::{OcrProvider, StructuringProvider};
