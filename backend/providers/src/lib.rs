//! `recibo-providers` — reqwest clients for the two upstream capabilities:
//! Google Cloud Vision OCR (image → text) and Gemini structuring
//! (text + prompt → expense JSON).

pub mod classify;
pub mod gemini;
pub mod prompt;
pub mod vision_ocr;

pub use gemini::GeminiStructurer;
pub use prompt::RECEIPT_PROMPT;
pub use vision_ocr::GoogleVisionOcr;
