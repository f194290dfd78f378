pub mod error;
pub mod ocr;
pub mod pipeline;
pub mod text;
pub mod video;
