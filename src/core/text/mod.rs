pub mod accumulator;
pub mod document;

pub use accumulator::TextAccumulator;
pub use document::DocumentWriter;
