pub mod driver;
pub mod error;
pub mod ir;
pub mod parser;
pub mod report;
pub mod span;
pub mod token;

pub use error::CompileError;
