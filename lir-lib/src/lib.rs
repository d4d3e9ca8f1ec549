pub mod analysis;
pub mod ir;
pub mod parser;
