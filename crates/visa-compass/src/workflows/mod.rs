pub mod calculator;
pub mod leads;
