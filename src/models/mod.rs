pub mod answer;
pub mod lead;
pub mod quiz;
pub mod result;
