pub mod smooth;
pub mod trigger;
