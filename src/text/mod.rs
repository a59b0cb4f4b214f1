pub mod split;
pub mod wrap;
