pub mod document;
pub mod node;
pub mod selector;
