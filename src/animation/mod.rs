pub mod ease;
pub mod flip;
pub mod stage;
pub mod timeline;
pub mod tween;
