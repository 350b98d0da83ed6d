pub mod classifier;
pub mod engine;
pub mod windows;

pub use classifier::{Classifier, FixedClassifier, MockClassifier};
pub use engine::{apply_override, calculate_score};
pub use windows::window_start;
