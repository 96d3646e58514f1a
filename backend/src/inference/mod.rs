pub mod classifier;
pub mod preprocess;
