// Post-publish analytics synthesis. There is no real analytics pipeline behind
// this: numbers are derived from the video's identity so they stay stable.

pub mod synthesizer;

pub use synthesizer::generate_analytics;
