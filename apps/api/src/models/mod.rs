pub mod channel;
pub mod idea;
pub mod trend;
pub mod video;

pub use channel::{ChannelMetrics, SentimentSnapshot};
pub use idea::{AssetSuggestion, AssetType, VideoIdea};
pub use trend::TrendResult;
pub use video::{DropOffMoment, VideoAnalytics, VideoItem, VideoPatch, VideoStatus};
