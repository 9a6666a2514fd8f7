pub mod badge;
pub mod config;
pub mod identity;
pub mod report;
pub mod tip;

pub use badge::{BadgeCatalog, BadgeResolution, BadgeTier, CachedBadge, DEFAULT_CYCLE_SIZE};
pub use config::{ApiConfig, BadgeConfig, BadgeTierConfig, Config, LoggingConfig, StorageConfig};
pub use identity::{AuthToken, UserIdentity, UserProfile};
pub use report::{
    ContactNumber, GeoPoint, NewReport, Report, ReportOwner, ReportPhoto, ReportStatus,
};
pub use tip::{waste_tip, WasteTip, WASTE_TIPS};
