pub mod activity;
pub mod carousel;
pub mod config;
pub mod easing;
pub mod error;
pub mod feed;
pub mod kiosk;
pub mod pagination;
pub mod storage;
pub mod surface;
pub mod timer;

pub use activity::{ActivityMonitor, Feedback, FeedbackIcon, FeedbackSink};
pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use kiosk::{Kiosk, KioskEvent};
pub use surface::{DisplaySurface, Surfaces};
pub use timer::{ScrollChannel, TimerQueue};
