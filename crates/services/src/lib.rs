//! # Services
//!
//! Studio-level operations built on top of the fan-out dispatcher:
//! stream lifecycle, analytics collection, content moderation, highlight
//! reel generation, and the command router behind the abstract command
//! source.
//!
//! Each service holds a shared coordinator and translates one studio
//! intent into one or more dispatched operations.

mod analytics;
mod command;
mod highlight;
mod moderation;
mod stream;

pub use analytics::{AnalyticsOverview, AnalyticsService};
pub use command::{CommandRouter, StudioCommand};
pub use highlight::{identify_key_moments, HighlightReel, HighlightService, StreamEvent};
pub use moderation::{ModerationAction, ModerationEvent, ModerationService, ModerationSummary};
pub use stream::StreamService;
