//! Session statistics.

use std::time::Duration;

use observability::DispatchMetricsAggregator;

/// Statistics from one streaming session
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Total session duration
    pub duration: Duration,

    /// Commands handled from the command source
    pub commands_handled: u64,

    /// Platforms the session dispatched to
    pub platforms: usize,

    /// Moderation enforcements (blocks and timeouts) observed
    pub enforcements: u64,

    /// Key moments collected into highlight reels
    pub key_moments: u64,

    /// Dispatch metrics aggregated over the session
    pub dispatch_metrics: DispatchMetricsAggregator,
}

impl SessionStats {
    /// Dispatches per minute over the session
    pub fn dispatch_rate(&self) -> f64 {
        let minutes = self.duration.as_secs_f64() / 60.0;
        if minutes > 0.0 {
            self.dispatch_metrics.total_dispatches as f64 / minutes
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Session Statistics                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Platforms: {}", self.platforms);
        println!("   ├─ Commands handled: {}", self.commands_handled);
        println!("   ├─ Moderation enforcements: {}", self.enforcements);
        println!("   ├─ Highlight moments: {}", self.key_moments);
        println!("   └─ Dispatch rate: {:.2}/min", self.dispatch_rate());

        println!();
        println!("{}", self.dispatch_metrics.summary());
    }
}
