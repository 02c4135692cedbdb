use serde::Deserialize;

/// Pipeline behaviour switches, deserializable from whatever
/// configuration source the caller uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fall back to the working-timetable (scheduled) times when a call
    /// has neither public arrival nor public departure. Off by default:
    /// calls without public times stay unadvertised.
    pub use_scheduled_when_no_public: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            use_scheduled_when_no_public: false,
        }
    }
}
