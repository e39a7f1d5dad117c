//! Strive core: kroppsnivåer per muskelgruppe, treningsøkter og ledertavler.

pub mod app;
pub mod body;
pub mod bridge;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod level;
pub mod metrics;
pub mod models;
pub mod remote;
pub mod session;
pub mod storage;

#[cfg(feature = "python")]
pub mod py;

pub use app::App;
pub use body::{shared, total_weight, BodyLevel, BodyObserver, BodyStore, SharedStore};
pub use config::{load_config, save_config, AppConfig};
pub use error::{Result, StriveError};
pub use level::{badge_text_color, compute_level, progress_to_next, tier_color, Color, LEVEL_THRESHOLDS};
pub use metrics::Metrics;
pub use models::{BodyState, ExerciseEntry, MuscleGroup, Tier, WorkoutSession};
pub use remote::{HttpRemote, OfflineRemote, RemoteClient, RemoteStatus};
pub use session::{summary_by_group, total_load, CommitOutcome, NewEntry, SessionRecorder};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
