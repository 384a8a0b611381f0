//! courtboard-core - Core library for courtboard
//!
//! Provides the team-logo cache, the document-store source, and the roster
//! and match logic behind the dashboard pages.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod logos;
pub mod models;
pub mod normalize;
pub mod roster;
pub mod source;

pub use cache::{LogoCache, LOGO_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CourtboardConfig;
pub use error::{CoreError, LoadReport};
pub use logos::{LogoResolver, LogoTracker, MatchLogos};
pub use normalize::normalize_team_name;
pub use roster::{MatchTile, PlayerProfile, WinStats};
pub use source::DocumentSource;
