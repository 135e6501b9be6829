//! Per-device UI preferences.
//!
//! The only preference today is the landing view after sign-in. Unknown or
//! unreadable values fall back to the calendar.

use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::warn;

pub const HOME_PAGE_KEY: &str = "focus-home-page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HomePage {
    #[default]
    Calendar,
    Assignments,
    Notebook,
    WeeklyRecap,
    Settings,
}

impl HomePage {
    pub const ALL: [HomePage; 5] = [
        Self::Calendar,
        Self::Assignments,
        Self::Notebook,
        Self::WeeklyRecap,
        Self::Settings,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Self::Calendar => "/app",
            Self::Assignments => "/app/todo",
            Self::Notebook => "/app/notebook",
            Self::WeeklyRecap => "/app/recap",
            Self::Settings => "/app/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Assignments => "Assignments",
            Self::Notebook => "Notebook",
            Self::WeeklyRecap => "Weekly Recap",
            Self::Settings => "Settings",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.route() == route)
    }
}

/// Stored home page, or [`HomePage::Calendar`] when nothing valid is stored.
pub fn load_home_page(storage: &impl KeyValueStore) -> HomePage {
    match storage.get(HOME_PAGE_KEY) {
        Ok(Some(route)) => HomePage::from_route(&route).unwrap_or_else(|| {
            warn!("event=pref_load module=preferences status=degraded reason=unknown_route");
            HomePage::default()
        }),
        Ok(None) => HomePage::default(),
        Err(err) => {
            warn!(
                "event=pref_load module=preferences status=degraded reason=read_failed error={}",
                err
            );
            HomePage::default()
        }
    }
}

pub fn save_home_page(storage: &impl KeyValueStore, page: HomePage) -> RepoResult<()> {
    storage.set(HOME_PAGE_KEY, page.route())
}
