//! Picks the session record for a difficulty level.

use crate::catalog::SessionRecord;
use std::fmt;

/// Difficulty levels offered by the picker.
///
/// Catalog records carry free-form level strings; records whose level is not
/// one of these are simply never selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First record, in catalog order, whose level matches exactly.
pub fn select(catalog: &[SessionRecord], level: Level) -> Option<&SessionRecord> {
    catalog.iter().find(|record| record.level == level.as_str())
}

/// Selection made when the catalog arrives: falls back to the first record
/// when nothing matches `level`.
pub fn select_initial(catalog: &[SessionRecord], level: Level) -> Option<&SessionRecord> {
    select(catalog, level).or_else(|| catalog.first())
}

/// Selection made on a user-initiated level change: no match keeps `current`.
pub fn reselect<'a>(
    catalog: &'a [SessionRecord],
    level: Level,
    current: Option<&'a SessionRecord>,
) -> Option<&'a SessionRecord> {
    select(catalog, level).or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, level: &str, duration_secs: u32) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            title: format!("Song {}", id),
            level: level.to_string(),
            duration_secs,
            video_ref: String::new(),
            video_start_secs: 0,
        }
    }

    fn catalog() -> Vec<SessionRecord> {
        vec![
            record("e1", "Easy", 20),
            record("m1", "Medium", 30),
            record("m2", "Medium", 35),
            record("x1", "Expert", 90),
        ]
    }

    #[test]
    fn picks_first_match_in_order() {
        let catalog = catalog();
        assert_eq!(select(&catalog, Level::Medium).map(|r| r.id.as_str()), Some("m1"));
        assert_eq!(select(&catalog, Level::Easy).map(|r| r.id.as_str()), Some("e1"));
        assert!(select(&catalog, Level::Hard).is_none());
    }

    #[test]
    fn initial_falls_back_to_first_record() {
        let catalog = catalog();
        assert_eq!(
            select_initial(&catalog, Level::Hard).map(|r| r.id.as_str()),
            Some("e1")
        );
        assert!(select_initial(&[], Level::Medium).is_none());
    }

    #[test]
    fn user_change_without_match_keeps_current() {
        let catalog = catalog();
        let current = select(&catalog, Level::Easy);
        assert_eq!(
            reselect(&catalog, Level::Hard, current).map(|r| r.id.as_str()),
            Some("e1")
        );
        assert_eq!(
            reselect(&catalog, Level::Medium, current).map(|r| r.id.as_str()),
            Some("m1")
        );
    }

    #[test]
    fn labels_match_exactly() {
        let catalog = vec![record("lc", "medium", 30), record("m", "Medium", 40)];
        assert_eq!(select(&catalog, Level::Medium).map(|r| r.id.as_str()), Some("m"));
        assert_eq!(Level::Hard.to_string(), "Hard");
        assert_eq!(Level::default(), Level::Medium);
    }
}
