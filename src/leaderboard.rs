// src/leaderboard.rs

//! Cursor pagination and ranking over profiles.
//!
//! Rows are ordered by `total_impact_score DESC, user_id ASC`. A cursor is the
//! `(score, user_id)` pair of a boundary row, so rows sharing a score are
//! neither skipped nor repeated across pages. A bare score cursor is still
//! accepted and compares on the score alone, which can skip tied rows.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppError,
    models::{
        persona::Persona,
        profile::{LeaderboardEntry, LeaderboardRow},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    First,
    Next,
    Prev,
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Direction::First),
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(AppError::BadRequest(format!(
                "Invalid direction '{}', expected first, next or prev",
                other
            ))),
        }
    }
}

/// Position of a boundary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub score: i64,
    /// Tiebreaker. `None` for a bare score cursor.
    pub user_id: Option<String>,
}

impl Cursor {
    pub fn of(row: &LeaderboardRow) -> Self {
        Self {
            score: row.total_impact_score,
            user_id: Some(row.user_id.clone()),
        }
    }

    /// True if `row` comes strictly after this cursor in leaderboard order.
    pub fn precedes(&self, row: &LeaderboardRow) -> bool {
        match &self.user_id {
            Some(id) => {
                row.total_impact_score < self.score
                    || (row.total_impact_score == self.score && row.user_id.as_str() > id.as_str())
            }
            None => row.total_impact_score < self.score,
        }
    }

    /// True if `row` comes strictly before this cursor in leaderboard order.
    pub fn follows(&self, row: &LeaderboardRow) -> bool {
        match &self.user_id {
            Some(id) => {
                row.total_impact_score > self.score
                    || (row.total_impact_score == self.score && row.user_id.as_str() < id.as_str())
            }
            None => row.total_impact_score > self.score,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user_id {
            Some(id) => write!(f, "{}:{}", self.score, id),
            None => write!(f, "{}", self.score),
        }
    }
}

impl FromStr for Cursor {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::BadRequest(format!("Invalid cursor '{}'", s));
        let (score, user_id) = match s.split_once(':') {
            Some((score, id)) if !id.is_empty() => (score, Some(id.to_string())),
            Some(_) => return Err(invalid()),
            None => (s, None),
        };
        let score = score.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { score, user_id })
    }
}

/// Leaderboard ordering: score descending, then user id ascending.
pub fn leaderboard_order(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.total_impact_score
        .cmp(&a.total_impact_score)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Rows eligible for a leaderboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaderboardFilter {
    pub persona: Option<Persona>,
}

impl LeaderboardFilter {
    /// Profiles with no points are never ranked.
    pub fn admits(&self, row: &LeaderboardRow) -> bool {
        row.total_impact_score > 0
            && self
                .persona
                .is_none_or(|p| row.persona.as_deref() == Some(p.as_str()))
    }
}

/// What the store should fetch for one page.
///
/// For `First` and `Next` rows come back in leaderboard order. For `Prev`
/// they come back in reverse order, nearest to the cursor first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub direction: Direction,
    pub cursor: Option<Cursor>,
    pub limit: i64,
}

/// Query parameters for the leaderboard.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub persona: Option<String>,
    /// Page the cursor was taken from. Defaults to 1.
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub direction: Option<String>,
    pub cursor: Option<String>,
}

/// A validated page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub filter: LeaderboardFilter,
    pub direction: Direction,
    pub cursor: Option<Cursor>,
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn from_params(params: &LeaderboardParams) -> Result<Self, AppError> {
        let persona = params
            .persona
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<Persona>().map_err(AppError::BadRequest))
            .transpose()?;

        let direction = params
            .direction
            .as_deref()
            .map(str::parse::<Direction>)
            .transpose()?
            .unwrap_or_default();

        let cursor = params
            .cursor
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::parse::<Cursor>)
            .transpose()?;

        if direction != Direction::First && cursor.is_none() {
            return Err(AppError::BadRequest(
                "A cursor is required for next and prev pages".to_string(),
            ));
        }

        let page_size = params
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = params.page.unwrap_or(1).max(1);
        // Ranks on the following page run up to (page + 1) * page_size.
        if page
            .checked_add(1)
            .and_then(|p| p.checked_mul(page_size))
            .is_none()
        {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }

        Ok(Self {
            filter: LeaderboardFilter { persona },
            direction,
            cursor: if direction == Direction::First { None } else { cursor },
            page,
            page_size,
        })
    }

    /// One extra row tells whether a further page exists.
    pub fn window(&self) -> Window {
        Window {
            direction: self.direction,
            cursor: self.cursor.clone(),
            limit: self.page_size + 1,
        }
    }

    /// Page number of the page being fetched.
    pub fn target_page(&self) -> i64 {
        match self.direction {
            Direction::First => 1,
            Direction::Next => self.page + 1,
            Direction::Prev => (self.page - 1).max(1),
        }
    }
}

/// Rank of the first row on `page`.
pub fn start_rank(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size + 1
}

/// Competition rank given the number of rows with a strictly greater score.
pub fn global_rank(strictly_higher: i64) -> i64 {
    strictly_higher + 1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub page: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

/// Builds a ranked page from the rows fetched for `request.window()`.
pub fn assemble_page(request: &PageRequest, mut rows: Vec<LeaderboardRow>) -> LeaderboardPage {
    let size = request.page_size as usize;
    let more = rows.len() > size;
    rows.truncate(size);

    let page = request.target_page();
    let (has_next, has_prev) = match request.direction {
        Direction::First => (more, false),
        Direction::Next => (more, true),
        Direction::Prev => {
            rows.reverse();
            (true, more)
        }
    };

    let first_rank = start_rank(page, request.page_size);
    let next_cursor = rows
        .last()
        .filter(|_| has_next)
        .map(|r| Cursor::of(r).to_string());
    let prev_cursor = rows
        .first()
        .filter(|_| has_prev)
        .map(|r| Cursor::of(r).to_string());

    let entries = rows
        .into_iter()
        .zip(first_rank..)
        .map(|(row, rank)| LeaderboardEntry {
            rank,
            user_id: row.user_id,
            display_name: row.display_name,
            total_impact_score: row.total_impact_score,
            level: row.level,
            persona: row.persona,
            avatar_url: row.avatar_url,
        })
        .collect();

    LeaderboardPage {
        entries,
        page,
        page_size: request.page_size,
        has_next,
        has_prev,
        next_cursor,
        prev_cursor,
    }
}

/// Applies a window to an in-memory row set. Mirrors the SQL in the Postgres store.
pub fn select_window(
    rows: impl IntoIterator<Item = LeaderboardRow>,
    filter: &LeaderboardFilter,
    window: &Window,
) -> Vec<LeaderboardRow> {
    let mut selected: Vec<LeaderboardRow> = rows
        .into_iter()
        .filter(|row| filter.admits(row))
        .filter(|row| match (&window.cursor, window.direction) {
            (None, _) | (_, Direction::First) => true,
            (Some(cursor), Direction::Next) => cursor.precedes(row),
            (Some(cursor), Direction::Prev) => cursor.follows(row),
        })
        .collect();

    selected.sort_by(leaderboard_order);
    if window.direction == Direction::Prev {
        selected.reverse();
    }
    selected.truncate(window.limit.max(0) as usize);
    selected
}
