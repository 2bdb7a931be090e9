// tests/leaderboard_tests.rs

use std::collections::HashSet;

use impact_backend::{
    leaderboard::{
        Cursor, Direction, LeaderboardFilter, LeaderboardPage, LeaderboardParams, PageRequest,
        assemble_page, leaderboard_order, select_window,
    },
    models::{persona::Persona, profile::LeaderboardRow},
};

fn row(user_id: &str, score: i64, persona: Option<&str>) -> LeaderboardRow {
    LeaderboardRow {
        user_id: user_id.to_string(),
        display_name: Some(user_id.to_string()),
        total_impact_score: score,
        level: score / 500 + 1,
        persona: persona.map(str::to_string),
        avatar_url: None,
    }
}

fn fetch(rows: &[LeaderboardRow], params: LeaderboardParams) -> LeaderboardPage {
    let request = PageRequest::from_params(&params).unwrap();
    let selected = select_window(rows.iter().cloned(), &request.filter, &request.window());
    assemble_page(&request, selected)
}

fn params(
    page: i64,
    page_size: i64,
    direction: &str,
    cursor: Option<&String>,
) -> LeaderboardParams {
    LeaderboardParams {
        persona: None,
        page: Some(page),
        page_size: Some(page_size),
        direction: Some(direction.to_string()),
        cursor: cursor.cloned(),
    }
}

fn ids(page: &LeaderboardPage) -> Vec<String> {
    page.entries.iter().map(|e| e.user_id.clone()).collect()
}

/// 25 users in groups of four sharing a score.
fn tied_rows() -> Vec<LeaderboardRow> {
    (0..25)
        .map(|i| row(&format!("user_{:02}", 24 - i), 100 - (i / 4) * 10, None))
        .collect()
}

#[test]
fn first_page_starts_at_rank_one_and_increments() {
    let rows = tied_rows();
    let page = fetch(&rows, params(1, 10, "first", None));

    let ranks: Vec<i64> = page.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
    assert!(page.has_next);
    assert!(!page.has_prev);
    assert!(page.prev_cursor.is_none());
}

#[test]
fn has_next_only_when_more_than_page_size_rows() {
    let exact: Vec<LeaderboardRow> = (0..5).map(|i| row(&format!("u{}", i), 10 + i, None)).collect();
    let page = fetch(&exact, params(1, 5, "first", None));
    assert_eq!(page.entries.len(), 5);
    assert!(!page.has_next);
    assert!(page.next_cursor.is_none());

    let one_more: Vec<LeaderboardRow> = (0..6).map(|i| row(&format!("u{}", i), 10 + i, None)).collect();
    let page = fetch(&one_more, params(1, 5, "first", None));
    assert_eq!(page.entries.len(), 5);
    assert!(page.has_next);
}

#[test]
fn zero_scores_are_never_ranked() {
    let rows = vec![row("a", 30, None), row("b", 0, None), row("c", 10, None)];
    let page = fetch(&rows, params(1, 10, "first", None));
    assert_eq!(ids(&page), vec!["a", "c"]);
}

#[test]
fn composite_cursor_visits_every_tied_row_once() {
    let rows = tied_rows();
    let mut expected = rows.clone();
    expected.sort_by(leaderboard_order);
    let expected: Vec<String> = expected.into_iter().map(|r| r.user_id).collect();

    let mut seen = Vec::new();
    let mut page = fetch(&rows, params(1, 3, "first", None));
    seen.extend(ids(&page));
    while page.has_next {
        let cursor = page.next_cursor.clone().unwrap();
        page = fetch(&rows, params(page.page, 3, "next", Some(&cursor)));
        seen.extend(ids(&page));
    }

    assert_eq!(seen, expected);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), rows.len());
    assert_eq!(page.page, 9);
    assert_eq!(page.entries.first().unwrap().rank, 25);
}

#[test]
fn prev_page_returns_the_page_before() {
    let rows = tied_rows();

    let first = fetch(&rows, params(1, 4, "first", None));
    let second = fetch(&rows, params(1, 4, "next", first.next_cursor.as_ref()));
    let third = fetch(&rows, params(2, 4, "next", second.next_cursor.as_ref()));
    assert_eq!(third.page, 3);
    assert_eq!(third.entries[0].rank, 9);

    let back = fetch(&rows, params(3, 4, "prev", third.prev_cursor.as_ref()));
    assert_eq!(back.page, 2);
    assert_eq!(ids(&back), ids(&second));
    assert_eq!(back.entries[0].rank, 5);
    assert!(back.has_next);
    assert!(back.has_prev);

    let front = fetch(&rows, params(2, 4, "prev", back.prev_cursor.as_ref()));
    assert_eq!(ids(&front), ids(&first));
    assert_eq!(front.entries[0].rank, 1);
    assert!(!front.has_prev);
}

#[test]
fn bare_score_cursor_keeps_strict_score_comparison() {
    let rows = vec![row("a", 50, None), row("b", 50, None), row("c", 40, None)];
    let legacy = "50".to_string();

    let page = fetch(&rows, params(1, 1, "next", Some(&legacy)));

    // Rows tied with the cursor score are skipped by the bare form.
    assert_eq!(ids(&page), vec!["c"]);
}

#[test]
fn persona_filter_restarts_ranks() {
    let rows = vec![
        row("a", 900, Some("tech_innovator")),
        row("b", 800, Some("eco_warrior")),
        row("c", 700, Some("eco_warrior")),
        row("d", 600, None),
        row("e", 500, Some("eco_warrior")),
    ];
    let page = fetch(
        &rows,
        LeaderboardParams {
            persona: Some("eco_warrior".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(ids(&page), vec!["b", "c", "e"]);
    let ranks: Vec<i64> = page.entries.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    assert!(
        page.entries
            .iter()
            .all(|e| e.persona.as_deref() == Some(Persona::EcoWarrior.as_str()))
    );
}

#[test]
fn cursor_round_trips_through_its_string_form() {
    let cursor: Cursor = "120:user_07".parse().unwrap();
    assert_eq!(cursor.score, 120);
    assert_eq!(cursor.user_id.as_deref(), Some("user_07"));
    assert_eq!(cursor.to_string(), "120:user_07");

    let bare: Cursor = "120".parse().unwrap();
    assert_eq!(bare.user_id, None);

    assert!("abc".parse::<Cursor>().is_err());
    assert!("12:".parse::<Cursor>().is_err());
}

#[test]
fn page_request_validation() {
    let missing_cursor = LeaderboardParams {
        direction: Some("next".to_string()),
        ..Default::default()
    };
    assert!(PageRequest::from_params(&missing_cursor).is_err());

    let bad_persona = LeaderboardParams {
        persona: Some("pirate".to_string()),
        ..Default::default()
    };
    assert!(PageRequest::from_params(&bad_persona).is_err());

    let huge = LeaderboardParams {
        page_size: Some(5000),
        ..Default::default()
    };
    let request = PageRequest::from_params(&huge).unwrap();
    assert_eq!(request.page_size, 100);
    assert_eq!(request.direction, Direction::First);
    assert_eq!(request.filter, LeaderboardFilter::default());

    let defaults = PageRequest::from_params(&LeaderboardParams::default()).unwrap();
    assert_eq!(defaults.page_size, 10);
    assert_eq!(defaults.window().limit, 11);
}

#[test]
fn oversized_page_is_rejected() {
    let cursor = "5".to_string();
    for direction in ["next", "prev"] {
        let result = PageRequest::from_params(&params(i64::MAX, 10, direction, Some(&cursor)));
        assert!(result.is_err(), "direction {}", direction);
    }
    assert!(PageRequest::from_params(&params(i64::MAX / 2, 10, "prev", Some(&cursor))).is_err());

    // The largest accepted page still ranks without overflow.
    let last = i64::MAX / 10 - 1;
    let request = PageRequest::from_params(&params(last, 10, "next", Some(&cursor))).unwrap();
    let page = assemble_page(&request, vec![row("a", 4, None)]);
    assert_eq!(page.page, last + 1);
    assert_eq!(page.entries[0].rank, last * 10 + 1);
}
