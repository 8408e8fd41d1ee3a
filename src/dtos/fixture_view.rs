// dtos/fixture_view.rs
//
// Display-ready projections of stored fixtures. All pure: handlers fetch the
// raw documents and hand them here, which keeps the filter/format/group logic
// testable without a database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datefmt;
use crate::models::fixture::{Fixture, FixtureStatus};

/// Fallback badge for fixtures missing a stored logo URL.
pub const DEFAULT_LOGO: &str = "/images/default-badge.png";

/// Optional filters from the fixtures page. A value starting with "All "
/// ("All leagues", "All seasons", ...) is the no-filter sentinel the public
/// dropdowns submit.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FixtureFilter {
    /// Matches the fixture's competition type (League, Cup, Friendly).
    pub league: Option<String>,
    pub season: Option<String>,
    /// Matches the fixture's competition name.
    pub competition: Option<String>,
}

fn filter_matches(wanted: &Option<String>, field: &str) -> bool {
    match wanted {
        Some(value) => {
            let value = value.trim();
            value.is_empty() || value.starts_with("All ") || value == field
        }
        None => true,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureView {
    pub id: String,
    /// Raw stored date, kept for clients that sort or link by it.
    pub date: String,
    /// "Saturday 14 March"
    pub date_label: String,
    /// Kick-off in normalized 12-hour form, no leading zero.
    pub time: String,
    /// "March 2026" grouping label.
    pub month: String,
    pub venue: String,
    pub competition: String,
    pub competition_type: String,
    pub season: String,
    pub home_team: String,
    pub home_logo: String,
    pub away_team: String,
    pub away_logo: String,
    pub status: FixtureStatus,
}

fn to_view(fixture: &Fixture, date: NaiveDate) -> FixtureView {
    FixtureView {
        id: fixture.id.map(|oid| oid.to_hex()).unwrap_or_default(),
        date: fixture.date.clone(),
        date_label: datefmt::format_date_label(date),
        time: datefmt::normalize_time(&fixture.time),
        month: datefmt::format_month_label(date),
        venue: fixture.venue.clone(),
        competition: fixture.competition.clone(),
        competition_type: fixture.competition_type.clone(),
        season: fixture.season.clone(),
        home_team: fixture.home_team.clone(),
        home_logo: fixture
            .home_logo
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
        away_team: fixture.away_team.clone(),
        away_logo: fixture
            .away_logo
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
        status: fixture.status,
    }
}

/// Upcoming fixtures for the public fixtures page: SCHEDULED, dated today or
/// later, matching every supplied filter, ascending by date then kick-off.
/// An empty result is an empty Vec, never an error.
pub fn upcoming_views(
    fixtures: &[Fixture],
    filter: &FixtureFilter,
    today: NaiveDate,
) -> Vec<FixtureView> {
    let mut dated: Vec<(NaiveDate, &Fixture)> = fixtures
        .iter()
        .filter(|f| f.status == FixtureStatus::Scheduled)
        .filter_map(|f| datefmt::parse_date(&f.date).map(|d| (d, f)))
        .filter(|(d, _)| *d >= today)
        .filter(|(_, f)| {
            filter_matches(&filter.league, &f.competition_type)
                && filter_matches(&filter.season, &f.season)
                && filter_matches(&filter.competition, &f.competition)
        })
        .collect();

    dated.sort_by(|(da, fa), (db, fb)| da.cmp(db).then_with(|| fa.time.cmp(&fb.time)));

    dated.into_iter().map(|(d, f)| to_view(f, d)).collect()
}

#[derive(Debug, Serialize)]
pub struct MonthGroup {
    pub month: String,
    pub fixtures: Vec<FixtureView>,
}

/// Buckets already-sorted views by their month label, preserving order of
/// first appearance.
pub fn group_by_month(views: Vec<FixtureView>) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for view in views {
        match groups.last_mut() {
            Some(group) if group.month == view.month => group.fixtures.push(view),
            _ => groups.push(MonthGroup {
                month: view.month.clone(),
                fixtures: vec![view],
            }),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// Pure score comparison; a tie is the case where neither score exceeds the
/// other.
pub fn outcome(home_score: i32, away_score: i32) -> MatchOutcome {
    if home_score > away_score {
        MatchOutcome::HomeWin
    } else if away_score > home_score {
        MatchOutcome::AwayWin
    } else {
        MatchOutcome::Draw
    }
}

#[derive(Debug, Serialize)]
pub struct ResultView {
    pub id: String,
    pub date: String,
    pub date_label: String,
    pub competition: String,
    pub season: String,
    pub home_team: String,
    pub home_logo: String,
    pub away_team: String,
    pub away_logo: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
}

/// Completed fixtures (full time), newest first, annotated with the outcome
/// where both scores are present.
pub fn result_views(fixtures: &[Fixture]) -> Vec<ResultView> {
    let mut dated: Vec<(Option<NaiveDate>, &Fixture)> = fixtures
        .iter()
        .filter(|f| f.status == FixtureStatus::Ft)
        .map(|f| (datefmt::parse_date(&f.date), f))
        .collect();

    dated.sort_by(|(da, _), (db, _)| db.cmp(da));

    dated
        .into_iter()
        .map(|(date, f)| ResultView {
            id: f.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            date: f.date.clone(),
            date_label: date
                .map(datefmt::format_date_label)
                .unwrap_or_else(|| f.date.clone()),
            competition: f.competition.clone(),
            season: f.season.clone(),
            home_team: f.home_team.clone(),
            home_logo: f
                .home_logo
                .clone()
                .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
            away_team: f.away_team.clone(),
            away_logo: f
                .away_logo
                .clone()
                .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
            home_score: f.home_score,
            away_score: f.away_score,
            outcome: match (f.home_score, f.away_score) {
                (Some(h), Some(a)) => Some(outcome(h, a)),
                _ => None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixture(date: &str, time: &str, competition_type: &str, season: &str) -> Fixture {
        Fixture {
            id: None,
            date: date.to_string(),
            time: time.to_string(),
            venue: "Memorial Ground".to_string(),
            competition: "County League".to_string(),
            competition_type: competition_type.to_string(),
            season: season.to_string(),
            home_team: "Oakwood Youth".to_string(),
            home_logo: Some("/logos/oakwood.png".to_string()),
            away_team: "Riverside Colts".to_string(),
            away_logo: None,
            home_score: None,
            away_score: None,
            status: FixtureStatus::Scheduled,
            timeline: Vec::new(),
            match_image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn exact_filter_returns_only_matching_fixtures() {
        let fixtures = vec![
            fixture("2026-03-14", "15:00", "League", "2025/26"),
            fixture("2026-03-21", "15:00", "Cup", "2025/26"),
        ];
        let filter = FixtureFilter {
            league: Some("Cup".to_string()),
            ..Default::default()
        };
        let views = upcoming_views(&fixtures, &filter, today());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].competition_type, "Cup");
    }

    #[test]
    fn all_sentinel_filters_nothing() {
        let fixtures = vec![
            fixture("2026-03-14", "15:00", "League", "2025/26"),
            fixture("2026-03-21", "15:00", "Cup", "2025/26"),
        ];
        let filter = FixtureFilter {
            league: Some("All leagues".to_string()),
            season: Some("All seasons".to_string()),
            competition: Some("All competitions".to_string()),
        };
        assert_eq!(upcoming_views(&fixtures, &filter, today()).len(), 2);
    }

    #[test]
    fn past_and_non_scheduled_fixtures_excluded() {
        let mut played = fixture("2026-02-01", "15:00", "League", "2025/26");
        played.status = FixtureStatus::Ft;
        let postponed = {
            let mut f = fixture("2026-03-14", "15:00", "League", "2025/26");
            f.status = FixtureStatus::Postponed;
            f
        };
        let fixtures = vec![
            played,
            postponed,
            fixture("2026-02-20", "15:00", "League", "2025/26"),
            fixture("2026-03-14", "15:00", "League", "2025/26"),
        ];
        let views = upcoming_views(&fixtures, &FixtureFilter::default(), today());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].date, "2026-03-14");
    }

    #[test]
    fn views_sorted_ascending_and_formatted() {
        let fixtures = vec![
            fixture("2026-04-04", "15:00", "League", "2025/26"),
            fixture("2026-03-14", "19:30", "League", "2025/26"),
        ];
        let views = upcoming_views(&fixtures, &FixtureFilter::default(), today());
        assert_eq!(views[0].date_label, "Saturday 14 March");
        assert_eq!(views[0].time, "7:30 PM");
        assert_eq!(views[0].month, "March 2026");
        assert_eq!(views[1].month, "April 2026");
    }

    #[test]
    fn missing_logo_falls_back_to_default() {
        let fixtures = vec![fixture("2026-03-14", "15:00", "League", "2025/26")];
        let views = upcoming_views(&fixtures, &FixtureFilter::default(), today());
        assert_eq!(views[0].home_logo, "/logos/oakwood.png");
        assert_eq!(views[0].away_logo, DEFAULT_LOGO);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let views = upcoming_views(&[], &FixtureFilter::default(), today());
        assert!(views.is_empty());
        assert!(group_by_month(views).is_empty());
    }

    #[test]
    fn fixtures_across_two_months_form_two_buckets() {
        let fixtures = vec![
            fixture("2026-03-28", "15:00", "League", "2025/26"),
            fixture("2026-03-14", "15:00", "League", "2025/26"),
            fixture("2026-04-04", "15:00", "League", "2025/26"),
        ];
        let groups = group_by_month(upcoming_views(
            &fixtures,
            &FixtureFilter::default(),
            today(),
        ));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].month, "March 2026");
        assert_eq!(groups[0].fixtures.len(), 2);
        assert_eq!(groups[0].fixtures[0].date, "2026-03-14");
        assert_eq!(groups[1].month, "April 2026");
        assert_eq!(groups[1].fixtures.len(), 1);
    }

    #[test]
    fn outcome_is_a_pure_comparison() {
        assert_eq!(outcome(3, 1), MatchOutcome::HomeWin);
        assert_eq!(outcome(0, 2), MatchOutcome::AwayWin);
        assert_eq!(outcome(2, 2), MatchOutcome::Draw);
        assert_eq!(outcome(0, 0), MatchOutcome::Draw);
    }

    #[test]
    fn results_take_full_time_fixtures_newest_first() {
        let mut first = fixture("2026-02-07", "15:00", "League", "2025/26");
        first.status = FixtureStatus::Ft;
        first.home_score = Some(2);
        first.away_score = Some(1);
        let mut second = fixture("2026-02-21", "15:00", "League", "2025/26");
        second.status = FixtureStatus::Ft;
        second.home_score = Some(0);
        second.away_score = Some(0);
        let upcoming = fixture("2026-03-14", "15:00", "League", "2025/26");

        let results = result_views(&[first, second, upcoming]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].date, "2026-02-21");
        assert_eq!(results[0].outcome, Some(MatchOutcome::Draw));
        assert_eq!(results[1].outcome, Some(MatchOutcome::HomeWin));
    }
}
