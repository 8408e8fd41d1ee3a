// database/standings.rs
//
// Repository for the standings collection. The one interesting operation is
// replace_row: the stored document embeds its table rows as an array, so a
// single-row edit is a read-modify-write of the whole document. Keeping that
// cycle in one method gives a future optimistic-lock guard a single place to
// land without touching callers.

use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use crate::errors::{AppError, Result};
use crate::models::standing::{RowPatch, Standing, TableRow};

pub struct StandingsRepo {
    collection: Collection<Standing>,
}

/// Applies a patch to one row of a table, by index. Pure so the merge rules
/// stay testable apart from the database round trip.
pub fn apply_row_patch(rows: &mut [TableRow], index: usize, patch: &RowPatch) -> bool {
    let Some(row) = rows.get_mut(index) else {
        return false;
    };
    if let Some(rank) = patch.rank {
        row.rank = rank;
    }
    if let Some(team) = &patch.team {
        row.team = team.clone();
    }
    if let Some(played) = patch.played {
        row.played = played;
    }
    if let Some(won) = patch.won {
        row.won = won;
    }
    if let Some(drawn) = patch.drawn {
        row.drawn = drawn;
    }
    if let Some(lost) = patch.lost {
        row.lost = lost;
    }
    if let Some(goals_for) = patch.goals_for {
        row.goals_for = goals_for;
    }
    if let Some(goals_against) = patch.goals_against {
        row.goals_against = goals_against;
    }
    if let Some(goal_difference) = patch.goal_difference {
        row.goal_difference = goal_difference;
    }
    if let Some(points) = patch.points {
        row.points = points;
    }
    true
}

impl StandingsRepo {
    pub fn new(db: &Database) -> Self {
        StandingsRepo {
            collection: db.collection("standings"),
        }
    }

    pub fn collection(&self) -> &Collection<Standing> {
        &self.collection
    }

    /// Loads the standing, patches one row in memory, and writes the whole
    /// document back. Concurrent edits of the same standing can still lose
    /// updates at the database; this is the seam where a compare-and-swap
    /// would be added.
    pub async fn replace_row(
        &self,
        standing_id: &str,
        index: usize,
        patch: &RowPatch,
    ) -> Result<Standing> {
        let object_id = ObjectId::parse_str(standing_id)?;
        let filter = doc! { "_id": object_id };

        let mut standing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(AppError::DocumentNotFound)?;

        if !apply_row_patch(&mut standing.rows, index, patch) {
            return Err(AppError::invalid_data(format!(
                "Row index {} out of range ({} rows)",
                index,
                standing.rows.len()
            )));
        }
        standing.updated_at = Utc::now();

        self.collection.replace_one(filter, &standing).await?;
        Ok(standing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rank: i32, team: &str, points: i32) -> TableRow {
        TableRow {
            rank,
            team: team.to_string(),
            played: 10,
            won: 5,
            drawn: 2,
            lost: 3,
            goals_for: 18,
            goals_against: 12,
            goal_difference: 6,
            points,
        }
    }

    #[test]
    fn patch_updates_only_supplied_fields() {
        let mut rows = vec![row(1, "Oakwood Youth", 17), row(2, "Riverside Colts", 15)];
        let patch = RowPatch {
            played: Some(11),
            won: Some(6),
            points: Some(20),
            ..Default::default()
        };
        assert!(apply_row_patch(&mut rows, 1, &patch));
        assert_eq!(rows[1].played, 11);
        assert_eq!(rows[1].won, 6);
        assert_eq!(rows[1].points, 20);
        // untouched fields survive
        assert_eq!(rows[1].team, "Riverside Colts");
        assert_eq!(rows[1].drawn, 2);
        // sibling row untouched
        assert_eq!(rows[0], row(1, "Oakwood Youth", 17));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut rows = vec![row(1, "Oakwood Youth", 17)];
        assert!(!apply_row_patch(&mut rows, 1, &RowPatch::default()));
        assert!(!apply_row_patch(&mut [], 0, &RowPatch::default()));
    }

    #[test]
    fn empty_patch_leaves_row_unchanged() {
        let mut rows = vec![row(1, "Oakwood Youth", 17)];
        assert!(apply_row_patch(&mut rows, 0, &RowPatch::default()));
        assert_eq!(rows[0], row(1, "Oakwood Youth", 17));
    }
}
