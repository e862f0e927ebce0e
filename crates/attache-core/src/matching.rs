//! The manual-match board: two slots an admin fills before submitting a
//! match between one student preference and one organisation.
//!
//! Filling a slot never touches the other one. Clicking a list item and
//! dragging it onto the board are two adapters over the same [`MatchBoard::fill`].

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{Organisation, StudentPreference};

pub const ADMIN_NOTE: &str = "Matched manually via drag-and-drop";

/// Fallback shown when the server rejects a match without a message.
pub const MATCH_FAILED_MESSAGE: &str = "Match failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please select both a student preference and an organisation.")]
pub struct SelectBoth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  Student,
  Organisation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
  Empty,
  OneSelected(Slot),
  BothSelected,
}

/// A record placed into a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Pick {
  Student(StudentPreference),
  Organisation(Organisation),
}

/// What a drag carries: only the id, resolved against the source lists on
/// drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
  StudentPreference { student_pref_id: String },
  Organisation { org_id: i64 },
}

impl DragItem {
  pub fn slot(&self) -> Slot {
    match self {
      DragItem::StudentPreference { .. } => Slot::Student,
      DragItem::Organisation { .. } => Slot::Organisation,
    }
  }
}

/// Body of `POST /manual-match/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRequest {
  pub student_pref_id: Value,
  pub organisation_id: i64,
  pub admin_note:      &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchBoard {
  pub student:      Option<StudentPreference>,
  pub organisation: Option<Organisation>,
}

impl MatchBoard {
  pub fn new() -> Self { Self::default() }

  pub fn state(&self) -> MatchState {
    match (&self.student, &self.organisation) {
      (None, None) => MatchState::Empty,
      (Some(_), None) => MatchState::OneSelected(Slot::Student),
      (None, Some(_)) => MatchState::OneSelected(Slot::Organisation),
      (Some(_), Some(_)) => MatchState::BothSelected,
    }
  }

  /// Put `pick` in its slot, replacing whatever was there.
  pub fn fill(&mut self, pick: Pick) {
    match pick {
      Pick::Student(pref) => self.student = Some(pref),
      Pick::Organisation(org) => self.organisation = Some(org),
    }
  }

  /// Click adapter.
  pub fn select(&mut self, pick: Pick) { self.fill(pick) }

  /// Drop adapter. Returns `false`, leaving the board as it was, when the
  /// dragged id is not in the source lists.
  pub fn drop_item(
    &mut self,
    item: &DragItem,
    students: &[StudentPreference],
    organisations: &[Organisation],
  ) -> bool {
    let found = match item {
      DragItem::StudentPreference { student_pref_id } => students
        .iter()
        .find(|p| &p.student_pref_id == student_pref_id)
        .cloned()
        .map(Pick::Student),
      DragItem::Organisation { org_id } => organisations
        .iter()
        .find(|o| o.org_id == *org_id)
        .cloned()
        .map(Pick::Organisation),
    };
    match found {
      Some(pick) => {
        self.fill(pick);
        true
      }
      None => false,
    }
  }

  /// The request to send, or [`SelectBoth`] while a slot is empty.
  pub fn match_request(&self) -> Result<MatchRequest, SelectBoth> {
    let (Some(student), Some(org)) = (&self.student, &self.organisation) else {
      return Err(SelectBoth);
    };
    Ok(MatchRequest {
      student_pref_id: id_value(&student.student_pref_id),
      organisation_id: org.org_id,
      admin_note:      ADMIN_NOTE,
    })
  }

  /// The server accepted the match.
  pub fn on_matched(&mut self) {
    self.student = None;
    self.organisation = None;
  }
}

/// Numeric ids go back on the wire as numbers.
fn id_value(id: &str) -> Value {
  id.parse::<i64>()
    .map(Value::from)
    .unwrap_or_else(|_| Value::String(id.to_owned()))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn pref(id: &str) -> StudentPreference {
    serde_json::from_value(json!({ "student_pref_id": id, "student_name": "Neo Kgosi" }))
      .unwrap()
  }

  fn org(id: i64) -> Organisation {
    serde_json::from_value(json!({ "org_id": id, "org_name": "Debswana" })).unwrap()
  }

  #[test]
  fn one_slot_is_not_enough() {
    let mut board = MatchBoard::new();
    board.select(Pick::Student(pref("4")));
    assert_eq!(board.state(), MatchState::OneSelected(Slot::Student));

    let err = board.match_request().unwrap_err();
    assert_eq!(err.to_string(), "Please select both a student preference and an organisation.");
    assert_eq!(board.state(), MatchState::OneSelected(Slot::Student));
  }

  #[test]
  fn filling_one_slot_keeps_the_other() {
    let mut board = MatchBoard::new();
    board.fill(Pick::Organisation(org(3)));
    board.fill(Pick::Student(pref("4")));
    board.fill(Pick::Student(pref("5")));
    assert_eq!(board.state(), MatchState::BothSelected);
    assert_eq!(board.organisation.as_ref().map(|o| o.org_id), Some(3));
    assert_eq!(board.student.as_ref().map(|p| p.student_pref_id.as_str()), Some("5"));
  }

  #[test]
  fn drop_resolves_ids_and_ignores_unknown_ones() {
    let students = vec![pref("4"), pref("7")];
    let orgs = vec![org(3)];
    let mut board = MatchBoard::new();

    assert!(!board.drop_item(&DragItem::Organisation { org_id: 99 }, &students, &orgs));
    assert_eq!(board.state(), MatchState::Empty);

    assert!(board.drop_item(
      &DragItem::StudentPreference { student_pref_id: "7".into() },
      &students,
      &orgs
    ));
    assert!(board.drop_item(&DragItem::Organisation { org_id: 3 }, &students, &orgs));

    let request = board.match_request().unwrap();
    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({
        "student_pref_id": 7,
        "organisation_id": 3,
        "admin_note": "Matched manually via drag-and-drop"
      })
    );
  }

  #[test]
  fn success_clears_both_slots() {
    let mut board = MatchBoard::new();
    board.fill(Pick::Student(pref("4")));
    board.fill(Pick::Organisation(org(3)));
    board.on_matched();
    assert_eq!(board.state(), MatchState::Empty);
  }
}
