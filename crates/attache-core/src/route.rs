//! The routing table: every screen path and the session it expects.
//!
//! Routing is purely declarative. The only "guard" is the role returned by
//! [`Route::guard`], which the mounted screen checks once against the session
//! store; access control proper belongs to the remote API.

use std::fmt;

use crate::{Error, Result, role::Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Home,

  // Student
  StudentLogin,
  StudentRegister,
  StudentDashboard,
  SubmitPreference,
  EditPreference,
  Logbook,
  EditProfile,

  // Organisation
  OrganisationLogin,
  OrganisationRegister,
  OrganisationDashboard,
  OrganisationPreferenceCreate { org_id: i64 },
  OrganisationPreferenceEdit,
  OrganisationProfileEdit,
  OrganisationLogbooks { org_id: i64 },
  LogbookDetail { logbook_id: String },

  // Supervisor
  SupervisorLogin,
  SupervisorRegister,
  SupervisorDashboard,
  SupervisorViewReports,
  SupervisorSubmitReport,
  SupervisorReportDetails { report_id: String },

  // Admin
  AdminLogin,
  AdminRegister,
  AdminDashboard,
  ManageStudents,
  ManageOrganisations,
  ManualMatch,
}

impl Route {
  /// Resolve a URL path to a route. A trailing slash is ignored.
  pub fn parse(path: &str) -> Result<Route> {
    let trimmed = path.trim_end_matches('/');
    let segments: Vec<&str> = trimmed
      .split('/')
      .filter(|s| !s.is_empty())
      .collect();

    let route = match segments.as_slice() {
      [] => Route::Home,

      ["login"] => Route::StudentLogin,
      ["register"] => Route::StudentRegister,
      ["dashboard"] => Route::StudentDashboard,
      ["submit-preference"] => Route::SubmitPreference,
      ["edit-preference"] => Route::EditPreference,
      ["logbook"] => Route::Logbook,
      ["edit-profile"] => Route::EditProfile,

      ["login-organisation"] => Route::OrganisationLogin,
      ["register-organisation"] => Route::OrganisationRegister,
      ["organisation-dashboard"] => Route::OrganisationDashboard,
      ["organisation", org, "preferences", "create"] => {
        Route::OrganisationPreferenceCreate { org_id: parse_org_id(org)? }
      }
      ["organisation-preference", "edit"] => Route::OrganisationPreferenceEdit,
      ["organisation-profile", "edit"] => Route::OrganisationProfileEdit,
      ["organisation", org, "logbooks"] => {
        Route::OrganisationLogbooks { org_id: parse_org_id(org)? }
      }
      ["logbooks", id] => Route::LogbookDetail { logbook_id: (*id).to_owned() },

      ["supervisor", "login"] => Route::SupervisorLogin,
      ["supervisor", "register"] => Route::SupervisorRegister,
      ["supervisor", "dashboard"] => Route::SupervisorDashboard,
      ["supervisor", "view-reports"] => Route::SupervisorViewReports,
      ["supervisor", "submit-report"] => Route::SupervisorSubmitReport,
      ["supervisor", "report-details", id] => {
        Route::SupervisorReportDetails { report_id: (*id).to_owned() }
      }

      ["admin", "login"] => Route::AdminLogin,
      ["admin", "register"] => Route::AdminRegister,
      ["admin", "dashboard"] => Route::AdminDashboard,
      ["admin", "manage-students"] => Route::ManageStudents,
      ["admin", "manage-organisations"] => Route::ManageOrganisations,
      ["admin", "manual-match"] => Route::ManualMatch,

      _ => return Err(Error::UnknownRoute(path.to_owned())),
    };
    Ok(route)
  }

  /// The canonical URL path of this route.
  pub fn path(&self) -> String {
    match self {
      Route::Home => "/".into(),

      Route::StudentLogin => "/login".into(),
      Route::StudentRegister => "/register".into(),
      Route::StudentDashboard => "/dashboard".into(),
      Route::SubmitPreference => "/submit-preference".into(),
      Route::EditPreference => "/edit-preference".into(),
      Route::Logbook => "/logbook".into(),
      Route::EditProfile => "/edit-profile".into(),

      Route::OrganisationLogin => "/login-organisation".into(),
      Route::OrganisationRegister => "/register-organisation".into(),
      Route::OrganisationDashboard => "/organisation-dashboard".into(),
      Route::OrganisationPreferenceCreate { org_id } => {
        format!("/organisation/{org_id}/preferences/create")
      }
      Route::OrganisationPreferenceEdit => "/organisation-preference/edit".into(),
      Route::OrganisationProfileEdit => "/organisation-profile/edit".into(),
      Route::OrganisationLogbooks { org_id } => format!("/organisation/{org_id}/logbooks"),
      Route::LogbookDetail { logbook_id } => format!("/logbooks/{logbook_id}"),

      Route::SupervisorLogin => "/supervisor/login".into(),
      Route::SupervisorRegister => "/supervisor/register".into(),
      Route::SupervisorDashboard => "/supervisor/dashboard".into(),
      Route::SupervisorViewReports => "/supervisor/view-reports".into(),
      Route::SupervisorSubmitReport => "/supervisor/submit-report".into(),
      Route::SupervisorReportDetails { report_id } => {
        format!("/supervisor/report-details/{report_id}")
      }

      Route::AdminLogin => "/admin/login".into(),
      Route::AdminRegister => "/admin/register".into(),
      Route::AdminDashboard => "/admin/dashboard".into(),
      Route::ManageStudents => "/admin/manage-students".into(),
      Route::ManageOrganisations => "/admin/manage-organisations".into(),
      Route::ManualMatch => "/admin/manual-match".into(),
    }
  }

  /// The role whose session this screen checks on mount, if any.
  ///
  /// Login, register and home screens are public. The organisation logbook
  /// screens and the admin manage screens carry no session check.
  pub fn guard(&self) -> Option<Role> {
    match self {
      Route::StudentDashboard
      | Route::SubmitPreference
      | Route::EditPreference
      | Route::Logbook
      | Route::EditProfile => Some(Role::Student),

      Route::OrganisationDashboard
      | Route::OrganisationPreferenceCreate { .. }
      | Route::OrganisationPreferenceEdit
      | Route::OrganisationProfileEdit => Some(Role::Organisation),

      Route::SupervisorDashboard => Some(Role::Supervisor),

      Route::AdminDashboard => Some(Role::Admin),

      Route::Home
      | Route::StudentLogin
      | Route::StudentRegister
      | Route::OrganisationLogin
      | Route::OrganisationRegister
      | Route::OrganisationLogbooks { .. }
      | Route::LogbookDetail { .. }
      | Route::SupervisorLogin
      | Route::SupervisorRegister
      | Route::SupervisorViewReports
      | Route::SupervisorSubmitReport
      | Route::SupervisorReportDetails { .. }
      | Route::AdminLogin
      | Route::AdminRegister
      | Route::ManageStudents
      | Route::ManageOrganisations
      | Route::ManualMatch => None,
    }
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

fn parse_org_id(raw: &str) -> Result<i64> {
  raw.parse().map_err(|_| Error::InvalidRouteParam {
    name:  "orgId",
    value: raw.to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_route_round_trips_through_its_path() {
    let routes = [
      Route::Home,
      Route::StudentDashboard,
      Route::OrganisationPreferenceCreate { org_id: 7 },
      Route::OrganisationLogbooks { org_id: 3 },
      Route::LogbookDetail { logbook_id: "AB12CD34".into() },
      Route::SupervisorReportDetails { report_id: "r1".into() },
      Route::ManualMatch,
    ];
    for route in routes {
      assert_eq!(Route::parse(&route.path()).unwrap(), route);
    }
  }

  #[test]
  fn trailing_slash_is_ignored() {
    assert_eq!(Route::parse("/admin/dashboard/").unwrap(), Route::AdminDashboard);
  }

  #[test]
  fn unknown_path_is_an_error() {
    assert!(matches!(Route::parse("/nope"), Err(Error::UnknownRoute(_))));
  }

  #[test]
  fn non_numeric_org_id_is_rejected() {
    assert!(matches!(
      Route::parse("/organisation/acme/logbooks"),
      Err(Error::InvalidRouteParam { name: "orgId", .. })
    ));
  }

  #[test]
  fn student_screens_are_guarded_by_the_student_role() {
    for path in ["/dashboard", "/submit-preference", "/edit-preference", "/logbook", "/edit-profile"] {
      assert_eq!(Route::parse(path).unwrap().guard(), Some(Role::Student));
    }
    assert_eq!(Route::StudentLogin.guard(), None);
  }
}
