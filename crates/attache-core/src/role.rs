//! The four user roles and their entry points.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, route::Route};

/// Who is logged in. Each role has its own login screen, dashboard and
/// session key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Organisation,
  Supervisor,
  Admin,
}

impl Role {
  pub const ALL: [Role; 4] =
    [Role::Student, Role::Organisation, Role::Supervisor, Role::Admin];

  /// Where a failed mount-time session check sends the user.
  pub fn login_route(self) -> Route {
    match self {
      Role::Student => Route::StudentLogin,
      Role::Organisation => Route::OrganisationLogin,
      Role::Supervisor => Route::SupervisorLogin,
      Role::Admin => Route::AdminLogin,
    }
  }

  pub fn register_route(self) -> Route {
    match self {
      Role::Student => Route::StudentRegister,
      Role::Organisation => Route::OrganisationRegister,
      Role::Supervisor => Route::SupervisorRegister,
      Role::Admin => Route::AdminRegister,
    }
  }

  /// Where a successful login lands.
  pub fn dashboard_route(self) -> Route {
    match self {
      Role::Student => Route::StudentDashboard,
      Role::Organisation => Route::OrganisationDashboard,
      Role::Supervisor => Route::SupervisorDashboard,
      Role::Admin => Route::AdminDashboard,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Role::Student => "student",
      Role::Organisation => "organisation",
      Role::Supervisor => "supervisor",
      Role::Admin => "admin",
    }
  }

  /// Capitalised label for headings.
  pub fn title(self) -> &'static str {
    match self {
      Role::Student => "Student",
      Role::Organisation => "Organisation",
      Role::Supervisor => "Supervisor",
      Role::Admin => "Admin",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "student" => Ok(Role::Student),
      "organisation" | "organization" => Ok(Role::Organisation),
      "supervisor" => Ok(Role::Supervisor),
      "admin" => Ok(Role::Admin),
      _ => Err(Error::UnknownRole(s.to_owned())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_both_spellings_of_organisation() {
    assert_eq!("organisation".parse::<Role>().unwrap(), Role::Organisation);
    assert_eq!("Organization".parse::<Role>().unwrap(), Role::Organisation);
    assert!("lecturer".parse::<Role>().is_err());
  }

  #[test]
  fn login_and_dashboard_routes_are_role_specific() {
    assert_eq!(Role::Student.login_route().path(), "/login");
    assert_eq!(Role::Organisation.login_route().path(), "/login-organisation");
    assert_eq!(Role::Admin.dashboard_route().path(), "/admin/dashboard");
    assert_eq!(Role::Supervisor.dashboard_route().path(), "/supervisor/dashboard");
  }
}
