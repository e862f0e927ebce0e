//! The form catalogue: one declarative [`FormSpec`] per form screen.
//!
//! Field names are the wire names the remote API expects. Messages and
//! catch-all routing reproduce each screen's own choices.

use crate::{
  form::{CatchAll, CatchAllRule},
  reference::ReferenceList,
  route::Route,
};

// ─── Spec types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Email,
  Password,
  Number,
  /// `YYYY-MM-DD`.
  Date,
  Multiline,
  /// Pick one id from a reference list; blank means the placeholder.
  Select(ReferenceList),
  /// Pre-filled from the session and never edited.
  ReadOnly,
}

impl FieldKind {
  pub fn is_secret(self) -> bool { self == FieldKind::Password }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
  Optional,
  Required,
  /// Required when creating, optional when editing an existing record.
  CreateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name:     &'static str,
  pub label:    &'static str,
  pub kind:     FieldKind,
  pub required: Requirement,
}

const fn req(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
  FieldSpec { name, label, kind, required: Requirement::Required }
}

const fn opt(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
  FieldSpec { name, label, kind, required: Requirement::Optional }
}

/// What a form does after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnSuccess {
  /// Leave the draft as it is.
  Stay,
  /// Blank the draft except the listed fields.
  Reset { keep: &'static [&'static str] },
  /// Go to another screen.
  Navigate(Route),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
  pub title:             &'static str,
  pub fields:            &'static [FieldSpec],
  pub catch_all:         CatchAll,
  pub success_message:   &'static str,
  /// Shown when the server rejected the request without a usable message.
  pub failure_message:   &'static str,
  /// Shown when no response arrived at all.
  pub transport_message: &'static str,
  /// Banner shown alongside field errors, if the screen has one.
  pub invalid_message:   Option<&'static str>,
  pub on_success:        OnSuccess,
}

impl FormSpec {
  pub fn field(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|f| f.name == name)
  }
}

const SERVER_ERROR: &str = "Server error. Try again later.";

/// Shown by edit screens when there is no record to update.
pub const NO_EXISTING_PREFERENCE: &str =
  "No existing preference found. Please submit your preferences first.";

pub const SUPERVISOR_PASSWORD_MISMATCH: &str = "Passwords don't match";
pub const STUDENT_PASSWORD_MISMATCH: &str = "New password and confirmation do not match.";
pub const ORGANISATION_PASSWORD_MISMATCH: &str = "New passwords do not match.";

/// Supervisor login answer to a 401.
pub const SUPERVISOR_BAD_CREDENTIALS: &str = "Invalid email or password";
const FIX_ERRORS: &str = "Submission failed. Please fix the highlighted errors below.";

// ─── Login ───────────────────────────────────────────────────────────────────

pub static STUDENT_LOGIN: FormSpec = FormSpec {
  title:             "Student Login",
  fields:            &[
    req("student_id", "Student ID", FieldKind::Text),
    req("password", "Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Student login successful",
  failure_message:   "Invalid Student ID or Password.",
  transport_message: "Invalid Student ID or Password.",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::StudentDashboard),
};

pub static ORGANISATION_LOGIN: FormSpec = FormSpec {
  title:             "Organisation Login",
  fields:            &[
    req("contact_email", "Contact Email", FieldKind::Email),
    req("password", "Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Login successful!",
  failure_message:   "Login failed",
  transport_message: "An error occurred. Please try again.",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::OrganisationDashboard),
};

pub static SUPERVISOR_LOGIN: FormSpec = FormSpec {
  title:             "Supervisor Login",
  fields:            &[
    req("email", "Email", FieldKind::Email),
    req("password", "Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Login successful! Redirecting...",
  failure_message:   "Login failed",
  transport_message: "Network error. Please try again.",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::SupervisorDashboard),
};

pub static ADMIN_LOGIN: FormSpec = FormSpec {
  title:             "Admin Login",
  fields:            &[
    req("email", "Email", FieldKind::Email),
    req("password", "Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Login successful",
  failure_message:   "Login failed",
  transport_message: "Login failed",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::AdminDashboard),
};

// ─── Registration ────────────────────────────────────────────────────────────

const STUDENT_FIELDS: &[FieldSpec] = &[
  req("student_id", "Student ID", FieldKind::Text),
  req("first_name", "First Name", FieldKind::Text),
  req("last_name", "Last Name", FieldKind::Text),
  req("year_of_study", "Year of Study", FieldKind::Number),
  req("student_email", "Email", FieldKind::Email),
  req("student_contact_number", "Phone Number", FieldKind::Text),
  FieldSpec {
    name:     "password",
    label:    "Password",
    kind:     FieldKind::Password,
    required: Requirement::CreateOnly,
  },
];

const ORGANISATION_FIELDS: &[FieldSpec] = &[
  req("org_name", "Organisation Name", FieldKind::Text),
  req("industry", "Industry", FieldKind::Select(ReferenceList::Industries)),
  req("town", "Town", FieldKind::Text),
  req("street", "Street", FieldKind::Text),
  req("plot_number", "Plot Number", FieldKind::Text),
  req("contact_number", "Contact Number", FieldKind::Text),
  req("contact_email", "Contact Email", FieldKind::Email),
  FieldSpec {
    name:     "password",
    label:    "Password",
    kind:     FieldKind::Password,
    required: Requirement::CreateOnly,
  },
];

pub static STUDENT_REGISTER: FormSpec = FormSpec {
  title:             "Student Registration",
  fields:            STUDENT_FIELDS,
  catch_all:         CatchAll::FORM,
  success_message:   "Student registered successfully",
  failure_message:   "Something went wrong.",
  transport_message: "Something went wrong.",
  invalid_message:   None,
  on_success:        OnSuccess::Stay,
};

pub static ORGANISATION_REGISTER: FormSpec = FormSpec {
  title:             "Organisation Registration",
  fields:            ORGANISATION_FIELDS,
  catch_all:         CatchAll { rules: &[], fallback: &["org_name"] },
  success_message:   "Organisation registered successfully!",
  failure_message:   "Registration failed.",
  transport_message: "Registration failed.",
  invalid_message:   Some("Registration failed. Please fix the highlighted errors below."),
  on_success:        OnSuccess::Reset { keep: &[] },
};

pub static SUPERVISOR_REGISTER: FormSpec = FormSpec {
  title:             "Supervisor Registration",
  fields:            &[
    req("first_name", "First Name", FieldKind::Text),
    req("last_name", "Last Name", FieldKind::Text),
    req("email", "Email", FieldKind::Email),
    req("password", "Password", FieldKind::Password),
    req("confirm_password", "Confirm Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Registration successful! Redirecting to login...",
  failure_message:   "Registration failed. Please try again later.",
  transport_message: "Registration failed. Please try again later.",
  invalid_message:   Some("Registration failed. Please fix the errors below."),
  on_success:        OnSuccess::Navigate(Route::SupervisorLogin),
};

pub static ADMIN_REGISTER: FormSpec = FormSpec {
  title:             "Admin Registration",
  fields:            &[
    req("first_name", "First Name", FieldKind::Text),
    req("last_name", "Last Name", FieldKind::Text),
    req("email", "Email", FieldKind::Email),
    req("password", "Password", FieldKind::Password),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Admin registered successfully!",
  failure_message:   "Registration failed",
  transport_message: "Registration failed",
  invalid_message:   None,
  on_success:        OnSuccess::Stay,
};

// ─── Preferences ─────────────────────────────────────────────────────────────

const STUDENT_PREFERENCE_FIELDS: &[FieldSpec] = &[
  req("student_id", "Student ID", FieldKind::ReadOnly),
  req("pref_location", "Preferred Location", FieldKind::Text),
  req("available_from", "Available From", FieldKind::Date),
  req("available_to", "Available To", FieldKind::Date),
  req(
    "preferred_industry",
    "Preferred Industry",
    FieldKind::Select(ReferenceList::Industries),
  ),
  req("desired_skill", "Desired Skill", FieldKind::Select(ReferenceList::Skills)),
];

pub static STUDENT_PREFERENCE: FormSpec = FormSpec {
  title:             "Submit Preferences",
  fields:            STUDENT_PREFERENCE_FIELDS,
  catch_all:         CatchAll { rules: &[], fallback: &["available_from"] },
  success_message:   "Preferences submitted successfully!",
  failure_message:   SERVER_ERROR,
  transport_message: SERVER_ERROR,
  invalid_message:   None,
  on_success:        OnSuccess::Reset { keep: &["student_id"] },
};

pub static STUDENT_PREFERENCE_EDIT: FormSpec = FormSpec {
  title:             "Edit Preferences",
  fields:            STUDENT_PREFERENCE_FIELDS,
  catch_all:         CatchAll { rules: &[], fallback: &["available_from"] },
  success_message:   "Preferences updated successfully!",
  failure_message:   SERVER_ERROR,
  transport_message: SERVER_ERROR,
  invalid_message:   None,
  on_success:        OnSuccess::Stay,
};

const DATE_RULES: &[CatchAllRule] = &[
  CatchAllRule {
    contains: "Start Date must be before End Date",
    fields:   &["start_date", "end_date"],
  },
  CatchAllRule {
    contains: "Start date cannot be in the past",
    fields:   &["start_date"],
  },
];

pub static ORGANISATION_PREFERENCE: FormSpec = FormSpec {
  title:             "Organisation Preference",
  fields:            &[
    req("organisation_id", "Organisation ID", FieldKind::ReadOnly),
    req("pref_education_level", "Education Level (1-6)", FieldKind::Number),
    req("positions_available", "Positions Available", FieldKind::Number),
    req("start_date", "Start Date", FieldKind::Date),
    req("end_date", "End Date", FieldKind::Date),
    req(
      "preferred_field",
      "Preferred Field",
      FieldKind::Select(ReferenceList::Industries),
    ),
    req("required_skill", "Required Skill", FieldKind::Select(ReferenceList::Skills)),
  ],
  catch_all:         CatchAll { rules: DATE_RULES, fallback: &["form"] },
  success_message:   "Organisation preference created successfully.",
  failure_message:   "Submission failed",
  transport_message: "Submission failed",
  invalid_message:   Some(FIX_ERRORS),
  on_success:        OnSuccess::Navigate(Route::OrganisationDashboard),
};

pub static ORGANISATION_PREFERENCE_EDIT: FormSpec = FormSpec {
  title:             "Edit Organisation Preference",
  fields:            &[
    req("pref_education_level", "Education Level (1-6)", FieldKind::Number),
    req("positions_available", "Positions Available", FieldKind::Number),
    req("start_date", "Start Date", FieldKind::Date),
    req("end_date", "End Date", FieldKind::Date),
    req(
      "preferred_fields",
      "Preferred Field",
      FieldKind::Select(ReferenceList::Industries),
    ),
    req("required_skills", "Required Skill", FieldKind::Select(ReferenceList::Skills)),
  ],
  catch_all:         CatchAll { rules: DATE_RULES, fallback: &["form"] },
  success_message:   "Preference updated successfully!",
  failure_message:   SERVER_ERROR,
  transport_message: SERVER_ERROR,
  invalid_message:   None,
  on_success:        OnSuccess::Stay,
};

// ─── Logbook ─────────────────────────────────────────────────────────────────

pub static LOGBOOK: FormSpec = FormSpec {
  title:             "Logbook Entry",
  fields:            &[
    req("student_id", "Student ID", FieldKind::ReadOnly),
    req("org_name", "Organisation Name", FieldKind::Text),
    req("week_number", "Week Number (1-10)", FieldKind::Number),
    req("log_entry", "Log Entry (max 300 words)", FieldKind::Multiline),
  ],
  catch_all:         CatchAll { rules: &[], fallback: &["log_entry"] },
  success_message:   "Logbook entry submitted successfully!",
  failure_message:   FIX_ERRORS,
  transport_message: "An error occurred. Please try again.",
  invalid_message:   Some(FIX_ERRORS),
  on_success:        OnSuccess::Reset { keep: &["student_id"] },
};

// ─── Profiles ────────────────────────────────────────────────────────────────

pub static STUDENT_PROFILE: FormSpec = FormSpec {
  title:             "Edit Profile",
  fields:            &[
    opt("first_name", "First Name", FieldKind::Text),
    opt("last_name", "Last Name", FieldKind::Text),
    opt("student_email", "Email", FieldKind::Email),
    opt("student_contact_number", "Contact Number", FieldKind::Text),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Profile updated successfully",
  failure_message:   "Failed to update profile.",
  transport_message: "Failed to update profile.",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::StudentDashboard),
};

pub static ORGANISATION_PROFILE: FormSpec = FormSpec {
  title:             "Edit Organisation Profile",
  fields:            &[
    opt("org_name", "Organisation Name", FieldKind::Text),
    opt("contact_email", "Email", FieldKind::Email),
    opt("contact_number", "Contact Number", FieldKind::Text),
    opt("address", "Address", FieldKind::Text),
  ],
  catch_all:         CatchAll::FORM,
  success_message:   "Organisation profile updated successfully!",
  failure_message:   "Update failed.",
  transport_message: "Update failed.",
  invalid_message:   None,
  on_success:        OnSuccess::Navigate(Route::OrganisationDashboard),
};

const PASSWORD_FIELDS: &[FieldSpec] = &[
  opt("current_password", "Current Password", FieldKind::Password),
  opt("new_password", "New Password", FieldKind::Password),
  opt("confirm_password", "Confirm New Password", FieldKind::Password),
];

pub static STUDENT_PASSWORD: FormSpec = FormSpec {
  title:             "Change Password",
  fields:            PASSWORD_FIELDS,
  catch_all:         CatchAll::FORM,
  success_message:   "Password changed successfully",
  failure_message:   "Failed to change password.",
  transport_message: "Failed to change password.",
  invalid_message:   None,
  on_success:        OnSuccess::Reset { keep: &[] },
};

pub static ORGANISATION_PASSWORD: FormSpec = FormSpec {
  title:             "Change Password",
  fields:            PASSWORD_FIELDS,
  catch_all:         CatchAll::FORM,
  success_message:   "Password changed successfully.",
  failure_message:   "Password change failed.",
  transport_message: "Password change failed.",
  invalid_message:   None,
  on_success:        OnSuccess::Reset { keep: &[] },
};

// ─── Admin management ────────────────────────────────────────────────────────

pub static ADMIN_STUDENT: FormSpec = FormSpec {
  title:             "Student",
  fields:            STUDENT_FIELDS,
  catch_all:         CatchAll::FORM,
  success_message:   "Student created successfully!",
  failure_message:   "Operation failed",
  transport_message: "Operation failed",
  invalid_message:   None,
  on_success:        OnSuccess::Reset { keep: &[] },
};

pub static ADMIN_ORGANISATION: FormSpec = FormSpec {
  title:             "Organisation",
  fields:            ORGANISATION_FIELDS,
  catch_all:         CatchAll::FORM,
  success_message:   "Organization created successfully!",
  failure_message:   "Operation failed",
  transport_message: "Operation failed",
  invalid_message:   None,
  on_success:        OnSuccess::Reset { keep: &[] },
};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catch_all_targets_are_fields_of_their_form() {
    for spec in [&STUDENT_PREFERENCE, &ORGANISATION_REGISTER, &LOGBOOK] {
      for target in spec.catch_all.fallback {
        assert!(spec.field(target).is_some(), "{} lacks {target}", spec.title);
      }
    }
    for rule in ORGANISATION_PREFERENCE.catch_all.rules {
      for target in rule.fields {
        assert!(ORGANISATION_PREFERENCE.field(target).is_some());
      }
    }
  }

  #[test]
  fn every_select_is_required() {
    let all = [
      &ORGANISATION_REGISTER,
      &STUDENT_PREFERENCE,
      &STUDENT_PREFERENCE_EDIT,
      &ORGANISATION_PREFERENCE,
      &ORGANISATION_PREFERENCE_EDIT,
      &ADMIN_ORGANISATION,
    ];
    for spec in all {
      for f in spec.fields.iter().filter(|f| matches!(f.kind, FieldKind::Select(_))) {
        assert_eq!(f.required, Requirement::Required, "{}.{}", spec.title, f.name);
      }
    }
  }
}
