//! Registration requests and the reasons they are turned away.
//!
//! Validation happens before any write. A rejection carries a stable code for
//! adapters and a display message for people.

use zeroize::Zeroizing;

use super::auth::PASSWORD_MIN;
use super::goal::GoalSeed;
use super::user::{CountryCode, DisplayName, Email, User, UserValidationError};

/// Daily screen-time goal used when the request does not name one.
pub const DEFAULT_DAILY_SCREEN_TIME_MINUTES: u32 = 480;

/// Raw registration input as typed by a person.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub country: String,
    pub daily_screen_time_goal: Option<u32>,
    pub goals: GoalSeed,
}

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationRejection {
    MissingFields,
    PasswordTooShort { min: usize },
    MissingCountry,
    NoGoals,
    InvalidField(UserValidationError),
    EmailInUse,
}

impl RegistrationRejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::MissingCountry => "missing_country",
            Self::NoGoals => "no_goals",
            Self::InvalidField(_) => "invalid_field",
            Self::EmailInUse => "email_in_use",
        }
    }

    /// Message shown to the person registering.
    pub fn message(&self) -> String {
        match self {
            Self::MissingFields => "Please fill in all fields".to_owned(),
            Self::PasswordTooShort { min } => {
                format!("Password must be at least {min} characters")
            }
            Self::MissingCountry => "Please select your country".to_owned(),
            Self::NoGoals => "Please add at least one goal to get started".to_owned(),
            Self::InvalidField(error) => {
                let mut message = error.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                message
            }
            Self::EmailInUse => "Registration failed. Email might already be in use.".to_owned(),
        }
    }
}

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account was created and signed in.
    Registered(User),
    /// Nothing was written.
    Rejected(RegistrationRejection),
}

/// Registration input that passed validation.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedRegistration {
    pub email: Email,
    pub display_name: DisplayName,
    pub country: CountryCode,
    pub password: Zeroizing<String>,
    pub daily_screen_time_goal: u32,
    pub goals: GoalSeed,
}

impl RegistrationRequest {
    /// Check the request in the order a person fills the form in.
    pub(crate) fn validate(self) -> Result<ValidatedRegistration, RegistrationRejection> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(RegistrationRejection::MissingFields);
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationRejection::PasswordTooShort { min: PASSWORD_MIN });
        }
        if self.country.trim().is_empty() {
            return Err(RegistrationRejection::MissingCountry);
        }
        if !self.goals.has_any_title() {
            return Err(RegistrationRejection::NoGoals);
        }

        let email = Email::new(self.email).map_err(RegistrationRejection::InvalidField)?;
        let display_name =
            DisplayName::new(self.name).map_err(RegistrationRejection::InvalidField)?;
        let country =
            CountryCode::new(self.country).map_err(RegistrationRejection::InvalidField)?;

        Ok(ValidatedRegistration {
            email,
            display_name,
            country,
            password: self.password,
            daily_screen_time_goal: self
                .daily_screen_time_goal
                .unwrap_or(DEFAULT_DAILY_SCREEN_TIME_MINUTES),
            goals: self.goals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: Zeroizing::new("secret1".into()),
            country: "gb".into(),
            daily_screen_time_goal: None,
            goals: GoalSeed {
                short: vec!["Read".into()],
                medium: Vec::new(),
                long: Vec::new(),
            },
        }
    }

    #[rstest]
    fn valid_request_applies_defaults(request: RegistrationRequest) {
        let validated = request.validate().expect("valid request");

        assert_eq!(validated.country.as_ref(), "GB");
        assert_eq!(
            validated.daily_screen_time_goal,
            DEFAULT_DAILY_SCREEN_TIME_MINUTES
        );
    }

    #[rstest]
    fn whitespace_password_of_minimum_length_is_accepted(mut request: RegistrationRequest) {
        request.password = Zeroizing::new("      ".into());

        let validated = request.validate().expect("six spaces are a valid password");

        assert_eq!(validated.password.as_str(), "      ");
    }

    #[rstest]
    fn long_display_names_are_accepted(mut request: RegistrationRequest) {
        request.name = "Ada ".repeat(40);

        let validated = request.validate().expect("long names are valid");

        assert_eq!(validated.display_name.as_ref(), "Ada ".repeat(40).trim_end());
    }

    #[rstest]
    #[case::blank_name(|r: &mut RegistrationRequest| r.name = "  ".into(), RegistrationRejection::MissingFields)]
    #[case::blank_email(|r: &mut RegistrationRequest| r.email = String::new(), RegistrationRejection::MissingFields)]
    #[case::empty_password(|r: &mut RegistrationRequest| r.password = Zeroizing::new(String::new()), RegistrationRejection::MissingFields)]
    #[case::short_blank_password(|r: &mut RegistrationRequest| r.password = Zeroizing::new("   ".into()), RegistrationRejection::PasswordTooShort { min: 6 })]
    #[case::short_password(|r: &mut RegistrationRequest| r.password = Zeroizing::new("abc12".into()), RegistrationRejection::PasswordTooShort { min: 6 })]
    #[case::blank_country(|r: &mut RegistrationRequest| r.country = String::new(), RegistrationRejection::MissingCountry)]
    #[case::no_goals(|r: &mut RegistrationRequest| r.goals.short = vec!["   ".into()], RegistrationRejection::NoGoals)]
    #[case::bad_country(|r: &mut RegistrationRequest| r.country = "Atlantis".into(), RegistrationRejection::InvalidField(UserValidationError::InvalidCountry))]
    fn invalid_requests_are_rejected(
        mut request: RegistrationRequest,
        #[case] mutate: fn(&mut RegistrationRequest),
        #[case] expected: RegistrationRejection,
    ) {
        mutate(&mut request);
        let rejection = request.validate().expect_err("request must be rejected");
        assert_eq!(rejection, expected);
    }

    #[rstest]
    #[case(RegistrationRejection::MissingFields, "missing_fields", "Please fill in all fields")]
    #[case(
        RegistrationRejection::PasswordTooShort { min: 6 },
        "password_too_short",
        "Password must be at least 6 characters"
    )]
    #[case(
        RegistrationRejection::NoGoals,
        "no_goals",
        "Please add at least one goal to get started"
    )]
    #[case(
        RegistrationRejection::EmailInUse,
        "email_in_use",
        "Registration failed. Email might already be in use."
    )]
    #[case(
        RegistrationRejection::InvalidField(UserValidationError::InvalidCountry),
        "invalid_field",
        "Country must be a two-letter ISO 3166 code"
    )]
    fn rejections_expose_code_and_message(
        #[case] rejection: RegistrationRejection,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        assert_eq!(rejection.code(), code);
        assert_eq!(rejection.message(), message);
    }
}
