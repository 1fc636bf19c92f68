//! Field rules applied to a user before it may be persisted.
//!
//! Rules run in a fixed order and stop at the first failure, so a caller only
//! ever sees one message per request. The messages are part of the public
//! API and must not change.
//!
//! # Rule order for user creation
//!
//! 1. The record itself is present
//! 2. `cin` is present and not blank
//! 3. `cin` is exactly 8 characters long (as submitted, without trimming)
//! 4. `cin` contains only ASCII digits
//! 5. `name` is present and not blank
//! 6. `cinReleaseDate` is present
//! 7. `cinReleaseDate` is not after today

use chrono::NaiveDate;

use crate::domain::entities::NewUser;

/// Required length of a CIN.
pub const CIN_LENGTH: usize = 8;

/// Wire format of release dates.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single violated rule.
///
/// The `Display` text is the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("User data cannot be null.")]
    MissingUserData,
    #[error("CIN cannot be null or empty.")]
    MissingCin,
    #[error("CIN must be 8 characters long.")]
    InvalidCinLength,
    #[error("CIN must contain only numbers.")]
    NonNumericCin,
    #[error("Name cannot be null or empty.")]
    MissingName,
    #[error("CIN Release Date cannot be null.")]
    MissingReleaseDate,
    #[error("CIN Release Date cannot be in the future.")]
    FutureReleaseDate,
    #[error("Invalid CIN format in URL.")]
    InvalidCinInPath,
    #[error("Release Date parameter ('releaseDate') cannot be null.")]
    MissingReleaseDateParam,
    #[error("Release Date parameter ('releaseDate') must be a valid ISO date (YYYY-MM-DD).")]
    MalformedReleaseDateParam,
}

/// Unvalidated user fields, as received from a client.
///
/// Every field a rule checks is optional here; [`validate_new_user`] turns a
/// candidate into a [`NewUser`] or reports the first broken rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCandidate {
    pub name: Option<String>,
    pub cin: Option<String>,
    pub cin_release_date: Option<NaiveDate>,
    pub is_married: bool,
}

/// Runs the creation rules against a candidate.
///
/// `today` is the reference date for the release-date rule; a release date
/// equal to `today` is accepted.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first rule the candidate breaks.
pub fn validate_new_user(
    candidate: Option<UserCandidate>,
    today: NaiveDate,
) -> Result<NewUser, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::MissingUserData)?;

    let cin = check_cin(candidate.cin)?;

    let name = match candidate.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::MissingName),
    };

    let cin_release_date = candidate
        .cin_release_date
        .ok_or(ValidationError::MissingReleaseDate)?;

    if cin_release_date > today {
        return Err(ValidationError::FutureReleaseDate);
    }

    Ok(NewUser {
        name,
        cin,
        cin_release_date,
        is_married: candidate.is_married,
    })
}

fn check_cin(cin: Option<String>) -> Result<String, ValidationError> {
    let cin = match cin {
        Some(cin) if !cin.trim().is_empty() => cin,
        _ => return Err(ValidationError::MissingCin),
    };

    if cin.chars().count() != CIN_LENGTH {
        return Err(ValidationError::InvalidCinLength);
    }

    if !cin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonNumericCin);
    }

    Ok(cin)
}

/// Returns `true` if `cin` is exactly 8 ASCII digits.
pub fn is_well_formed_cin(cin: &str) -> bool {
    cin.len() == CIN_LENGTH && cin.bytes().all(|b| b.is_ascii_digit())
}

/// Pre-check for a CIN taken from a URL path.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCinInPath`] if the CIN is blank, has the
/// wrong length, or contains anything other than ASCII digits.
pub fn validate_lookup_cin(cin: &str) -> Result<&str, ValidationError> {
    if is_well_formed_cin(cin) {
        Ok(cin)
    } else {
        Err(ValidationError::InvalidCinInPath)
    }
}

/// Parses the `releaseDate` query parameter.
///
/// # Errors
///
/// Returns [`ValidationError::MissingReleaseDateParam`] if the parameter is
/// absent or blank, and [`ValidationError::MalformedReleaseDateParam`] if it
/// is not an ISO calendar date.
pub fn parse_release_date_param(raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw.trim(),
        _ => return Err(ValidationError::MissingReleaseDateParam),
    };

    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT)
        .map_err(|_| ValidationError::MalformedReleaseDateParam)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_candidate() -> UserCandidate {
        UserCandidate {
            name: Some("Integration User".to_string()),
            cin: Some("12345678".to_string()),
            cin_release_date: Some(NaiveDate::from_ymd_opt(2022, 5, 10).unwrap()),
            is_married: true,
        }
    }

    fn rejected(candidate: UserCandidate) -> ValidationError {
        validate_new_user(Some(candidate), today()).unwrap_err()
    }

    #[test]
    fn test_valid_candidate_passes() {
        let new_user = validate_new_user(Some(valid_candidate()), today()).unwrap();

        assert_eq!(new_user.name, "Integration User");
        assert_eq!(new_user.cin, "12345678");
        assert_eq!(
            new_user.cin_release_date,
            NaiveDate::from_ymd_opt(2022, 5, 10).unwrap()
        );
        assert!(new_user.is_married);
    }

    #[test]
    fn test_missing_record() {
        let err = validate_new_user(None, today()).unwrap_err();
        assert_eq!(err, ValidationError::MissingUserData);
        assert_eq!(err.to_string(), "User data cannot be null.");
    }

    #[test]
    fn test_missing_or_blank_cin() {
        let mut candidate = valid_candidate();
        candidate.cin = None;
        assert_eq!(rejected(candidate), ValidationError::MissingCin);

        let mut candidate = valid_candidate();
        candidate.cin = Some("   ".to_string());
        assert_eq!(rejected(candidate), ValidationError::MissingCin);
    }

    #[test]
    fn test_cin_length_is_checked_before_digits() {
        for cin in ["1234567", "123456789", "ABC", "12 3456789"] {
            let mut candidate = valid_candidate();
            candidate.cin = Some(cin.to_string());
            assert_eq!(
                rejected(candidate),
                ValidationError::InvalidCinLength,
                "cin {cin:?}"
            );
        }
    }

    #[test]
    fn test_cin_length_counts_surrounding_whitespace() {
        let mut candidate = valid_candidate();
        candidate.cin = Some(" 1234567".to_string());
        assert_eq!(rejected(candidate), ValidationError::NonNumericCin);

        let mut candidate = valid_candidate();
        candidate.cin = Some(" 12345678 ".to_string());
        assert_eq!(rejected(candidate), ValidationError::InvalidCinLength);
    }

    #[test]
    fn test_non_numeric_cin() {
        for cin in ["1234567A", "ABCDEFGH", "-1234567", "1234.567", "١٢٣٤٥٦٧٨"] {
            let mut candidate = valid_candidate();
            candidate.cin = Some(cin.to_string());
            assert_eq!(
                rejected(candidate),
                ValidationError::NonNumericCin,
                "cin {cin:?}"
            );
        }
    }

    #[test]
    fn test_missing_or_blank_name() {
        let mut candidate = valid_candidate();
        candidate.name = None;
        assert_eq!(rejected(candidate), ValidationError::MissingName);

        let mut candidate = valid_candidate();
        candidate.name = Some("\t ".to_string());
        assert_eq!(rejected(candidate), ValidationError::MissingName);
    }

    #[test]
    fn test_missing_release_date() {
        let mut candidate = valid_candidate();
        candidate.cin_release_date = None;
        assert_eq!(rejected(candidate), ValidationError::MissingReleaseDate);
    }

    #[test]
    fn test_release_date_today_is_accepted() {
        let mut candidate = valid_candidate();
        candidate.cin_release_date = Some(today());
        assert!(validate_new_user(Some(candidate), today()).is_ok());
    }

    #[test]
    fn test_release_date_tomorrow_is_rejected() {
        let mut candidate = valid_candidate();
        candidate.cin_release_date = today().succ_opt();
        let err = rejected(candidate);
        assert_eq!(err, ValidationError::FutureReleaseDate);
        assert_eq!(err.to_string(), "CIN Release Date cannot be in the future.");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let candidate = UserCandidate {
            name: None,
            cin: Some("1234567A".to_string()),
            cin_release_date: None,
            is_married: false,
        };
        assert_eq!(rejected(candidate), ValidationError::NonNumericCin);

        let candidate = UserCandidate {
            name: Some(" ".to_string()),
            cin: Some("12345678".to_string()),
            cin_release_date: today().succ_opt(),
            is_married: false,
        };
        assert_eq!(rejected(candidate), ValidationError::MissingName);
    }

    #[test]
    fn test_name_is_kept_as_submitted() {
        let mut candidate = valid_candidate();
        candidate.name = Some("  Padded Name ".to_string());
        let new_user = validate_new_user(Some(candidate), today()).unwrap();
        assert_eq!(new_user.name, "  Padded Name ");
    }

    #[test]
    fn test_validate_lookup_cin() {
        assert_eq!(validate_lookup_cin("00000000"), Ok("00000000"));

        for cin in ["", "        ", "1234567", "123456789", "INVALID", "1234567A"] {
            assert_eq!(
                validate_lookup_cin(cin),
                Err(ValidationError::InvalidCinInPath),
                "cin {cin:?}"
            );
        }
    }

    #[test]
    fn test_parse_release_date_param() {
        assert_eq!(
            parse_release_date_param(Some("2023-01-15")),
            Ok(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        assert_eq!(
            parse_release_date_param(None),
            Err(ValidationError::MissingReleaseDateParam)
        );
        assert_eq!(
            parse_release_date_param(Some("")),
            Err(ValidationError::MissingReleaseDateParam)
        );
        assert_eq!(
            parse_release_date_param(Some("15/01/2023")),
            Err(ValidationError::MalformedReleaseDateParam)
        );
        assert_eq!(
            parse_release_date_param(Some("2023-02-30")),
            Err(ValidationError::MalformedReleaseDateParam)
        );
    }
}
