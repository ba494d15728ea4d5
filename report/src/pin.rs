//! Invitation PINs for externally shared surveys.

use std::collections::HashSet;

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Length of invitation PINs.
pub const PIN_LEN: usize = 8;

/// One invitation slot for an external survey.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invitation {
    pub pin: String,
    #[serde(rename = "id_encuesta")]
    pub survey_id: i64,
    /// Name the respondent registered under, once the PIN has been used.
    #[serde(rename = "usada_por", default)]
    pub used_by: Option<String>,
}

/// Generate one PIN: uppercase alphanumeric, fixed length.
pub fn generate_pin() -> String {
    let mut rng = rand::thread_rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .map(char::from)
        .take(PIN_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Inbound PIN format check. PINs are compared uppercased.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LEN
        && pin
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Generate `count` fresh invitations with pairwise distinct PINs.
pub fn generate_invitations(survey_id: i64, count: usize) -> Vec<Invitation> {
    let mut seen = HashSet::new();
    let mut invitations = Vec::with_capacity(count);
    while invitations.len() < count {
        let pin = generate_pin();
        if seen.insert(pin.clone()) {
            invitations.push(Invitation {
                pin,
                survey_id,
                used_by: None,
            });
        }
    }
    invitations
}

/// Look up an invitation by PIN, uppercasing the inbound value first.
pub fn find_invitation<'a>(invitations: &'a [Invitation], pin: &str) -> Option<&'a Invitation> {
    let pin = pin.to_uppercase();
    if !is_valid_pin(&pin) {
        return None;
    }
    invitations.iter().find(|invitation| invitation.pin == pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pins_have_fixed_length_and_charset() {
        let pin = generate_pin();
        assert_eq!(pin.len(), PIN_LEN);
        assert!(is_valid_pin(&pin));
    }

    #[test]
    fn invalid_formats_are_rejected() {
        assert!(!is_valid_pin("short"));
        assert!(!is_valid_pin("abcd1234"));
        assert!(!is_valid_pin("ABCD-123"));
        assert!(is_valid_pin("ABCD1234"));
    }

    #[test]
    fn invitations_are_unique_and_bound_to_the_survey() {
        let invitations = generate_invitations(5, 50);
        assert_eq!(invitations.len(), 50);
        let pins: HashSet<&str> = invitations.iter().map(|i| i.pin.as_str()).collect();
        assert_eq!(pins.len(), 50);
        assert!(invitations.iter().all(|i| i.survey_id == 5));
    }

    #[test]
    fn lookup_is_case_insensitive_on_input() {
        let invitations = vec![Invitation {
            pin: "ABCD1234".to_string(),
            survey_id: 1,
            used_by: None,
        }];
        assert!(find_invitation(&invitations, "abcd1234").is_some());
        assert!(find_invitation(&invitations, "ZZZZ9999").is_none());
        assert!(find_invitation(&invitations, "nope").is_none());
    }
}
