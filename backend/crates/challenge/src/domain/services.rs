//! Domain Services
//!
//! Pure protocol logic: the orchestrator decision, code generation,
//! diagnostics tagging and answer comparison. Nothing here performs I/O.

use crate::domain::entities::Session;
use crate::domain::value_objects::{AttemptLimit, Decision, OtpCode};
use platform::crypto::{constant_time_eq, hmac_sha256};
use rand::Rng;

/// Decide the next transition from the attempt history alone
///
/// Only the last attempt can grant; an earlier success followed by a
/// failure never does. The limit check precedes the retry path, so the
/// `limit`-th failed round fails the login.
pub fn decide(session: &Session, limit: AttemptLimit) -> Decision {
    match session.last() {
        None => Decision::Issue,
        Some(last) if last.challenge_result => Decision::Grant,
        Some(_) if session.len() >= limit.get() => Decision::Fail,
        Some(_) => Decision::Issue,
    }
}

/// Draw a code uniformly from `[100000, 999999]`
pub fn generate_code<R: Rng>(rng: &mut R) -> OtpCode {
    OtpCode::from_number(rng.random_range(OtpCode::MIN..=OtpCode::MAX))
}

/// Diagnostics tag for a challenge
///
/// Keyed so that the six-digit space cannot be brute-forced from the tag.
pub fn challenge_tag(code: &OtpCode, key: &[u8; 32]) -> String {
    let mac = hmac_sha256(key, code.as_str().as_bytes());
    let hex: String = mac[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("CODE-{}", hex)
}

/// Exact, case-sensitive equality with no trimming
pub fn answers_match(expected: &str, submitted: &str) -> bool {
    constant_time_eq(expected.as_bytes(), submitted.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChallengeAttempt;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(results: &[bool]) -> Session {
        results.iter().copied().map(ChallengeAttempt::custom).collect()
    }

    #[test]
    fn test_decide_scenarios() {
        let limit = AttemptLimit::DEFAULT;
        assert_eq!(decide(&session(&[]), limit), Decision::Issue);
        assert_eq!(decide(&session(&[false]), limit), Decision::Issue);
        assert_eq!(decide(&session(&[false, false, false]), limit), Decision::Fail);
        assert_eq!(decide(&session(&[false, true]), limit), Decision::Grant);
    }

    #[test]
    fn test_stale_success_never_grants() {
        let limit = AttemptLimit::DEFAULT;
        assert_eq!(decide(&session(&[true, false]), limit), Decision::Issue);
        assert_eq!(decide(&session(&[true, false, false]), limit), Decision::Fail);
    }

    #[test]
    fn test_success_on_last_allowed_round_grants() {
        let limit = AttemptLimit::DEFAULT;
        assert_eq!(decide(&session(&[false, false, true]), limit), Decision::Grant);
        // Histories past the limit still honor a final success
        assert_eq!(
            decide(&session(&[false, false, false, true]), limit),
            Decision::Grant
        );
    }

    #[test]
    fn test_decide_respects_custom_limit() {
        let one = AttemptLimit::new(1).unwrap();
        assert_eq!(decide(&session(&[]), one), Decision::Issue);
        assert_eq!(decide(&session(&[false]), one), Decision::Fail);

        let five = AttemptLimit::new(5).unwrap();
        assert_eq!(decide(&session(&[false; 4]), five), Decision::Issue);
        assert_eq!(decide(&session(&[false; 5]), five), Decision::Fail);
    }

    #[test]
    fn test_generated_codes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let code = generate_code(&mut rng);
            assert!(OtpCode::is_well_formed(code.as_str()), "{}", code.as_str());
            let value: u32 = code.as_str().parse().unwrap();
            assert!((OtpCode::MIN..=OtpCode::MAX).contains(&value));
        }
    }

    #[test]
    fn test_generated_codes_are_independent() {
        let mut rng = rand::rng();
        let codes: std::collections::HashSet<String> = (0..50)
            .map(|_| generate_code(&mut rng).as_str().to_owned())
            .collect();
        // 50 draws from 900k values; a handful of collisions at most
        assert!(codes.len() > 45);
    }

    #[test]
    fn test_challenge_tag_is_keyed() {
        let code = OtpCode::from_number(482913);
        let tag = challenge_tag(&code, &[1u8; 32]);

        assert!(tag.starts_with("CODE-"));
        assert_eq!(tag.len(), "CODE-".len() + 8);
        assert!(!tag.contains("482913"));
        assert_eq!(tag, challenge_tag(&code, &[1u8; 32]));
        assert_ne!(tag, challenge_tag(&code, &[2u8; 32]));
    }

    #[test]
    fn test_answers_match_exactly() {
        assert!(answers_match("482913", "482913"));
        assert!(!answers_match("482913", "482914"));
        assert!(!answers_match("482913", " 482913"));
        assert!(!answers_match("482913", "482913\n"));
        assert!(!answers_match("482913", ""));
        assert!(!answers_match("abc123", "ABC123"));
    }
}
