//! Deterministic peer generation from seed definitions.
//!
//! The same seed value always produces identical output.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::ExamplePeerSeed;
use crate::validation::{
    DISPLAY_NAME_MAX, email_local_part, is_valid_display_name, sanitize_display_name,
};

/// Maximum number of attempts to generate a valid display name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Upper bound on generated focus minutes per peer.
const MAX_TOTAL_MINUTES: u64 = 3_000;

/// Upper bound on generated completed goals per peer.
const MAX_GOALS_COMPLETED: u32 = 12;

// Mirrors `monk::domain::progression`. This crate sits below `monk` and cannot
// import them; monk's peer directory tests fail if the two drift apart.
const EXPERIENCE_PER_MINUTE: u64 = 10;
const GOAL_COMPLETION_BONUS: u64 = 500;

/// Domain used for generated email addresses.
const EMAIL_DOMAIN: &str = "example.com";

/// Generates example peers from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG. Each
/// generated peer has:
///
/// - A deterministic UUID
/// - A display name accepted by [`crate::is_valid_display_name`]
/// - An email derived from the display name
/// - A country drawn from the registry
/// - Focus minutes and goals, with experience derived from both
///
/// # Errors
///
/// Returns [`GenerationError`] if display name generation fails after
/// maximum retries or the registry has no country codes.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_peers};
///
/// let json = r#"{
///     "version": 1,
///     "countryCodes": ["GB"],
///     "seeds": [{"name": "test", "seed": 42, "peerCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let peers = generate_example_peers(&registry, seed_def).expect("generated");
///
/// assert_eq!(peers.len(), 3);
/// let again = generate_example_peers(&registry, seed_def).expect("generated");
/// assert_eq!(peers, again);
/// ```
pub fn generate_example_peers(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExamplePeerSeed>, GenerationError> {
    if registry.country_codes().is_empty() {
        return Err(GenerationError::NoCountryCodes);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut peers = Vec::with_capacity(seed_def.peer_count());

    for _ in 0..seed_def.peer_count() {
        let peer = generate_single_peer(&mut rng, registry)?;
        peers.push(peer);
    }

    Ok(peers)
}

fn generate_single_peer(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
) -> Result<ExamplePeerSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let display_name = generate_display_name(rng)?;
    let country = registry
        .country_codes()
        .choose(rng)
        .cloned()
        .ok_or(GenerationError::NoCountryCodes)?;

    let total_minutes = rng.random_range(0..=MAX_TOTAL_MINUTES);
    let goals_completed = rng.random_range(0..=MAX_GOALS_COMPLETED);
    let experience = total_minutes
        .saturating_mul(EXPERIENCE_PER_MINUTE)
        .saturating_add(u64::from(goals_completed).saturating_mul(GOAL_COMPLETION_BONUS));

    // The id suffix keeps addresses unique when two peers share a name.
    let suffix = id.simple().to_string();
    let email = format!(
        "{}.{}@{EMAIL_DOMAIN}",
        email_local_part(&display_name),
        suffix.get(..6).unwrap_or(&suffix)
    );

    Ok(ExamplePeerSeed {
        id,
        display_name,
        email,
        country,
        experience,
        total_minutes,
        goals_completed,
    })
}

/// Builds "first last" names, sanitised and truncated, retrying until one
/// validates or `MAX_NAME_ATTEMPTS` is reached.
fn generate_display_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = sanitize_display_name(&format!("{first} {last}"));
        let truncated: String = candidate.chars().take(DISPLAY_NAME_MAX).collect();

        if is_valid_display_name(&truncated) {
            return Ok(truncated);
        }
    }

    Err(GenerationError::DisplayNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}
