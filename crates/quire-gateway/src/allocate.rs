use quire_store::{Commit, StoreError, VersionedStore};
use quire_types::Metadata;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};

/// Characters random names are drawn from.
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of a random name, excluding the extension.
pub const NAME_LEN: usize = 8;

/// Draw an 8-letter name, each letter uniform over `[a-zA-Z]`.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NAME_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Create a document under a fresh random name with `extension`.
///
/// Retries with a new name whenever the store reports a collision, up to
/// `max_attempts` times, then fails with
/// [`GatewayError::AllocationExhausted`].
pub fn allocate(
    store: &dyn VersionedStore,
    extension: &str,
    content: &[u8],
    meta: &Metadata,
    max_attempts: u32,
) -> GatewayResult<(String, Commit)> {
    allocate_with(&mut rand::thread_rng(), store, extension, content, meta, max_attempts)
}

/// [`allocate`] with an explicit random source.
pub fn allocate_with<R: Rng + ?Sized>(
    rng: &mut R,
    store: &dyn VersionedStore,
    extension: &str,
    content: &[u8],
    meta: &Metadata,
    max_attempts: u32,
) -> GatewayResult<(String, Commit)> {
    for attempt in 1..=max_attempts {
        let file = format!("{}.{extension}", random_name(rng));
        match store.create(&file, content, meta) {
            Ok(commit) => {
                debug!(file = %file, attempt, "allocated name");
                return Ok((file, commit));
            }
            Err(StoreError::FileExists(_)) => {
                warn!(file = %file, attempt, "random name collided, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(GatewayError::AllocationExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_store::InMemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn names_are_eight_ascii_letters() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let name = random_name(&mut rng);
            assert_eq!(name.len(), NAME_LEN);
            assert!(name.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn both_cases_are_drawn() {
        let mut rng = StdRng::seed_from_u64(2);
        let letters: String = (0..50).map(|_| random_name(&mut rng)).collect();
        assert!(letters.bytes().any(|b| b.is_ascii_lowercase()));
        assert!(letters.bytes().any(|b| b.is_ascii_uppercase()));
    }

    #[test]
    fn allocates_with_extension() {
        let store = InMemoryStore::new();
        let (file, commit) = allocate(&store, "pl", b"foo.", &Metadata::new(), 4).unwrap();
        assert!(file.ends_with(".pl"));
        assert_eq!(file.len(), NAME_LEN + 3);
        assert_eq!(commit.name, file);
        assert_eq!(store.read(&file).unwrap().content, b"foo.");
    }

    #[test]
    fn retries_after_collision() {
        let store = InMemoryStore::new();
        let taken = format!("{}.pl", random_name(&mut StdRng::seed_from_u64(7)));
        store.create(&taken, b"existing", &Metadata::new()).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let (file, _) = allocate_with(&mut rng, &store, "pl", b"new", &Metadata::new(), 4).unwrap();
        assert_ne!(file, taken);
        assert_eq!(store.read(&taken).unwrap().content, b"existing");
        assert_eq!(store.read(&file).unwrap().content, b"new");
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let store = InMemoryStore::new();
        let taken = format!("{}.pl", random_name(&mut StdRng::seed_from_u64(9)));
        store.create(&taken, b"", &Metadata::new()).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let err = allocate_with(&mut rng, &store, "pl", b"", &Metadata::new(), 1).unwrap_err();
        assert!(matches!(err, GatewayError::AllocationExhausted { attempts: 1 }));
    }

    #[test]
    fn other_store_errors_are_not_retried() {
        let store = InMemoryStore::new();
        let err = allocate(&store, "p/l", b"", &Metadata::new(), 4).unwrap_err();
        assert!(matches!(err, GatewayError::Store(StoreError::InvalidName { .. })));
    }
}
