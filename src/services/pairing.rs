use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ServiceError, ServiceResult};
use crate::models::RegistrantRow;

/// One round of disjoint two-person pairs over a roster, plus the leftover
/// registrant when the roster size is odd.
pub struct PairedRoster {
    pub pairs: Vec<(RegistrantRow, RegistrantRow)>,
    pub unmatched: Option<RegistrantRow>,
}

/// Shuffle the roster with a uniform Fisher–Yates permutation and partition
/// it into consecutive pairs. The generator is supplied by the caller, so
/// pairings are reproducible under test with a seeded RNG.
pub fn pair_roster<R: Rng + ?Sized>(
    mut roster: Vec<RegistrantRow>,
    rng: &mut R,
) -> ServiceResult<PairedRoster> {
    if roster.len() < 2 {
        return Err(ServiceError::InsufficientParticipants {
            active: roster.len(),
        });
    }

    roster.shuffle(rng);

    let mut pairs = Vec::with_capacity(roster.len() / 2);
    let mut chunks = roster.chunks_exact(2);
    for chunk in &mut chunks {
        pairs.push((chunk[0].clone(), chunk[1].clone()));
    }
    let unmatched = chunks.remainder().first().cloned();

    Ok(PairedRoster { pairs, unmatched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn roster_of(n: usize) -> Vec<RegistrantRow> {
        (0..n)
            .map(|i| RegistrantRow {
                id: format!("r{i}"),
                code: format!("USER{i:03}"),
                full_name: format!("Registrant {i}"),
                role: Role::Participant,
                active: true,
                created_at: "2026-08-01T00:00:00Z".to_string(),
            })
            .collect()
    }

    #[test]
    fn even_roster_pairs_everyone() {
        let mut rng = StdRng::seed_from_u64(7);
        let paired = pair_roster(roster_of(8), &mut rng).unwrap();
        assert_eq!(paired.pairs.len(), 4);
        assert!(paired.unmatched.is_none());
    }

    #[test]
    fn pairs_are_disjoint_and_members_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let paired = pair_roster(roster_of(10), &mut rng).unwrap();

        let mut seen = HashSet::new();
        for (a, b) in &paired.pairs {
            assert_ne!(a.id, b.id);
            assert!(seen.insert(a.id.clone()), "{} paired twice", a.id);
            assert!(seen.insert(b.id.clone()), "{} paired twice", b.id);
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn odd_roster_reports_one_unmatched() {
        let mut rng = StdRng::seed_from_u64(3);
        let paired = pair_roster(roster_of(5), &mut rng).unwrap();
        assert_eq!(paired.pairs.len(), 2);

        let unmatched = paired.unmatched.expect("leftover must be reported");
        let mut covered: HashSet<String> = HashSet::new();
        for (a, b) in &paired.pairs {
            covered.insert(a.id.clone());
            covered.insert(b.id.clone());
        }
        assert_eq!(covered.len(), 4);
        assert!(!covered.contains(&unmatched.id));
    }

    #[test]
    fn rosters_below_two_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pair_roster(roster_of(0), &mut rng),
            Err(ServiceError::InsufficientParticipants { active: 0 })
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pair_roster(roster_of(1), &mut rng),
            Err(ServiceError::InsufficientParticipants { active: 1 })
        ));
    }

    #[test]
    fn same_seed_reproduces_the_same_pairing() {
        let pick = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            pair_roster(roster_of(6), &mut rng)
                .unwrap()
                .pairs
                .iter()
                .map(|(a, b)| (a.id.clone(), b.id.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(99), pick(99));
    }
}
