use primecount::counters::{count_primes_with, CountConfig, Strategy as Dispatch};
use primecount::partition::{is_prime, owner_of, PartitionScheme, Remainder};
use primecount::{count_primes, CountError};
use proptest::prelude::*;

fn brute_force(sample: &[u32]) -> u64 {
    sample.iter().filter(|&&value| is_prime(value)).count() as u64
}

fn divisible_sample() -> impl Strategy<Value = (Vec<u32>, usize)> {
    (1usize..9, 1usize..40).prop_flat_map(|(workers, per_worker)| {
        (
            proptest::collection::vec(0u32..10_000, workers * per_worker),
            Just(workers),
        )
    })
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(
        count_primes(&[1, 2, 3, 4], 0),
        Err(CountError::InvalidConfiguration { .. })
    ));
}

proptest! {
    #[test]
    fn total_matches_brute_force((sample, workers) in divisible_sample()) {
        prop_assert_eq!(count_primes(&sample, workers).unwrap(), brute_force(&sample));
    }

    #[test]
    fn total_independent_of_workers(
        sample in proptest::collection::vec(0u32..1000, 1..200),
        a in 1usize..16,
        b in 1usize..16,
    ) {
        prop_assume!(a <= sample.len() && b <= sample.len());
        prop_assert_eq!(count_primes(&sample, a).unwrap(), count_primes(&sample, b).unwrap());
    }

    #[test]
    fn strategies_fill_the_same_slots((sample, workers) in divisible_sample()) {
        let reference = count_primes_with(&sample, &CountConfig::new(workers)).unwrap();
        for strategy in Dispatch::ALL {
            let config = CountConfig::new(workers).with_strategy(strategy);
            prop_assert_eq!(&count_primes_with(&sample, &config).unwrap(), &reference);
        }
    }

    #[test]
    fn every_index_has_one_valid_owner(len in 1usize..500, workers in 1usize..32) {
        prop_assume!(workers <= len);
        let scheme = PartitionScheme::new(len, workers, Remainder::WidenLast).unwrap();
        let mut covered = 0;
        for (worker, range) in scheme.ranges().enumerate() {
            prop_assert_eq!(range.start, covered);
            covered = range.end;
            for index in range {
                prop_assert_eq!(scheme.owner(index), worker);
            }
        }
        prop_assert_eq!(covered, len);
    }

    #[test]
    fn owner_of_stays_in_range_for_even_splits(workers in 1usize..32, per_worker in 1usize..64) {
        let len = workers * per_worker;
        for index in 0..len {
            prop_assert!(owner_of(index, per_worker) < workers);
        }
    }

    #[test]
    fn composites_are_not_prime(a in 2u32..5000, b in 2u32..5000) {
        prop_assert!(!is_prime(a * b));
    }
}
