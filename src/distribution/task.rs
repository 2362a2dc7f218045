use std::fmt;

use rand::Rng;

use super::traits::TaskDistribution;
use crate::topology::CityId;

/// A delivery task offered to the vehicle at its current city.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub pickup: CityId,
    pub delivery: CityId,
    pub reward: f64,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task {} ({} -> {}, reward {:.1})",
            self.id, self.pickup, self.delivery, self.reward
        )
    }
}

/// Draws the task offered at `from`, or `None` when no task shows up.
///
/// Destinations are scanned in id order and the first whose cumulative
/// probability exceeds a uniform draw is chosen.
pub fn sample_task<D, R>(
    distribution: &D,
    from: CityId,
    num_cities: usize,
    id: u64,
    rng: &mut R,
) -> Option<Task>
where
    D: TaskDistribution + ?Sized,
    R: Rng + ?Sized,
{
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for to in 0..num_cities {
        cumulative += distribution.probability(from, Some(to));
        if draw < cumulative {
            return Some(Task {
                id,
                pickup: from,
                delivery: to,
                reward: distribution.reward(from, to),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Always(CityId);

    impl TaskDistribution for Always {
        fn reward(&self, _from: CityId, _to: CityId) -> f64 {
            42.0
        }

        fn probability(&self, _from: CityId, to: Option<CityId>) -> f64 {
            match to {
                Some(t) if t == self.0 => 1.0,
                Some(_) => 0.0,
                None => 0.0,
            }
        }
    }

    struct Never;

    impl TaskDistribution for Never {
        fn reward(&self, _from: CityId, _to: CityId) -> f64 {
            0.0
        }

        fn probability(&self, _from: CityId, to: Option<CityId>) -> f64 {
            if to.is_none() {
                1.0
            } else {
                0.0
            }
        }
    }

    #[test]
    fn certain_task_is_always_drawn() {
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..20 {
            let task = sample_task(&Always(2), 0, 3, i, &mut rng).unwrap();
            assert_eq!(task.delivery, 2);
            assert_eq!(task.pickup, 0);
            assert_eq!(task.reward, 42.0);
            assert_eq!(task.id, i);
        }
    }

    #[test]
    fn impossible_task_is_never_drawn() {
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..20 {
            assert!(sample_task(&Never, 1, 3, i, &mut rng).is_none());
        }
    }
}
