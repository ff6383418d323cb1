//! Timer-driven obstacle spawning with a shrinking interval

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Spawn timer and the current interval bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Ticks since the last spawn
    pub counter: u32,
    /// Counter value that triggers the next spawn
    pub next_at: u32,
    pub min_interval: f32,
    pub max_interval: f32,
}

impl Spawner {
    /// Fresh spawner for a new round. The first obstacle arrives after the
    /// initial lower bound.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            counter: 0,
            next_at: interval_ticks(tuning.min_interval),
            min_interval: tuning.min_interval,
            max_interval: tuning.max_interval,
        }
    }

    /// Advance one tick. Returns a new obstacle when the timer elapses.
    pub fn tick(&mut self, score: u64, tuning: &Tuning, rng: &mut Pcg32) -> Option<Obstacle> {
        self.counter += 1;
        if self.counter < self.next_at {
            return None;
        }

        self.counter = 0;
        self.next_at = interval_ticks(rng.random_range(self.min_interval..=self.max_interval));

        if score > tuning.decay_after_score {
            self.decay(tuning);
        }

        Some(Obstacle::new(tuning.world_width, tuning.obstacle_y(), tuning))
    }

    /// Shrink both bounds, keeping `floor <= min <= max`
    fn decay(&mut self, tuning: &Tuning) {
        self.min_interval = (self.min_interval - tuning.interval_decay).max(tuning.interval_floor);
        self.max_interval = (self.max_interval - tuning.interval_decay).max(self.min_interval);
    }
}

/// Whole ticks for an interval, never less than one
fn interval_ticks(interval: f32) -> u32 {
    (interval.floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn setup() -> (Tuning, Pcg32) {
        (Tuning::default(), Pcg32::seed_from_u64(1234))
    }

    #[test]
    fn test_first_spawn_after_min_interval() {
        let (tuning, mut rng) = setup();
        let mut spawner = Spawner::new(&tuning);

        for _ in 0..59 {
            assert!(spawner.tick(0, &tuning, &mut rng).is_none());
        }
        let obstacle = spawner.tick(0, &tuning, &mut rng).expect("spawn at tick 60");
        assert_eq!(obstacle.x, tuning.world_width);
        assert_eq!(obstacle.y, tuning.obstacle_y());
        assert_eq!(spawner.counter, 0);
    }

    #[test]
    fn test_next_threshold_within_bounds() {
        let (tuning, mut rng) = setup();
        let mut spawner = Spawner::new(&tuning);

        for _ in 0..10_000 {
            if spawner.tick(0, &tuning, &mut rng).is_some() {
                assert!(spawner.next_at >= tuning.min_interval as u32);
                assert!(spawner.next_at <= tuning.max_interval as u32);
            }
        }
    }

    #[test]
    fn test_no_decay_before_milestone() {
        let (tuning, mut rng) = setup();
        let mut spawner = Spawner::new(&tuning);
        spawner.next_at = 1;
        spawner.tick(tuning.decay_after_score, &tuning, &mut rng);
        assert_eq!(spawner.min_interval, tuning.min_interval);
        assert_eq!(spawner.max_interval, tuning.max_interval);
    }

    #[test]
    fn test_decay_after_milestone() {
        let (tuning, mut rng) = setup();
        let mut spawner = Spawner::new(&tuning);
        spawner.next_at = 1;
        spawner.tick(tuning.decay_after_score + 1, &tuning, &mut rng);
        assert!(spawner.min_interval < tuning.min_interval);
        assert!(spawner.max_interval < tuning.max_interval);
    }

    #[test]
    fn test_decay_clamps_and_never_crosses() {
        let (tuning, mut rng) = setup();
        let mut spawner = Spawner::new(&tuning);

        for _ in 0..10_000 {
            spawner.next_at = 1;
            spawner.tick(u64::MAX, &tuning, &mut rng);
            assert!(spawner.min_interval >= tuning.interval_floor);
            assert!(spawner.min_interval <= spawner.max_interval);
            assert!(spawner.next_at >= 1);
        }
        assert_eq!(spawner.min_interval, tuning.interval_floor);
    }

    #[test]
    fn test_decay_with_narrow_bounds_keeps_order() {
        let (mut tuning, mut rng) = setup();
        tuning.min_interval = 31.0;
        tuning.max_interval = 31.0;
        tuning.interval_decay = 5.0;
        let mut spawner = Spawner::new(&tuning);

        spawner.next_at = 1;
        spawner.tick(u64::MAX, &tuning, &mut rng);
        assert_eq!(spawner.min_interval, 30.0);
        assert_eq!(spawner.max_interval, 30.0);
    }
}
