//! Fixed-capacity obstacle pool
//!
//! Slots are never allocated or freed during a run. An obstacle that scrolls
//! past the left edge is respawned in place past the right edge.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Bounds;

/// The obstacle slots plus the RNG that drives respawns
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    slots: [Obstacle; POOL_SIZE],
    rng: Pcg32,
}

impl ObstaclePool {
    pub fn new(seed: u64, bounds: &Bounds) -> Self {
        Self {
            slots: Self::canonical_layout(bounds),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fixed starting layout used on every reset
    pub fn canonical_layout(bounds: &Bounds) -> [Obstacle; POOL_SIZE] {
        [
            Obstacle::new(400.0, 200.0, ObstacleKind::Low),
            Obstacle::new(700.0, 100.0, ObstacleKind::Low),
            Obstacle::new(900.0, tall_hazard_y(bounds), ObstacleKind::Tall),
        ]
    }

    /// Restore the canonical layout. The RNG is left alone so successive runs differ.
    pub fn reset(&mut self, bounds: &Bounds) {
        self.slots = Self::canonical_layout(bounds);
    }

    pub fn slots(&self) -> &[Obstacle; POOL_SIZE] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter()
    }

    /// Overwrite a slot (test setups and replays)
    pub fn set(&mut self, index: usize, obstacle: Obstacle) {
        self.slots[index] = obstacle;
    }

    /// Move every obstacle left by one tick of `speed`, respawning any that
    /// crossed the recycle threshold. Returns how many were recycled; each
    /// slot recycles at most once per call.
    pub fn advance(&mut self, speed: f32, bounds: &Bounds) -> u32 {
        let mut recycled = 0;
        for index in 0..POOL_SIZE {
            self.slots[index].pos.x -= speed;
            if self.slots[index].pos.x < -RECYCLE_MARGIN {
                self.respawn(index, bounds);
                recycled += 1;
            }
        }
        recycled
    }

    fn respawn(&mut self, index: usize, bounds: &Bounds) {
        let kind = if self.rng.random_bool(0.5) {
            ObstacleKind::Low
        } else {
            ObstacleKind::Tall
        };
        let y = match kind {
            ObstacleKind::Low => self.rng.random_range(LOW_HAZARD_MIN_Y..=LOW_HAZARD_MAX_Y),
            ObstacleKind::Tall => tall_hazard_y(bounds),
        };
        self.slots[index] = Obstacle::new(bounds.width + SPAWN_MARGIN, y, kind);
        log::trace!("Respawned slot {} as {:?} at y={:.1}", index, kind, y);
    }
}

/// Tall hazards are pinned just above the ground line
fn tall_hazard_y(bounds: &Bounds) -> f32 {
    bounds.ground_line() - TALL_HAZARD_LIFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_layout() {
        let bounds = Bounds::default();
        let pool = ObstaclePool::new(7, &bounds);
        let xs: Vec<f32> = pool.iter().map(|o| o.pos.x).collect();
        assert_eq!(xs, vec![400.0, 700.0, 900.0]);
        assert_eq!(pool.slots()[2].kind, ObstacleKind::Tall);
        assert_eq!(pool.slots()[2].pos.y, 544.0 - 45.0);
    }

    #[test]
    fn test_recycle_fires_at_threshold_not_before() {
        let bounds = Bounds::default();
        let mut pool = ObstaclePool::new(7, &bounds);
        pool.set(0, Obstacle::new(10.0, 200.0, ObstacleKind::Low));

        // 10 -> 4 -> -2: still on the near side of -50
        assert_eq!(pool.advance(6.0, &bounds), 0);
        assert_eq!(pool.advance(6.0, &bounds), 0);
        assert_eq!(pool.slots()[0].pos.x, -2.0);

        // Landing exactly on -50 is not past the threshold
        pool.set(0, Obstacle::new(-44.0, 200.0, ObstacleKind::Low));
        assert_eq!(pool.advance(6.0, &bounds), 0);
        assert_eq!(pool.slots()[0].pos.x, -50.0);

        assert_eq!(pool.advance(6.0, &bounds), 1);
        assert_eq!(pool.slots()[0].pos.x, bounds.width + SPAWN_MARGIN);
    }

    #[test]
    fn test_respawn_placement_by_kind() {
        let bounds = Bounds::default();
        let mut pool = ObstaclePool::new(42, &bounds);
        let mut seen_low = false;
        let mut seen_tall = false;

        for _ in 0..200 {
            // Keep the other slots well clear of the threshold
            pool.reset(&bounds);
            pool.set(1, Obstacle::new(-49.0, 0.0, ObstacleKind::Low));
            assert_eq!(pool.advance(3.0, &bounds), 1);
            let o = pool.slots()[1];
            assert_eq!(o.pos.x, 440.0);
            match o.kind {
                ObstacleKind::Low => {
                    seen_low = true;
                    assert!((LOW_HAZARD_MIN_Y..=LOW_HAZARD_MAX_Y).contains(&o.pos.y));
                }
                ObstacleKind::Tall => {
                    seen_tall = true;
                    assert_eq!(o.pos.y, bounds.ground_line() - TALL_HAZARD_LIFT);
                }
            }
        }
        assert!(seen_low && seen_tall);
    }

    #[test]
    fn test_same_seed_same_respawns() {
        let bounds = Bounds::default();
        let mut a = ObstaclePool::new(99, &bounds);
        let mut b = ObstaclePool::new(99, &bounds);
        for _ in 0..1000 {
            a.advance(9.0, &bounds);
            b.advance(9.0, &bounds);
        }
        assert_eq!(a.slots(), b.slots());
    }

    #[test]
    fn test_reset_restores_layout() {
        let bounds = Bounds::default();
        let mut pool = ObstaclePool::new(3, &bounds);
        for _ in 0..500 {
            pool.advance(6.0, &bounds);
        }
        pool.reset(&bounds);
        assert_eq!(*pool.slots(), ObstaclePool::canonical_layout(&bounds));
    }
}
