use std::collections::HashMap;

use crate::config::worldgen::WorldGenConfig;
use crate::terrain::noise::PerlinNoise;

const BASE_FREQUENCY: f64 = 0.01;
const BASE_AMPLITUDE: f64 = 12.0;
const HILL_FREQUENCY: f64 = 0.004;
const HILL_AMPLITUDE: f64 = 18.0 * 0.6;
const DETAIL_FREQUENCY: f64 = 0.03;
const DETAIL_AMPLITUDE: f64 = 5.0 * 0.5;
const HEIGHT_OFFSET: i32 = -4;
const MIN_HEIGHT: i32 = 4;

const TREE_FREQUENCY: f64 = 0.05;
const TREE_THRESHOLD: f64 = 0.74;
const TREE_BASE_HEIGHT: i32 = 4;

/// Per-column terrain and tree decisions. Heights are a pure function of
/// (seed, x, z); the caches only exist because meshing, collision and spawn
/// search hit the same columns over and over.
pub struct TerrainGenerator {
    height_noise: PerlinNoise,
    hill_noise: PerlinNoise,
    detail_noise: PerlinNoise,
    tree_noise: PerlinNoise,
    water_level: i32,
    max_height: i32,
    height_cache: HashMap<(i32, i32), i32>,
    tree_cache: HashMap<(i32, i32), i32>,
}

impl TerrainGenerator {
    pub fn new(config: &WorldGenConfig, chunk_height: u32) -> Self {
        let seed = config.world_seed;
        Self {
            height_noise: PerlinNoise::new(seed),
            hill_noise: PerlinNoise::new(seed + 1),
            detail_noise: PerlinNoise::new(seed + 2),
            tree_noise: PerlinNoise::new(seed + 3),
            water_level: config.water_level,
            max_height: chunk_height as i32 - 2,
            height_cache: HashMap::new(),
            tree_cache: HashMap::new(),
        }
    }

    pub fn water_level(&self) -> i32 {
        self.water_level
    }

    /// Surface height of the column at (x, z), clamped to
    /// [MIN_HEIGHT, chunk_height - 2].
    pub fn height_at(&mut self, x: i32, z: i32) -> i32 {
        if let Some(&height) = self.height_cache.get(&(x, z)) {
            return height;
        }
        let xf = x as f64;
        let zf = z as f64;
        // Broad base, rolling hills and fine surface detail, blended.
        let base = self.height_noise.noise2d(xf * BASE_FREQUENCY, zf * BASE_FREQUENCY) * BASE_AMPLITUDE;
        let hills = self.hill_noise.noise2d(xf * HILL_FREQUENCY, zf * HILL_FREQUENCY) * HILL_AMPLITUDE;
        let detail =
            self.detail_noise.noise2d(xf * DETAIL_FREQUENCY, zf * DETAIL_FREQUENCY) * DETAIL_AMPLITUDE;
        let raw = (self.water_level + HEIGHT_OFFSET) as f64 + base + hills + detail;
        let height = (raw.round() as i32).clamp(MIN_HEIGHT, self.max_height);
        self.height_cache.insert((x, z), height);
        height
    }

    /// Tree height anchored at (x, z), or 0 when the column has no tree.
    ///
    /// A column anchors a tree only when its tree-noise value crosses the
    /// coverage threshold, is a strict local maximum among its 8 neighbors
    /// (keeps anchors from clustering shoulder to shoulder) and the terrain
    /// sits above the shoreline.
    pub fn tree_height_at(&mut self, x: i32, z: i32) -> i32 {
        if let Some(&height) = self.tree_cache.get(&(x, z)) {
            return height;
        }
        let value = self.tree_sample(x, z);
        let mut height = 0;
        if value > TREE_THRESHOLD {
            let mut is_peak = true;
            'scan: for dx in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dz == 0 {
                        continue;
                    }
                    if self.tree_sample(x + dx, z + dz) > value {
                        is_peak = false;
                        break 'scan;
                    }
                }
            }
            if is_peak && self.height_at(x, z) > self.water_level + 1 {
                height = TREE_BASE_HEIGHT + (value * 2.0).round() as i32;
            }
        }
        self.tree_cache.insert((x, z), height);
        height
    }

    /// Tree noise remapped to [0, 1].
    fn tree_sample(&self, x: i32, z: i32) -> f64 {
        (self.tree_noise.noise2d(x as f64 * TREE_FREQUENCY, z as f64 * TREE_FREQUENCY) + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(&WorldGenConfig::default(), 64)
    }

    #[test]
    fn origin_height_is_stable_and_in_range() {
        // seed=1337, chunk size 16, water level 18.
        let mut gen = generator();
        let first = gen.height_at(0, 0);
        let second = gen.height_at(0, 0);
        assert_eq!(first, second);
        assert!((4..=62).contains(&first));
    }

    #[test]
    fn heights_do_not_depend_on_query_order() {
        let mut forward = generator();
        let mut reverse = generator();
        let coords: Vec<(i32, i32)> = (-20..20).map(|i| (i, -i * 3)).collect();
        let a: Vec<i32> = coords.iter().map(|&(x, z)| forward.height_at(x, z)).collect();
        let b: Vec<i32> = coords
            .iter()
            .rev()
            .map(|&(x, z)| reverse.height_at(x, z))
            .collect();
        let b_forward: Vec<i32> = b.into_iter().rev().collect();
        assert_eq!(a, b_forward);
    }

    #[test]
    fn tree_decisions_do_not_depend_on_query_order() {
        let mut forward = generator();
        let mut reverse = generator();
        let coords: Vec<(i32, i32)> = (0..40).flat_map(|x| (0..40).map(move |z| (x, z))).collect();
        let a: Vec<i32> = coords.iter().map(|&(x, z)| forward.tree_height_at(x, z)).collect();
        let mut b: Vec<(usize, i32)> = coords
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &(x, z))| (i, reverse.tree_height_at(x, z)))
            .collect();
        b.sort_by_key(|&(i, _)| i);
        assert_eq!(a, b.into_iter().map(|(_, h)| h).collect::<Vec<_>>());
    }

    #[test]
    fn tree_heights_fit_expected_band() {
        let mut gen = generator();
        for x in -64..64 {
            for z in -64..64 {
                let height = gen.tree_height_at(x, z);
                assert!(height == 0 || (5..=6).contains(&height));
            }
        }
    }

    #[test]
    fn anchors_are_never_horizontally_adjacent() {
        // Non-max suppression: two neighboring columns cannot both anchor.
        let mut gen = generator();
        for x in -48..48 {
            for z in -48..48 {
                if gen.tree_height_at(x, z) > 0 {
                    for dx in -1..=1_i32 {
                        for dz in -1..=1_i32 {
                            if dx == 0 && dz == 0 {
                                continue;
                            }
                            assert_eq!(gen.tree_height_at(x + dx, z + dz), 0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn trees_stay_above_the_shoreline() {
        let mut gen = generator();
        for x in -64..64 {
            for z in -64..64 {
                if gen.tree_height_at(x, z) > 0 {
                    assert!(gen.height_at(x, z) > gen.water_level() + 1);
                }
            }
        }
    }
}
