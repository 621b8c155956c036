//! Which chunk coordinates should be resident around a viewer, and in what
//! order to load them

use super::config::StreamingConfig;
use crate::voxel::chunk::ChunkCoord;

/// Every coordinate within Chebyshev `radius` of `center`, closest first.
///
/// Rings are ordered by Chebyshev distance, then by squared Euclidean
/// distance, then by coordinate, so the order is fully deterministic.
pub fn load_order(center: ChunkCoord, radius: i32) -> Vec<ChunkCoord> {
    let radius = radius.max(0);
    let mut coords: Vec<ChunkCoord> = (-radius..=radius)
        .flat_map(|dx| (-radius..=radius).map(move |dz| center.offset(dx, dz)))
        .collect();
    coords.sort_by_key(|c| {
        let (dx, dz) = (c.x - center.x, c.z - center.z);
        (center.chebyshev_distance(*c), dx * dx + dz * dz, *c)
    });
    coords
}

/// Whether `coord` is past the hysteresis bound and must be dropped
pub fn should_evict(center: ChunkCoord, coord: ChunkCoord, config: &StreamingConfig) -> bool {
    center.chebyshev_distance(coord) > config.unload_distance()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_order_covers_square() {
        let center = ChunkCoord::new(3, -2);
        let order = load_order(center, 2);
        assert_eq!(order.len(), 25);
        let mut unique = order.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 25);
        assert!(order.iter().all(|c| center.chebyshev_distance(*c) <= 2));
    }

    #[test]
    fn test_load_order_closest_first() {
        let center = ChunkCoord::new(0, 0);
        let order = load_order(center, 3);
        assert_eq!(order[0], center);
        for pair in order.windows(2) {
            assert!(center.chebyshev_distance(pair[0]) <= center.chebyshev_distance(pair[1]));
        }
        // Edge midpoints of ring 1 before its corners
        assert_eq!(center.chebyshev_distance(order[4]), 1);
        assert!(order[1..5].iter().all(|c| c.x == 0 || c.z == 0));
    }

    #[test]
    fn test_zero_radius() {
        assert_eq!(load_order(ChunkCoord::new(5, 5), 0), vec![ChunkCoord::new(5, 5)]);
        assert_eq!(load_order(ChunkCoord::new(5, 5), -3), vec![ChunkCoord::new(5, 5)]);
    }

    #[test]
    fn test_hysteresis_band() {
        let config = StreamingConfig::default();
        let center = ChunkCoord::new(0, 0);
        let square = load_order(center, config.render_distance);
        assert!(square.contains(&ChunkCoord::new(4, -4)));
        assert!(!square.contains(&ChunkCoord::new(5, 0)));
        // Between load and unload distance a chunk neither loads nor evicts
        assert!(!should_evict(center, ChunkCoord::new(6, 6), &config));
        assert!(should_evict(center, ChunkCoord::new(7, 0), &config));
        assert!(should_evict(center, ChunkCoord::new(0, -7), &config));
    }
}
