use crate::geometry::City;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

#[derive(Debug, thiserror::Error)]
pub enum DemoDataError {
    #[error("city area must have positive width and height, got {width} x {height}")]
    InvalidArea { width: f64, height: f64 },
    #[error("invalid cluster spread: {0}")]
    Spread(#[from] NormalError),
}

fn validate_area(width: f64, height: f64) -> Result<(), DemoDataError> {
    // Also rejects NaN
    if !(width > 0.0 && height > 0.0) {
        return Err(DemoDataError::InvalidArea { width, height });
    }

    Ok(())
}

/// Cities scattered uniformly over a `width` x `height` area.
pub fn uniform_cities(
    count: usize,
    width: f64,
    height: f64,
    rng: &mut impl Rng,
) -> Result<Vec<City>, DemoDataError> {
    validate_area(width, height)?;

    Ok((0..count)
        .map(|id| City::new(id as u32, rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        .collect())
}

/// Cities grouped around `clusters` random centres, clamped to the area.
pub fn clustered_cities(
    count: usize,
    clusters: usize,
    width: f64,
    height: f64,
    rng: &mut impl Rng,
) -> Result<Vec<City>, DemoDataError> {
    validate_area(width, height)?;

    // Spread each cluster over roughly a tenth of the smaller side
    let spread = Normal::new(0.0, width.min(height) / 10.0)?;

    let clusters = clusters.max(1);
    let centres: Vec<(f64, f64)> = (0..clusters)
        .map(|_| (rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
        .collect();

    Ok((0..count)
        .map(|id| {
            let (cx, cy) = centres[id % clusters];
            let x = (cx + spread.sample(&mut *rng)).clamp(0.0, width);
            let y = (cy + spread.sample(&mut *rng)).clamp(0.0, height);
            City::new(id as u32, x, y)
        })
        .collect())
}
