use serde::Serialize;

/// A city on the plane. Its position in the city list is the index routes refer to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct City {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn distance_to(&self, other: &City) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance between two cities.
pub fn distance(a: &City, b: &City) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = City::new(0, 0.0, 0.0);
        let b = City::new(1, 3.0, 4.0);

        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = City::new(7, -12.5, 3.25);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
