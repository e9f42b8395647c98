use crate::geometry::City;
use plotters::prelude::*;
use plotters::style::full_palette::GREY;
use std::error::Error;
use std::ops::Range;

/// Points of the closed tour, the first city repeated at the end.
pub fn route_points(cities: &[City], route: &[usize]) -> Vec<(f64, f64)> {
    route
        .iter()
        .chain(route.first())
        .map(|&index| (cities[index].x, cities[index].y))
        .collect()
}

/// Axis ranges covering every city with a small margin.
pub fn plot_bounds(cities: &[City]) -> (Range<f64>, Range<f64>) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);

    for city in cities {
        x_min = x_min.min(city.x);
        x_max = x_max.max(city.x);
        y_min = y_min.min(city.y);
        y_max = y_max.max(city.y);
    }

    if cities.is_empty() {
        return (0.0..1.0, 0.0..1.0);
    }

    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);

    (x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
}

pub fn visualize_route(
    cities: &[City],
    route: &[usize],
    caption: &str,
    output_path: &str,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = plot_bounds(cities);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .light_line_style(&GREY.mix(0.2))
        .draw()?;

    chart
        .draw_series(LineSeries::new(route_points(cities, route), &BLUE))?
        .label("Route")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(
            cities
                .iter()
                .map(|city| Circle::new((city.x, city.y), 3, RED.filled())),
        )?
        .label("City")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_points_close_the_loop() {
        let cities = vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 1.0, 0.0),
            City::new(2, 1.0, 1.0),
        ];

        let points = route_points(&cities, &[2, 0, 1]);

        assert_eq!(points, vec![(1.0, 1.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn test_plot_bounds_cover_all_cities() {
        let cities = vec![City::new(0, -50.0, 10.0), City::new(1, 150.0, 90.0)];

        let (x, y) = plot_bounds(&cities);

        assert!(x.start < -50.0 && x.end > 150.0);
        assert!(y.start < 10.0 && y.end > 90.0);
    }

    #[test]
    fn test_plot_bounds_of_single_point_are_not_empty() {
        let (x, y) = plot_bounds(&[City::new(0, 5.0, 5.0)]);

        assert!(x.end > x.start);
        assert!(y.end > y.start);
    }
}
