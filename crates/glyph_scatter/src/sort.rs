//! Stable reordering of a finished site set.
use glam::DVec2;

/// Ordering applied to the distributed points.
///
/// Any strategy other than `None` discards the index identity between output
/// points and input sites; callers that map points back to labeled items (the
/// i-th glyph of a string, say) must capture the pre-sort order themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortStrategy {
    /// Keep the sampling order.
    #[default]
    None,
    /// Ascending by x.
    ByX,
    /// Ascending by y.
    ByY,
    /// Ascending by `x + cost_function_y_weight * y`.
    CostFunction,
}

/// Sorts `sites` in place per `strategy`. Stable: equal keys keep their
/// relative input order. `cost_function_y_weight` may be negative to invert
/// the vertical contribution.
pub fn sort_sites(sites: &mut [DVec2], strategy: SortStrategy, cost_function_y_weight: f64) {
    match strategy {
        SortStrategy::None => {}
        SortStrategy::ByX => sites.sort_by(|a, b| a.x.total_cmp(&b.x)),
        SortStrategy::ByY => sites.sort_by(|a, b| a.y.total_cmp(&b.y)),
        SortStrategy::CostFunction => sites.sort_by(|a, b| {
            let ka = a.x + cost_function_y_weight * a.y;
            let kb = b.x + cost_function_y_weight * b.y;
            ka.total_cmp(&kb)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Vec<DVec2> {
        vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(90.0, 10.0),
            DVec2::new(10.0, 90.0),
            DVec2::new(90.0, 90.0),
        ]
    }

    #[test]
    fn none_keeps_input_order() {
        let mut sites = corners();
        sort_sites(&mut sites, SortStrategy::None, 1.0);
        assert_eq!(sites, corners());
    }

    #[test]
    fn by_x_breaks_ties_by_input_order() {
        let mut sites = corners();
        sort_sites(&mut sites, SortStrategy::ByX, 1.0);
        assert_eq!(
            sites,
            vec![
                DVec2::new(10.0, 10.0),
                DVec2::new(10.0, 90.0),
                DVec2::new(90.0, 10.0),
                DVec2::new(90.0, 90.0),
            ]
        );
    }

    #[test]
    fn by_y_sorts_ascending() {
        let mut sites = corners();
        sort_sites(&mut sites, SortStrategy::ByY, 1.0);
        for pair in sites.windows(2) {
            assert!(pair[0].y <= pair[1].y);
        }
        // Ties keep sampling order.
        assert_eq!(sites[0], DVec2::new(10.0, 10.0));
        assert_eq!(sites[1], DVec2::new(90.0, 10.0));
    }

    #[test]
    fn cost_function_with_zero_weight_equals_by_x() {
        let mut by_cost = corners();
        let mut by_x = corners();
        sort_sites(&mut by_cost, SortStrategy::CostFunction, 0.0);
        sort_sites(&mut by_x, SortStrategy::ByX, 1.0);
        assert_eq!(by_cost, by_x);
    }

    #[test]
    fn cost_function_weight_shapes_the_order() {
        let mut sites = vec![DVec2::new(0.0, 10.0), DVec2::new(5.0, 0.0)];
        sort_sites(&mut sites, SortStrategy::CostFunction, 1.0);
        // 5 + 0 < 0 + 10
        assert_eq!(sites[0], DVec2::new(5.0, 0.0));

        let mut sites = vec![DVec2::new(0.0, 10.0), DVec2::new(5.0, 0.0)];
        sort_sites(&mut sites, SortStrategy::CostFunction, -1.0);
        // 0 - 10 < 5 - 0
        assert_eq!(sites[0], DVec2::new(0.0, 10.0));
    }
}
