//! Panel dimension selection for three-axis sweeps.

use crate::axis::Axis;

/// Three axes reordered for rendering: one panel per `panel` value, each a
/// matrix over `x` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSelection {
    /// Axis held fixed per panel (fewest distinct values).
    pub panel: Axis,
    /// First remaining axis in discovery order.
    pub x: Axis,
    /// Second remaining axis in discovery order.
    pub y: Axis,
}

/// Index of the axis with the fewest distinct values.
///
/// Ties keep discovery order: the first minimal axis wins.
pub fn panel_index(axes: &[Axis]) -> Option<usize> {
    axes.iter()
        .enumerate()
        .min_by_key(|(_, axis)| axis.cardinality())
        .map(|(i, _)| i)
}

/// Choose the panel axis and order the other two.
pub fn select_dimensions(axes: [Axis; 3]) -> PanelSelection {
    let panel = panel_index(&axes).unwrap_or(0);
    let [first, second, third] = axes;

    let (panel, x, y) = match panel {
        0 => (first, second, third),
        1 => (second, first, third),
        _ => (third, first, second),
    };
    PanelSelection { panel, x, y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepgrid_core::ParamValue;

    fn axis(name: &str, n: usize) -> Axis {
        Axis {
            name: name.to_string(),
            values: (0..n as i64).map(ParamValue::Int).collect(),
            original_sequence: Vec::new(),
        }
    }

    #[test]
    fn test_panel_is_minimum_cardinality() {
        let sel = select_dimensions([axis("a", 3), axis("b", 2), axis("c", 3)]);
        assert_eq!(sel.panel.name, "b");
        assert_eq!(sel.x.name, "a");
        assert_eq!(sel.y.name, "c");

        let sel = select_dimensions([axis("a", 4), axis("b", 3), axis("c", 1)]);
        assert_eq!(sel.panel.name, "c");
        assert_eq!(sel.x.name, "a");
        assert_eq!(sel.y.name, "b");
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let sel = select_dimensions([axis("a", 2), axis("b", 2), axis("c", 2)]);
        assert_eq!(sel.panel.name, "a");
        assert_eq!(sel.x.name, "b");
        assert_eq!(sel.y.name, "c");

        let sel = select_dimensions([axis("a", 5), axis("b", 2), axis("c", 2)]);
        assert_eq!(sel.panel.name, "b");
        assert_eq!(sel.x.name, "a");
        assert_eq!(sel.y.name, "c");
    }

    #[test]
    fn test_panel_index_empty() {
        assert_eq!(panel_index(&[]), None);
    }
}
