use crate::domain::SwingPoint;
use crate::models::{ZigZagLine, ZigZagPoint};

/// Collapse a chronological swing list into an alternating polyline.
///
/// A swing of the same kind as the last emitted point replaces it only when
/// more extreme; otherwise it is dropped.
pub fn build_zigzag(swings: &[SwingPoint]) -> Vec<ZigZagPoint> {
    let mut line = ZigZagLine::new();
    for swing in swings {
        line.push(swing);
    }
    line.into_points()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SwingKind;
    use crate::models::ZigZagStep;

    fn swing(bar_index: u64, price: f64, kind: SwingKind) -> SwingPoint {
        SwingPoint {
            bar_index,
            time_ms: bar_index as i64 * 1_000,
            price,
            kind,
        }
    }

    #[test]
    fn higher_high_replaces_previous_high() {
        let swings = vec![
            swing(1, 100.0, SwingKind::High),
            swing(3, 104.0, SwingKind::High),
            swing(5, 95.0, SwingKind::Low),
        ];
        let points = build_zigzag(&swings);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].bar_index, 3);
        assert_eq!(points[0].price, 104.0);
        assert_eq!(points[1].kind, SwingKind::Low);
    }

    #[test]
    fn weaker_low_is_discarded() {
        let mut line = ZigZagLine::new();
        assert_eq!(line.push(&swing(1, 90.0, SwingKind::Low)), ZigZagStep::Appended);
        assert_eq!(line.push(&swing(2, 92.0, SwingKind::Low)), ZigZagStep::Discarded);
        assert_eq!(line.push(&swing(3, 89.0, SwingKind::Low)), ZigZagStep::ReplacedLast);
        assert_eq!(line.len(), 1);
        assert_eq!(line.points()[0].bar_index, 3);
    }

    #[test]
    fn equal_extreme_keeps_the_earlier_point() {
        let swings = vec![
            swing(1, 100.0, SwingKind::High),
            swing(4, 100.0, SwingKind::High),
        ];
        let points = build_zigzag(&swings);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].bar_index, 1);
    }

    #[test]
    fn empty_input_gives_empty_line() {
        assert!(build_zigzag(&[]).is_empty());
    }
}
