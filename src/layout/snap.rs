//! Pure snap-point resolution.
//!
//! A dragged width locks onto the nearest preset when it comes strictly
//! within the threshold; exact ties between two presets go to the lower one
//! (first encountered in the ascending list). A snapped width re-resolves to
//! itself, so snapping is idempotent.

/// Outcome of resolving one candidate width against a snap set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapOutcome {
    pub width: u16,
    pub snapped_to: Option<u16>,
}

pub fn resolve(candidate: u16, points: &[u16], threshold: u16) -> SnapOutcome {
    let mut nearest: Option<(u16, u16)> = None;
    for &point in points {
        let distance = point.abs_diff(candidate);
        // Strict < keeps the earlier (lower) preset on an exact tie.
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((point, distance));
        }
    }
    match nearest {
        Some((point, distance)) if distance < threshold => SnapOutcome {
            width: point,
            snapped_to: Some(point),
        },
        _ => SnapOutcome {
            width: candidate,
            snapped_to: None,
        },
    }
}

/// The preset a handle double-click jumps to regardless of distance: the
/// middle entry of the ascending preset list.
pub fn double_click_target(points: &[u16]) -> Option<u16> {
    points.get(points.len() / 2).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [u16; 5] = [240, 280, 320, 360, 400];

    #[test]
    fn snaps_within_threshold() {
        let outcome = resolve(312, &POINTS, 20);
        assert_eq!(outcome.width, 320);
        assert_eq!(outcome.snapped_to, Some(320));
    }

    #[test]
    fn exact_tie_at_threshold_does_not_snap() {
        // 300 is 20 away from both 280 and 320; the threshold is strict.
        let outcome = resolve(300, &POINTS, 20);
        assert_eq!(outcome.width, 300);
        assert_eq!(outcome.snapped_to, None);
    }

    #[test]
    fn tie_inside_threshold_prefers_lower_preset() {
        let outcome = resolve(300, &POINTS, 25);
        assert_eq!(outcome.snapped_to, Some(280));
    }

    #[test]
    fn passthrough_outside_threshold() {
        let outcome = resolve(500, &POINTS, 20);
        assert_eq!(outcome.width, 500);
        assert_eq!(outcome.snapped_to, None);
    }

    #[test]
    fn snapping_is_idempotent() {
        for candidate in [230, 255, 300, 312, 395, 500] {
            let once = resolve(candidate, &POINTS, 20);
            let twice = resolve(once.width, &POINTS, 20);
            assert_eq!(once.width, twice.width);
        }
    }

    #[test]
    fn empty_point_set_never_snaps() {
        let outcome = resolve(300, &[], 20);
        assert_eq!(outcome.width, 300);
        assert_eq!(outcome.snapped_to, None);
        assert_eq!(double_click_target(&[]), None);
    }

    #[test]
    fn double_click_target_is_middle_entry() {
        assert_eq!(double_click_target(&POINTS), Some(320));
        assert_eq!(double_click_target(&[400, 625, 850, 1075]), Some(850));
    }
}
