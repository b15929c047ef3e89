//! Turn classification between two consecutive path segments.
//!
//! Works on a planar approximation (longitude as x, latitude as y), which is
//! plenty for the few metres around a junction.

use serde::{Deserialize, Serialize};

use super::error::RoutingError;
use super::geometry::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnType {
    Straight,
    SlightRight,
    Right,
    SharpRight,
    TurnAround,
    SlightLeft,
    Left,
    SharpLeft,
}

/// Signed angle in degrees between `p1 -> p2` and `p2 -> p3`, in (-180, 180].
/// Positive values turn left (counter-clockwise).
///
/// `index` only labels the error when either segment has zero length.
pub fn turn_angle(p1: &LatLng, p2: &LatLng, p3: &LatLng, index: usize) -> Result<f64, RoutingError> {
    let (ax, ay) = (p2.lng - p1.lng, p2.lat - p1.lat);
    let (bx, by) = (p3.lng - p2.lng, p3.lat - p2.lat);

    if (ax == 0.0 && ay == 0.0) || (bx == 0.0 && by == 0.0) {
        return Err(RoutingError::DegenerateGeometry { index });
    }

    let cross = ax * by - ay * bx;
    let dot = ax * bx + ay * by;

    Ok(cross.atan2(dot).to_degrees())
}

pub fn classify(p1: &LatLng, p2: &LatLng, p3: &LatLng, index: usize) -> Result<TurnType, RoutingError> {
    turn_angle(p1, p2, p3, index).map(classify_angle)
}

/// Maps a signed angle to its band. The ±30° and ±150° edges belong to the
/// gentler band, ±10° is straight and ±170° is already a turn-around.
pub fn classify_angle(angle: f64) -> TurnType {
    let magnitude = angle.abs();
    let left = angle > 0.0;

    if magnitude <= 10.0 {
        TurnType::Straight
    } else if magnitude >= 170.0 {
        TurnType::TurnAround
    } else if magnitude <= 30.0 {
        if left { TurnType::SlightLeft } else { TurnType::SlightRight }
    } else if magnitude <= 150.0 {
        if left { TurnType::Left } else { TurnType::Right }
    } else if left {
        TurnType::SharpLeft
    } else {
        TurnType::SharpRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }

    #[test]
    fn band_edges() {
        assert_eq!(classify_angle(0.0), TurnType::Straight);
        assert_eq!(classify_angle(10.0), TurnType::Straight);
        assert_eq!(classify_angle(-10.0), TurnType::Straight);
        assert_eq!(classify_angle(10.5), TurnType::SlightLeft);
        assert_eq!(classify_angle(-10.5), TurnType::SlightRight);
        assert_eq!(classify_angle(30.0), TurnType::SlightLeft);
        assert_eq!(classify_angle(-30.0), TurnType::SlightRight);
        assert_eq!(classify_angle(90.0), TurnType::Left);
        assert_eq!(classify_angle(-90.0), TurnType::Right);
        assert_eq!(classify_angle(150.0), TurnType::Left);
        assert_eq!(classify_angle(-150.0), TurnType::Right);
        assert_eq!(classify_angle(160.0), TurnType::SharpLeft);
        assert_eq!(classify_angle(-160.0), TurnType::SharpRight);
        assert_eq!(classify_angle(170.0), TurnType::TurnAround);
        assert_eq!(classify_angle(-170.0), TurnType::TurnAround);
        assert_eq!(classify_angle(180.0), TurnType::TurnAround);
        assert_eq!(classify_angle(-180.0), TurnType::TurnAround);
    }

    #[test]
    fn north_then_east_is_right() {
        let turn = classify(&pt(0.0, 0.0), &pt(1.0, 0.0), &pt(1.0, 1.0), 0).unwrap();
        assert_eq!(turn, TurnType::Right);
    }

    #[test]
    fn north_then_west_is_left() {
        let turn = classify(&pt(0.0, 0.0), &pt(1.0, 0.0), &pt(1.0, -1.0), 0).unwrap();
        assert_eq!(turn, TurnType::Left);
    }

    #[test]
    fn going_back_is_turn_around() {
        let turn = classify(&pt(0.0, 0.0), &pt(1.0, 0.0), &pt(0.0, 0.0), 0).unwrap();
        assert_eq!(turn, TurnType::TurnAround);
    }

    #[test]
    fn collinear_is_straight() {
        let turn = classify(&pt(0.0, 0.0), &pt(1.0, 1.0), &pt(3.0, 3.0), 0).unwrap();
        assert_eq!(turn, TurnType::Straight);
    }

    #[test]
    fn angle_sign() {
        let angle = turn_angle(&pt(0.0, 0.0), &pt(0.0, 1.0), &pt(1.0, 2.0), 0).unwrap();
        assert!((angle - 45.0).abs() < 1e-9, "got {angle}");
    }

    #[test]
    fn zero_length_segment_is_degenerate() {
        let err = classify(&pt(1.0, 1.0), &pt(1.0, 1.0), &pt(2.0, 2.0), 7).unwrap_err();
        assert!(matches!(err, RoutingError::DegenerateGeometry { index: 7 }));

        let err = classify(&pt(0.0, 0.0), &pt(1.0, 1.0), &pt(1.0, 1.0), 2).unwrap_err();
        assert!(matches!(err, RoutingError::DegenerateGeometry { index: 2 }));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = LatLng> {
            (-80.0..80.0f64, -170.0..170.0f64).prop_map(|(lat, lng)| LatLng::new(lat, lng))
        }

        fn near_band_edge(angle: f64) -> bool {
            [10.0, 30.0, 150.0, 170.0]
                .iter()
                .any(|edge| (angle.abs() - edge).abs() < 1e-6)
        }

        proptest! {
            #[test]
            fn prop_scaling_keeps_classification(
                p1 in coord(),
                p2 in coord(),
                p3 in coord(),
                k in 0.01..100.0f64,
            ) {
                let angle = turn_angle(&p1, &p2, &p3, 0);
                prop_assume!(angle.is_ok());
                prop_assume!(!near_band_edge(angle.unwrap()));

                let scale = |p: &LatLng| LatLng::new(p.lat * k, p.lng * k);
                let original = classify(&p1, &p2, &p3, 0).unwrap();
                let scaled = classify(&scale(&p1), &scale(&p2), &scale(&p3), 0).unwrap();
                prop_assert_eq!(original, scaled);
            }

            #[test]
            fn prop_collinear_forward_is_straight(
                start in coord(),
                dlat in -1.0..1.0f64,
                dlng in -1.0..1.0f64,
                t in 0.1..5.0f64,
            ) {
                prop_assume!(dlat.abs() > 1e-6 || dlng.abs() > 1e-6);
                let p2 = LatLng::new(start.lat + dlat, start.lng + dlng);
                let p3 = LatLng::new(p2.lat + dlat * t, p2.lng + dlng * t);
                prop_assert_eq!(classify(&start, &p2, &p3, 0).unwrap(), TurnType::Straight);
            }
        }
    }
}
