//! Pointer-driven micro-animations. Each function maps pointer position and
//! element box to the track the element should play.

use crate::motion::{Ease, Pose, Track, Tween};
use crate::stage::{Point, Rect};

const QUICK: Tween = Tween::new(0.3, Ease::Power2Out);
const LIFT: Tween = Tween::new(0.4, Ease::Power2Out);
const BOUNCE: Tween = Tween::new(0.4, Ease::BACK);

pub const MAGNETIC_PULL: f64 = 0.1;
pub const TILT_DEGREES: f64 = 20.0;
pub const TILT_PERSPECTIVE: f64 = 1000.0;

fn to(pose: Pose, tween: Tween) -> Track {
    Track::tween(None, pose, tween)
}

fn offset_from_center(rect: &Rect, pointer: Point) -> Point {
    let c = rect.center();
    Point { x: pointer.x - c.x, y: pointer.y - c.y }
}

/// Button drifts towards the pointer.
pub fn magnetic(rect: &Rect, pointer: Point) -> Track {
    let d = offset_from_center(rect, pointer);
    to(Pose::new().x(d.x * MAGNETIC_PULL).y(d.y * MAGNETIC_PULL), QUICK)
}

pub fn magnetic_release() -> Track {
    to(Pose::new().x(0.0).y(0.0), Tween::new(0.5, Ease::ELASTIC))
}

pub fn button_enter() -> Track {
    to(Pose::new().scale(1.05), QUICK)
}

pub fn button_leave() -> Track {
    to(Pose::new().scale(1.0), QUICK)
}

pub fn dashboard_card_enter() -> Track {
    to(Pose::new().y(-10.0).scale(1.02), LIFT)
}

pub fn dashboard_card_leave() -> Track {
    to(Pose::new().y(0.0).scale(1.0), LIFT)
}

/// Spin for the `.card-title i` icon.
pub fn dashboard_icon_spin() -> Track {
    to(Pose::new().rotation(360.0), Tween::new(0.8, Ease::Power2Out))
}

pub fn tilt_pose(rect: &Rect, pointer: Point) -> Pose {
    let d = offset_from_center(rect, pointer);
    let rx = if rect.height > 0.0 { d.y / rect.height * TILT_DEGREES } else { 0.0 };
    let ry = if rect.width > 0.0 { d.x / rect.width * -TILT_DEGREES } else { 0.0 };
    Pose::new().rotation_x(rx).rotation_y(ry).perspective(TILT_PERSPECTIVE)
}

pub fn subject_tilt(rect: &Rect, pointer: Point) -> Track {
    to(tilt_pose(rect, pointer), QUICK)
}

pub fn subject_release() -> Track {
    to(Pose::new().rotation_x(0.0).rotation_y(0.0), Tween::new(0.5, Ease::Power2Out))
}

pub fn feature_card_enter() -> Track {
    to(Pose::new().y(-15.0), BOUNCE)
}

pub fn feature_card_leave() -> Track {
    to(Pose::new().y(0.0), LIFT)
}

pub fn feature_icon_enter() -> Track {
    to(Pose::new().rotation(15.0).scale(1.1), BOUNCE)
}

pub fn feature_icon_leave() -> Track {
    to(Pose::new().rotation(0.0).scale(1.0), LIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);

    #[test]
    fn magnetic_pulls_a_tenth() {
        let t = magnetic(&CARD, Point { x: 150.0, y: 0.0 });
        assert_eq!(t.segments[0].to, Pose::new().x(5.0).y(-5.0));
        assert_eq!(magnetic_release().segments[0].ease, Ease::ELASTIC);
    }

    #[test]
    fn tilt_follows_pointer_quadrant() {
        let p = tilt_pose(&CARD, Point { x: 200.0, y: 100.0 });
        assert_eq!(p.rotation_x, Some(10.0));
        assert_eq!(p.rotation_y, Some(-10.0));
        assert_eq!(p.perspective, Some(1000.0));
        let centred = tilt_pose(&CARD, CARD.center());
        assert_eq!(centred.rotation_x, Some(0.0));
    }

    #[test]
    fn degenerate_box_does_not_tilt() {
        let p = tilt_pose(&Rect::new(0.0, 0.0, 0.0, 0.0), Point { x: 3.0, y: 3.0 });
        assert_eq!(p.rotation_x, Some(0.0));
        assert_eq!(p.rotation_y, Some(0.0));
    }

    #[test]
    fn feature_card_bounces_in_and_settles_out() {
        assert_eq!(feature_card_enter().segments[0].ease, Ease::BACK);
        assert_eq!(feature_card_leave().segments[0].ease, Ease::Power2Out);
        assert_eq!(feature_icon_enter().segments[0].to, Pose::new().rotation(15.0).scale(1.1));
    }
}
