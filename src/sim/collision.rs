//! Orb vs platform hit testing
//!
//! Every teleport outcome is decided here: a circle is tested against an
//! axis-aligned rectangle and the face it touched is reported.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Platform;

/// Platform face touched by the orb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Test a circle against an axis-aligned box given by its corners
///
/// Returns the touched side, or `None` when the circle misses the box.
///
/// A center inside the box (edges included) resolves to the side with the
/// smallest penetration depth, ties going top, bottom, left, right in that
/// order.
///
/// A center outside resolves by the offset from the nearest point on the
/// box, vertical when `|dy| >= |dx|` and horizontal otherwise, and reports
/// the face opposite that offset: an orb grazing from above is `Bottom`, one
/// grazing from below is `Top`, one grazing from the right is `Left`. Only a
/// `Top` contact on the goal wins, so the goal is won by piercing its top
/// face or by clipping its underside.
pub fn circle_box_hit(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> Option<Side> {
    let nearest = center.clamp(min, max);
    let offset = center - nearest;
    if offset.length_squared() > radius * radius {
        return None;
    }

    let inside =
        center.x >= min.x && center.x <= max.x && center.y >= min.y && center.y <= max.y;

    if inside {
        let d_left = center.x - min.x;
        let d_right = max.x - center.x;
        let d_bottom = center.y - min.y;
        let d_top = max.y - center.y;
        let m = d_left.min(d_right).min(d_bottom).min(d_top);
        let side = if m == d_top {
            Side::Top
        } else if m == d_bottom {
            Side::Bottom
        } else if m == d_left {
            Side::Left
        } else {
            Side::Right
        };
        Some(side)
    } else if offset.y.abs() >= offset.x.abs() {
        Some(if offset.y > 0.0 { Side::Bottom } else { Side::Top })
    } else {
        Some(if offset.x > 0.0 { Side::Left } else { Side::Right })
    }
}

/// Test the orb against a platform
#[inline]
pub fn orb_platform_hit(center: Vec2, radius: f32, platform: &Platform) -> Option<Side> {
    circle_box_hit(
        center,
        radius,
        Vec2::new(platform.left(), platform.bottom()),
        Vec2::new(platform.right(), platform.top()),
    )
}

/// First platform (in slice order) the orb touches
pub fn first_platform_hit(
    center: Vec2,
    radius: f32,
    platforms: &[Platform],
) -> Option<(usize, Side)> {
    platforms
        .iter()
        .enumerate()
        .find_map(|(i, p)| orb_platform_hit(center, radius, p).map(|side| (i, side)))
}
