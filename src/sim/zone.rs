//! Zone classification over world height

use serde::{Deserialize, Serialize};

use crate::consts::{ZONE_COUNT, ZONE_HEIGHT};
use crate::lerp_color;

/// One of the five stacked bands of the world, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Abyss,
    Underground,
    Surface,
    Sky,
    Space,
}

/// Background gradient per zone: (top, bottom)
const BACKGROUND: [(u32, u32); ZONE_COUNT] = [
    (0x060012, 0x1a0040),
    (0x100c04, 0x241606),
    (0x0a1800, 0x163000),
    (0x3377bb, 0x99ccff),
    (0x000008, 0x000018),
];

impl Zone {
    pub const ALL: [Zone; ZONE_COUNT] = [
        Zone::Abyss,
        Zone::Underground,
        Zone::Surface,
        Zone::Sky,
        Zone::Space,
    ];

    pub fn from_index(index: usize) -> Option<Zone> {
        Self::ALL.get(index).copied()
    }

    /// Zone containing world height `y`; heights outside the world clamp to
    /// the nearest end zone
    pub fn at_height(y: f32) -> Zone {
        let index = (y / ZONE_HEIGHT).floor().max(0.0) as usize;
        Self::ALL[index.min(ZONE_COUNT - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower world height of the band
    pub fn bottom(self) -> f32 {
        self.index() as f32 * ZONE_HEIGHT
    }

    /// Upper world height of the band
    pub fn top(self) -> f32 {
        self.bottom() + ZONE_HEIGHT
    }

    /// Half-open membership test `[bottom, top)`
    pub fn contains(self, y: f32) -> bool {
        y >= self.bottom() && y < self.top()
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::Abyss => "Abyss",
            Zone::Underground => "Underground",
            Zone::Surface => "Surface",
            Zone::Sky => "Sky",
            Zone::Space => "Space",
        }
    }

    /// HUD label color
    pub fn label_color(self) -> &'static str {
        match self {
            Zone::Abyss => "#cc88ff",
            Zone::Underground => "#d4a855",
            Zone::Surface => "#66ee44",
            Zone::Sky => "#55ccff",
            Zone::Space => "#aaddff",
        }
    }

    /// Background color at fraction `t` of the band (0 = bottom, 1 = top)
    pub fn background(self, t: f32) -> [u8; 3] {
        let (top, bottom) = BACKGROUND[self.index()];
        lerp_color(top, bottom, 1.0 - t.clamp(0.0, 1.0))
    }

    /// Background color at world height `y`
    pub fn background_at(y: f32) -> [u8; 3] {
        let zone = Self::at_height(y);
        zone.background((y - zone.bottom()) / ZONE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WORLD_HEIGHT;

    #[test]
    fn test_at_height_bands() {
        assert_eq!(Zone::at_height(0.0), Zone::Abyss);
        assert_eq!(Zone::at_height(1399.9), Zone::Abyss);
        assert_eq!(Zone::at_height(1400.0), Zone::Underground);
        assert_eq!(Zone::at_height(4300.0), Zone::Sky);
        assert_eq!(Zone::at_height(WORLD_HEIGHT), Zone::Space);
        assert_eq!(Zone::at_height(-50.0), Zone::Abyss);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in Zone::ALL.windows(2) {
            assert_eq!(pair[0].top(), pair[1].bottom());
        }
        assert_eq!(Zone::Space.top(), WORLD_HEIGHT);
    }

    #[test]
    fn test_background_endpoints() {
        assert_eq!(Zone::Sky.background(1.0), [0x33, 0x77, 0xbb]);
        assert_eq!(Zone::Sky.background(0.0), [0x99, 0xcc, 0xff]);
        assert_eq!(Zone::background_at(Zone::Sky.bottom()), [0x99, 0xcc, 0xff]);
        assert_eq!(Zone::background_at(-10.0), Zone::Abyss.background(0.0));
    }
}
