//! Per-entity channel composition.
//!
//! An entity registers at most one channel per [`ChannelKind`]; a composite
//! tick advances every registered channel once, in the fixed enumeration
//! order. Selecting channels by kind (rather than by the runtime type of the
//! animation) keeps dispatch static and the set of channels closed.

use gridfall_types::{Color, Vec2};

use crate::flip::FlipTween;
use crate::tween::Tween2;

/// The presentation state channels write into.
///
/// A sprite is owned by whatever entity it presents (a tile, a shape) next to
/// that entity's grid-position data; the two concerns stay in separate fields
/// rather than one inheritance ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Pixel-space center.
    pub center: Vec2,
    /// Pixel-space size.
    pub size: Vec2,
    /// Displayed flip angle, radians.
    pub angle: f32,
    /// Displayed face color.
    pub color: Color,
    /// Mid-flip display quad; `None` when the entity lies flat.
    pub quad: Option<[Vec2; 4]>,
}

impl Sprite {
    pub fn new(center: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            center,
            size,
            angle: 0.0,
            color,
            quad: None,
        }
    }

    /// Axis-aligned rectangle at the current center and size, corners
    /// clockwise from the upper left.
    pub fn rect(&self) -> [Vec2; 4] {
        let (cx, cy) = self.center;
        let (hw, hh) = (self.size.0 / 2.0, self.size.1 / 2.0);
        [
            (cx - hw, cy - hh),
            (cx + hw, cy - hh),
            (cx + hw, cy + hh),
            (cx - hw, cy + hh),
        ]
    }
}

/// The closed set of animatable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Position,
    Size,
    Angle,
}

impl ChannelKind {
    /// Every kind, in composite tick order.
    pub const ALL: [ChannelKind; 3] = [ChannelKind::Position, ChannelKind::Size, ChannelKind::Angle];
}

/// The channels registered on one entity.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    position: Option<Tween2>,
    size: Option<Tween2>,
    angle: Option<FlipTween>,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_position(&mut self, initial: Vec2) -> &mut Tween2 {
        self.position.insert(Tween2::new(initial))
    }

    pub fn register_size(&mut self, initial: Vec2) -> &mut Tween2 {
        self.size.insert(Tween2::new(initial))
    }

    pub fn register_angle(&mut self, flip: FlipTween) -> &mut FlipTween {
        self.angle.insert(flip)
    }

    pub fn position_mut(&mut self) -> Option<&mut Tween2> {
        self.position.as_mut()
    }

    pub fn size_mut(&mut self) -> Option<&mut Tween2> {
        self.size.as_mut()
    }

    pub fn angle_mut(&mut self) -> Option<&mut FlipTween> {
        self.angle.as_mut()
    }

    pub fn is_registered(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Position => self.position.is_some(),
            ChannelKind::Size => self.size.is_some(),
            ChannelKind::Angle => self.angle.is_some(),
        }
    }

    /// True if the given channel has queued steps.
    pub fn channel_active(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Position => self.position.as_ref().is_some_and(Tween2::is_active),
            ChannelKind::Size => self.size.as_ref().is_some_and(Tween2::is_active),
            ChannelKind::Angle => self.angle.as_ref().is_some_and(FlipTween::is_active),
        }
    }

    /// True if any registered channel has queued steps.
    pub fn is_active(&self) -> bool {
        ChannelKind::ALL.iter().any(|&k| self.channel_active(k))
    }

    /// Advance one channel one frame.
    pub fn tick_channel(&mut self, kind: ChannelKind, sprite: &mut Sprite) {
        match kind {
            ChannelKind::Position => {
                if let Some(value) = self.position.as_mut().and_then(Tween2::tick) {
                    sprite.center = value;
                }
            }
            ChannelKind::Size => {
                if let Some(value) = self.size.as_mut().and_then(Tween2::tick) {
                    sprite.size = value;
                }
            }
            ChannelKind::Angle => {
                if let Some(flip) = self.angle.as_mut() {
                    flip.tick(sprite);
                }
            }
        }
    }

    /// Advance every registered channel one frame, in enumeration order.
    ///
    /// Position and size land before the angle channel reads them, so a
    /// mid-flip quad is derived from this frame's geometry.
    pub fn tick(&mut self, sprite: &mut Sprite) {
        for kind in ChannelKind::ALL {
            self.tick_channel(kind, sprite);
        }
    }
}
