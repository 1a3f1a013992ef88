//! The angle channel: flip tweens and their derived presentation.
//!
//! Consuming an angle step does more than store the angle. The displayed face
//! color flips as the angle crosses the vertical, and the entity's display
//! quad is recomputed each frame so a rectangle appears to turn over in
//! place. Both derivations come from the same consumed angle, size, and
//! center.

use std::f32::consts::PI;

use gridfall_types::{Color, Vec2};

use crate::channel::Sprite;
use crate::tween::Tween;

/// Perceived thickness of an edge-on rectangle, in pixels.
const EDGE_THICKNESS: f32 = 4.0;

/// Which axis the rectangle turns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Turns about the horizontal midline (top and bottom edges sweep).
    Horizontal,
    /// Turns about the vertical midline (left and right edges sweep).
    Vertical,
}

/// A point on the oval traced by a rectangle corner mid-flip.
fn oval_pos(size: Vec2, center: Vec2, angle: f32) -> Vec2 {
    (
        center.0 + angle.cos() * size.0 / 2.0,
        center.1 + angle.sin() * size.1 / 2.0,
    )
}

/// Display quad for a rectangle flipping about its horizontal midline.
pub fn x_flip_quad(size: Vec2, center: Vec2, angle: f32) -> [Vec2; 4] {
    let upper = (center.0, center.1 - size.1 / 2.0);
    let lower = (center.0, center.1 + size.1 / 2.0);
    let edge = (size.0, EDGE_THICKNESS);
    [
        oval_pos(edge, upper, angle + PI),
        oval_pos(edge, upper, angle),
        oval_pos(edge, lower, -angle),
        oval_pos(edge, lower, -angle + PI),
    ]
}

/// Display quad for a rectangle flipping about its vertical midline.
pub fn y_flip_quad(size: Vec2, center: Vec2, angle: f32) -> [Vec2; 4] {
    let left = (center.0 - size.0 / 2.0, center.1);
    let right = (center.0 + size.0 / 2.0, center.1);
    let edge = (EDGE_THICKNESS, size.1);
    [
        oval_pos(edge, left, angle + PI / 2.0),
        oval_pos(edge, left, angle - PI / 2.0),
        oval_pos(edge, right, -angle - PI / 2.0),
        oval_pos(edge, right, -angle + PI / 2.0),
    ]
}

/// True if the front face is showing at the given angle.
pub fn front_facing(angle: f32) -> bool {
    (angle + PI / 2.0).rem_euclid(2.0 * PI) < PI
}

/// An angle channel with front/back faces.
#[derive(Debug, Clone)]
pub struct FlipTween {
    tween: Tween,
    front: Color,
    back: Color,
    axis: FlipAxis,
}

impl FlipTween {
    pub fn new(angle: f32, front: Color, back: Color) -> Self {
        Self {
            tween: Tween::new(angle),
            front,
            back,
            axis: FlipAxis::Horizontal,
        }
    }

    pub fn with_axis(mut self, axis: FlipAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn set_front(&mut self, color: Color) {
        self.front = color;
    }

    pub fn set_back(&mut self, color: Color) {
        self.back = color;
    }

    /// The angle the queue drains toward.
    pub fn target(&self) -> f32 {
        self.tween.target()
    }

    /// Queue a turn to an absolute angle.
    pub fn seek(&mut self, angle: f32, ratios: &[f32]) {
        self.tween.seek(angle, ratios);
    }

    /// Queue a turn by a relative angle.
    pub fn seek_by(&mut self, delta: f32, ratios: &[f32]) {
        self.tween.seek_by(delta, ratios);
    }

    pub fn is_active(&self) -> bool {
        self.tween.is_active()
    }

    /// Consume one angle step and refresh the sprite's face and quad.
    ///
    /// No-op while the queue is empty; the sprite keeps its last derived
    /// state.
    pub fn tick(&mut self, sprite: &mut Sprite) {
        let Some(angle) = self.tween.tick() else {
            return;
        };
        sprite.angle = angle;
        sprite.color = if front_facing(angle) {
            self.front
        } else {
            self.back
        };
        sprite.quad = Some(match self.axis {
            FlipAxis::Horizontal => x_flip_quad(sprite.size, sprite.center, angle),
            FlipAxis::Vertical => y_flip_quad(sprite.size, sprite.center, angle),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONT: Color = Color::opaque(250, 250, 250);
    const BACK: Color = Color::opaque(40, 40, 40);

    #[test]
    fn test_front_facing_window() {
        assert!(front_facing(0.0));
        assert!(front_facing(PI / 4.0));
        assert!(!front_facing(PI));
        assert!(!front_facing(-PI));
        // The window repeats every full turn.
        assert!(front_facing(2.0 * PI));
        assert!(!front_facing(3.0 * PI));
    }

    #[test]
    fn test_flip_updates_face_color() {
        let mut sprite = Sprite::new((50.0, 50.0), (30.0, 30.0), FRONT);
        let mut flip = FlipTween::new(0.0, FRONT, BACK);

        // Half turn over two frames: edge-on, then showing the back.
        flip.seek(PI, &[0.5, 1.0]);

        flip.tick(&mut sprite);
        assert_eq!(sprite.angle, PI / 2.0);
        assert!(!front_facing(sprite.angle));
        assert_eq!(sprite.color, BACK);

        flip.tick(&mut sprite);
        assert_eq!(sprite.angle, PI);
        assert_eq!(sprite.color, BACK);
        assert!(!flip.is_active());
    }

    #[test]
    fn test_flip_back_to_front() {
        let mut sprite = Sprite::new((0.0, 0.0), (20.0, 20.0), BACK);
        let mut flip = FlipTween::new(PI, FRONT, BACK);
        flip.seek(2.0 * PI, &[1.0]);
        flip.tick(&mut sprite);
        assert_eq!(sprite.color, FRONT);
    }

    #[test]
    fn test_flat_quad_spans_the_rect() {
        // At angle 0 the horizontal flip quad lies flat: full width, corners
        // at the top and bottom edges.
        let quad = x_flip_quad((30.0, 20.0), (50.0, 50.0), 0.0);
        assert_eq!(quad[0], (35.0, 40.0));
        assert_eq!(quad[1], (65.0, 40.0));
        assert_eq!(quad[2], (65.0, 60.0));
        assert_eq!(quad[3], (35.0, 60.0));
    }

    #[test]
    fn test_edge_on_quad_collapses_to_thickness() {
        // At a quarter turn the rectangle is edge-on: x extent collapses to
        // the center line, y extent is the visual thickness.
        let quad = x_flip_quad((30.0, 20.0), (50.0, 50.0), PI / 2.0);
        for (x, _) in quad {
            assert!((x - 50.0).abs() < 1e-4);
        }
        let ys: Vec<f32> = quad.iter().map(|&(_, y)| y).collect();
        let span = ys.iter().cloned().fold(f32::MIN, f32::max)
            - ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((span - 24.0).abs() < 1e-4); // rect height +/- edge thickness
    }

    #[test]
    fn test_tick_empty_keeps_sprite() {
        let mut sprite = Sprite::new((1.0, 2.0), (10.0, 10.0), FRONT);
        let mut flip = FlipTween::new(0.0, FRONT, BACK);
        flip.tick(&mut sprite);
        assert_eq!(sprite.color, FRONT);
        assert_eq!(sprite.quad, None);
    }
}
