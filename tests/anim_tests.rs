//! Animation scheduler tests - channel contract and composition.

use std::f32::consts::PI;

use gridfall::anim::{ChannelKind, ChannelSet, FlipTween, Sprite, Tween};
use gridfall::types::Color;

const GRAY: Color = Color::opaque(128, 128, 128);

#[test]
fn test_ratio_template_slices_exactly() {
    // From 0 to 10 with template [0.5, 1.0]: queue is exactly [5, 10].
    let mut tween = Tween::new(0.0);
    tween.seek(10.0, &[0.5, 1.0]);
    assert_eq!(tween.pending(), 2);
    assert_eq!(tween.tick(), Some(5.0));
    assert_eq!(tween.tick(), Some(10.0));

    // After two ticks the queue is empty and the value rests at 10.
    assert!(!tween.is_active());
    assert_eq!(tween.target(), 10.0);
    assert_eq!(tween.tick(), None);
}

#[test]
fn test_fifo_no_reordering_or_coalescing() {
    let mut tween = Tween::new(0.0);
    tween.seek(4.0, &[0.25, 0.5, 0.75, 1.0]);
    // A second enqueue before draining appends after the pending steps and
    // chains from the final value 4, not from the displayed value 0.
    tween.seek(0.0, &[0.5, 1.0]);

    let drained: Vec<f32> = std::iter::from_fn(|| tween.tick()).collect();
    assert_eq!(drained, vec![1.0, 2.0, 3.0, 4.0, 2.0, 0.0]);
}

#[test]
fn test_channels_consume_one_value_per_tick() {
    let mut sprite = Sprite::new((0.0, 0.0), (30.0, 30.0), GRAY);
    let mut channels = ChannelSet::new();
    channels.register_position((0.0, 0.0));
    channels.register_size((30.0, 30.0));

    channels.position_mut().unwrap().seek((30.0, 0.0), &[0.5, 1.0]);
    channels.size_mut().unwrap().seek((60.0, 60.0), &[0.25, 0.5, 0.75, 1.0]);

    // Position drains in 2 frames, size keeps going for 2 more.
    let mut frames = 0;
    while channels.is_active() {
        channels.tick(&mut sprite);
        frames += 1;
        assert!(frames <= 4, "channels never drained");
    }
    assert_eq!(frames, 4);
    assert_eq!(sprite.center, (30.0, 0.0));
    assert_eq!(sprite.size, (60.0, 60.0));
}

#[test]
fn test_idle_tick_is_idempotent() {
    let mut sprite = Sprite::new((7.0, 7.0), (10.0, 10.0), GRAY);
    let mut channels = ChannelSet::new();
    channels.register_position((7.0, 7.0));

    for _ in 0..5 {
        channels.tick(&mut sprite);
    }
    assert_eq!(sprite.center, (7.0, 7.0));
    assert!(!channels.channel_active(ChannelKind::Position));
}

#[test]
fn test_drained_channel_rests_at_last_target() {
    // No drift: wherever the template points mid-flight, the entity ends on
    // the exact final target of the last enqueue.
    let mut sprite = Sprite::new((0.0, 0.0), (10.0, 10.0), GRAY);
    let mut channels = ChannelSet::new();
    channels.register_position((0.0, 0.0));

    let awkward = [0.1, 0.33, 0.9, 1.0];
    channels.position_mut().unwrap().seek((7.0, -3.0), &awkward);
    channels.position_mut().unwrap().seek((1.0, 1.0), &awkward);
    while channels.is_active() {
        channels.tick(&mut sprite);
    }
    assert_eq!(sprite.center, (1.0, 1.0));
    assert_eq!(channels.position_mut().unwrap().target(), (1.0, 1.0));
}

#[test]
fn test_angle_channel_derives_color_and_quad() {
    let front = Color::opaque(240, 240, 240);
    let back = Color::opaque(20, 20, 20);
    let mut sprite = Sprite::new((15.0, 15.0), (30.0, 30.0), front);
    let mut channels = ChannelSet::new();
    channels.register_angle(FlipTween::new(0.0, front, back));

    // Full turn in four frames, sampled away from the edge-on boundaries.
    channels
        .angle_mut()
        .unwrap()
        .seek(2.0 * PI, &[0.3, 0.55, 0.8, 1.0]);

    let mut colors = Vec::new();
    for _ in 0..4 {
        channels.tick(&mut sprite);
        colors.push(sprite.color);
        assert!(sprite.quad.is_some(), "quad derived every consumed frame");
    }
    assert_eq!(colors, vec![back, back, front, front]);
    assert_eq!(sprite.angle, 2.0 * PI);
}
