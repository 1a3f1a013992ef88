//! Frame-based animation scheduler.
//!
//! Entities animate through per-channel FIFO queues of pre-sliced values.
//! A transition is enqueued once, subdivided by a ratio template, and then
//! consumed one value per rendered frame; nothing here knows about wall-clock
//! time. The host drives consumption from whatever tick source it owns.
//!
//! - [`tween`]: scalar and 2D value queues ([`Tween`], [`Tween2`])
//! - [`flip`]: the angle channel with its derived face color and display quad
//! - [`channel`]: channel kinds, the per-entity [`ChannelSet`], and the
//!   [`Sprite`] presentation state channels write into
//!
//! # Example
//!
//! ```
//! use gridfall_anim::{ChannelSet, Sprite};
//! use gridfall_types::Color;
//!
//! let mut sprite = Sprite::new((0.0, 0.0), (30.0, 30.0), Color::opaque(200, 200, 200));
//! let mut channels = ChannelSet::new();
//! channels.register_position((0.0, 0.0));
//!
//! channels.position_mut().unwrap().seek((10.0, 0.0), &[0.5, 1.0]);
//! channels.tick(&mut sprite);
//! assert_eq!(sprite.center, (5.0, 0.0));
//! channels.tick(&mut sprite);
//! assert_eq!(sprite.center, (10.0, 0.0));
//! assert!(!channels.is_active());
//! ```

pub mod channel;
pub mod flip;
pub mod tween;

pub use channel::{ChannelKind, ChannelSet, Sprite};
pub use flip::{front_facing, x_flip_quad, y_flip_quad, FlipAxis, FlipTween};
pub use tween::{Tween, Tween2};
