//! The shared sprite record and the drawing contract.

use crate::assets::SpriteImage;
use crate::core::geometry::Rect;
use std::ops::{Deref, DerefMut};

/// A drawing context the renderer provides.
///
/// `rotate` composes a rotation of `degrees` (clockwise, y pointing down)
/// about `(cx, cy)` onto every later `blit`.
pub trait Surface {
    fn blit(&mut self, image: &SpriteImage, x: i32, y: i32);
    fn rotate(&mut self, degrees: f64, cx: f64, cy: f64);
}

/// Rotates a surface for as long as the guard lives.
///
/// Dropping the guard applies the inverse rotation, so the surface is
/// restored even if drawing unwinds part way through.
pub struct RotationGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    degrees: f64,
    center: (f64, f64),
}

impl<'a, S: Surface + ?Sized> RotationGuard<'a, S> {
    pub fn new(surface: &'a mut S, degrees: f64, center: (f64, f64)) -> Self {
        surface.rotate(degrees, center.0, center.1);
        Self {
            surface,
            degrees,
            center,
        }
    }
}

impl<S: Surface + ?Sized> Deref for RotationGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for RotationGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for RotationGuard<'_, S> {
    fn drop(&mut self) {
        self.surface
            .rotate(-self.degrees, self.center.0, self.center.1);
    }
}

/// Position, rotation and image of one drawable thing.
///
/// The rectangle takes the image's size at construction and keeps it; only
/// the position and rotation change afterwards.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub rect: Rect,
    /// Degrees, clockwise.
    pub rotation: i32,
    pub image: SpriteImage,
}

impl Sprite {
    pub fn new(image: SpriteImage, x: i32, y: i32) -> Self {
        Self {
            rect: Rect::new(x, y, image.width(), image.height()),
            rotation: 0,
            image,
        }
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Swap the image without touching the rectangle.
    pub fn set_image(&mut self, image: SpriteImage) {
        self.image = image;
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.rotation == 0 {
            surface.blit(&self.image, self.rect.x, self.rect.y);
        } else {
            let mut rotated =
                RotationGuard::new(surface, self.rotation as f64, self.rect.center());
            rotated.blit(&self.image, self.rect.x, self.rect.y);
        }
    }
}

/// The per-frame list of sprites, back to front.
#[derive(Debug, Default)]
pub struct DrawQueue {
    sprites: Vec<Sprite>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn add(&mut self, drawable: &impl Drawable) {
        drawable.queue_sprites(self);
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

/// Anything the session can put on screen.
pub trait Drawable {
    /// Append this object's sprites to the queue, back to front.
    fn queue_sprites(&self, queue: &mut DrawQueue);
}

impl Drawable for Sprite {
    fn queue_sprites(&self, queue: &mut DrawQueue) {
        queue.push(self.clone());
    }
}
