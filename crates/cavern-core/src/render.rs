use crate::config::GraphicsQuality;
use crate::units::Pixel;
use crate::vector::Vector;

/// Rendering seam. Actors pick which sprite to show and where; the canvas
/// owns textures and does the actual drawing.
pub trait SpriteCanvas {
    /// Drawable handle, typically a texture region.
    type Sprite;

    fn quality(&self) -> GraphicsQuality;

    fn draw_sprite(&mut self, sprite: &Self::Sprite, position: Vector<Pixel>);
}
