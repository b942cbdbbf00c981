use std::sync::Arc;

use bevy_ecs::prelude::Component;

use crate::target::Target;

/// Sprite is identified by a texture key plus the transform values actions
/// can animate. `tex_key` is the frame slot written by frame animations.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: Arc<str>,
    pub x: f32,
    pub y: f32,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// 0.0 transparent, 1.0 opaque.
    pub alpha: f32,
}

/// Animatable sprite properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteProp {
    X,
    Y,
    Rotation,
    ScaleX,
    ScaleY,
    Alpha,
}

impl Sprite {
    pub fn new(tex_key: impl Into<Arc<str>>) -> Self {
        Sprite {
            tex_key: tex_key.into(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

impl Target for Sprite {
    type Prop = SpriteProp;
    type Frame = Arc<str>;

    fn get(&self, prop: &SpriteProp) -> f32 {
        match prop {
            SpriteProp::X => self.x,
            SpriteProp::Y => self.y,
            SpriteProp::Rotation => self.rotation,
            SpriteProp::ScaleX => self.scale_x,
            SpriteProp::ScaleY => self.scale_y,
            SpriteProp::Alpha => self.alpha,
        }
    }

    fn set(&mut self, prop: &SpriteProp, value: f32) {
        match prop {
            SpriteProp::X => self.x = value,
            SpriteProp::Y => self.y = value,
            SpriteProp::Rotation => self.rotation = value,
            SpriteProp::ScaleX => self.scale_x = value,
            SpriteProp::ScaleY => self.scale_y = value,
            SpriteProp::Alpha => self.alpha = value,
        }
    }

    fn set_frame(&mut self, frame: Arc<str>) {
        self.tex_key = frame;
    }
}
