// Named numeric attributes for targets without a fixed property set

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;

use crate::target::Target;

/// Free-form target keyed by string. Unset attributes read as `0.0`.
#[derive(Debug, Clone, Default, Component)]
pub struct Attributes {
    pub scalars: FxHashMap<String, f32>,
    pub frame: Option<String>,
}

impl Attributes {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    pub fn get_scalars(&self) -> &FxHashMap<String, f32> {
        &self.scalars
    }
    pub fn frame(&self) -> Option<&str> {
        self.frame.as_deref()
    }
}

impl Target for Attributes {
    type Prop = String;
    type Frame = String;

    fn get(&self, prop: &String) -> f32 {
        self.get_scalar(prop).unwrap_or(0.0)
    }

    fn set(&mut self, prop: &String, value: f32) {
        self.scalars.insert(prop.clone(), value);
    }

    fn set_frame(&mut self, frame: String) {
        self.frame = Some(frame);
    }
}
