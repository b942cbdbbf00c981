//! Transition destinations.
//!
//! A [`Tween`] lists the properties a transition drives, each with its
//! destination value and an optional [`Easing`]. Entries without an easing use
//! the registry's default (`easeInOutQuad` unless configured otherwise).

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::ActionError;

/// One property driven by a transition.
#[derive(Clone, Debug, PartialEq)]
pub struct PropTween<P> {
    pub prop: P,
    pub dest: f32,
    pub easing: Option<Easing>,
}

/// Set of property destinations for [`ActionQueue::to`](super::ActionQueue::to).
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<P> {
    entries: SmallVec<[PropTween<P>; 4]>,
}

impl<P: PartialEq> Default for Tween<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PartialEq> Tween<P> {
    pub fn new() -> Self {
        Tween {
            entries: SmallVec::new(),
        }
    }

    /// Drive `prop` to `dest` with the default easing.
    pub fn to(self, prop: P, dest: f32) -> Self {
        self.push(PropTween {
            prop,
            dest,
            easing: None,
        })
    }

    /// Drive `prop` to `dest` with a specific easing.
    pub fn to_eased(self, prop: P, dest: f32, easing: Easing) -> Self {
        self.push(PropTween {
            prop,
            dest,
            easing: Some(easing),
        })
    }

    /// Drive `prop` to `dest`, resolving the easing by its camelCase name.
    pub fn to_named(self, prop: P, dest: f32, easing: &str) -> Result<Self, ActionError> {
        let easing = easing.parse::<Easing>()?;
        Ok(self.to_eased(prop, dest, easing))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropTween<P>> {
        self.entries.iter()
    }

    pub(crate) fn into_entries(self) -> SmallVec<[PropTween<P>; 4]> {
        self.entries
    }

    // A later entry for the same property replaces the earlier one.
    fn push(mut self, entry: PropTween<P>) -> Self {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.prop == entry.prop) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Prop {
        X,
        Y,
    }

    #[test]
    fn test_tween_new_is_empty() {
        let tw: Tween<Prop> = Tween::new();
        assert!(tw.is_empty());
        assert_eq!(tw.len(), 0);
    }

    #[test]
    fn test_tween_builder_chaining() {
        let tw = Tween::new()
            .to(Prop::X, 10.0)
            .to_eased(Prop::Y, 20.0, Easing::EaseOutBounce);

        let entries: Vec<_> = tw.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prop, Prop::X);
        assert_eq!(entries[0].easing, None);
        assert_eq!(entries[1].dest, 20.0);
        assert_eq!(entries[1].easing, Some(Easing::EaseOutBounce));
    }

    #[test]
    fn test_tween_same_prop_replaces() {
        let tw = Tween::new().to(Prop::X, 10.0).to(Prop::X, 30.0);
        assert_eq!(tw.len(), 1);
        assert_eq!(tw.iter().next().map(|e| e.dest), Some(30.0));
    }

    #[test]
    fn test_tween_named_easing() {
        let tw = Tween::new().to_named(Prop::X, 1.0, "easeInCubic").unwrap();
        assert_eq!(tw.iter().next().unwrap().easing, Some(Easing::EaseInCubic));
    }

    #[test]
    fn test_tween_unknown_named_easing_fails_fast() {
        let err = Tween::new().to_named(Prop::X, 1.0, "wiggle").unwrap_err();
        assert_eq!(err, ActionError::UnknownEasing("wiggle".into()));
    }
}
