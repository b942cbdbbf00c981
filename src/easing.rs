//! Easing functions for smooth interpolation.
//!
//! Every function maps a normalized progress value `pos` (conventionally in
//! `[0.0, 1.0]`) to an eased progress value. The standard families
//! (quad, cubic, quart, quint, sine, expo, circ, back) come in `In`, `Out` and
//! `InOut` forms and all satisfy `f(0) = 0` and `f(1) = 1`. Inputs are not
//! clamped: `back`, `elastic` and `spring` curves overshoot on purpose.
//!
//! [`Easing`] names each function so transitions can select one per property,
//! either directly or by parsing the camelCase name (`"easeOutBounce"`).
//!
//! [`flicker`] is the only non-deterministic curve. Its jitter comes from an
//! explicit [`RandomSource`] so tests can pin it with [`FixedSource`].

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

const BACK_S: f32 = 1.70158;
const DEFAULT_PULSES: u32 = 5;
const DEFAULT_BLINKS: u32 = 5;

/// Source of uniformly distributed values in `[0.0, 1.0)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f32 {
        self.f32()
    }
}

/// Always returns the same value. `FixedSource(0.5)` makes [`flicker`] jitter-free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(pub f32);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

// ==================== STANDARD FAMILIES ====================

pub fn ease_in_quad(pos: f32) -> f32 {
    pos.powi(2)
}

pub fn ease_out_quad(pos: f32) -> f32 {
    -((pos - 1.0).powi(2) - 1.0)
}

pub fn ease_in_out_quad(pos: f32) -> f32 {
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * p.powi(2);
    }
    let p = p - 2.0;
    -0.5 * (p * p - 2.0)
}

pub fn ease_in_cubic(pos: f32) -> f32 {
    pos.powi(3)
}

pub fn ease_out_cubic(pos: f32) -> f32 {
    (pos - 1.0).powi(3) + 1.0
}

pub fn ease_in_out_cubic(pos: f32) -> f32 {
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * p.powi(3);
    }
    0.5 * ((p - 2.0).powi(3) + 2.0)
}

pub fn ease_in_quart(pos: f32) -> f32 {
    pos.powi(4)
}

pub fn ease_out_quart(pos: f32) -> f32 {
    -((pos - 1.0).powi(4) - 1.0)
}

pub fn ease_in_out_quart(pos: f32) -> f32 {
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * p.powi(4);
    }
    let p = p - 2.0;
    -0.5 * (p * p.powi(3) - 2.0)
}

pub fn ease_in_quint(pos: f32) -> f32 {
    pos.powi(5)
}

pub fn ease_out_quint(pos: f32) -> f32 {
    (pos - 1.0).powi(5) + 1.0
}

pub fn ease_in_out_quint(pos: f32) -> f32 {
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * p.powi(5);
    }
    0.5 * ((p - 2.0).powi(5) + 2.0)
}

pub fn ease_in_sine(pos: f32) -> f32 {
    -(pos * (PI / 2.0)).cos() + 1.0
}

pub fn ease_out_sine(pos: f32) -> f32 {
    (pos * (PI / 2.0)).sin()
}

pub fn ease_in_out_sine(pos: f32) -> f32 {
    -0.5 * ((PI * pos).cos() - 1.0)
}

pub fn ease_in_expo(pos: f32) -> f32 {
    if pos == 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * (pos - 1.0))
    }
}

pub fn ease_out_expo(pos: f32) -> f32 {
    if pos == 1.0 {
        1.0
    } else {
        -(2f32.powf(-10.0 * pos)) + 1.0
    }
}

pub fn ease_in_out_expo(pos: f32) -> f32 {
    if pos == 0.0 {
        return 0.0;
    }
    if pos == 1.0 {
        return 1.0;
    }
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * 2f32.powf(10.0 * (p - 1.0));
    }
    0.5 * (-(2f32.powf(-10.0 * (p - 1.0))) + 2.0)
}

pub fn ease_in_circ(pos: f32) -> f32 {
    -((1.0 - pos * pos).sqrt() - 1.0)
}

pub fn ease_out_circ(pos: f32) -> f32 {
    (1.0 - (pos - 1.0).powi(2)).sqrt()
}

pub fn ease_in_out_circ(pos: f32) -> f32 {
    let p = pos / 0.5;
    if p < 1.0 {
        return -0.5 * ((1.0 - p * p).sqrt() - 1.0);
    }
    let p = p - 2.0;
    0.5 * ((1.0 - p * p).sqrt() + 1.0)
}

pub fn ease_in_back(pos: f32) -> f32 {
    pos * pos * ((BACK_S + 1.0) * pos - BACK_S)
}

pub fn ease_out_back(pos: f32) -> f32 {
    let p = pos - 1.0;
    p * p * ((BACK_S + 1.0) * p + BACK_S) + 1.0
}

pub fn ease_in_out_back(pos: f32) -> f32 {
    let s = BACK_S * 1.525;
    let p = pos / 0.5;
    if p < 1.0 {
        return 0.5 * (p * p * ((s + 1.0) * p - s));
    }
    let p = p - 2.0;
    0.5 * (p * p * ((s + 1.0) * p + s) + 2.0)
}

// ==================== BOUNCE / ELASTIC / SWING ====================

pub fn ease_out_bounce(pos: f32) -> f32 {
    if pos < 1.0 / 2.75 {
        7.5625 * pos * pos
    } else if pos < 2.0 / 2.75 {
        let p = pos - 1.5 / 2.75;
        7.5625 * p * p + 0.75
    } else if pos < 2.5 / 2.75 {
        let p = pos - 2.25 / 2.75;
        7.5625 * p * p + 0.9375
    } else {
        let p = pos - 2.625 / 2.75;
        7.5625 * p * p + 0.984375
    }
}

pub fn bounce(pos: f32) -> f32 {
    ease_out_bounce(pos)
}

/// Bounces past the end instead of settling under it.
pub fn bounce_past(pos: f32) -> f32 {
    if pos < 1.0 / 2.75 {
        7.5625 * pos * pos
    } else if pos < 2.0 / 2.75 {
        let p = pos - 1.5 / 2.75;
        2.0 - (7.5625 * p * p + 0.75)
    } else if pos < 2.5 / 2.75 {
        let p = pos - 2.25 / 2.75;
        2.0 - (7.5625 * p * p + 0.9375)
    } else {
        let p = pos - 2.625 / 2.75;
        2.0 - (7.5625 * p * p + 0.984375)
    }
}

pub fn elastic(pos: f32) -> f32 {
    -1.0 * 4f32.powf(-8.0 * pos) * ((pos * 6.0 - 1.0) * (2.0 * PI) / 2.0).sin() + 1.0
}

pub fn swing_from_to(pos: f32) -> f32 {
    ease_in_out_back(pos)
}

pub fn swing_from(pos: f32) -> f32 {
    ease_in_back(pos)
}

pub fn swing_to(pos: f32) -> f32 {
    ease_out_back(pos)
}

pub fn ease_from_to(pos: f32) -> f32 {
    ease_in_out_quart(pos)
}

pub fn ease_from(pos: f32) -> f32 {
    pos.powi(4)
}

pub fn ease_to(pos: f32) -> f32 {
    pos.powf(0.25)
}

// ==================== MISC ====================

pub fn linear(pos: f32) -> f32 {
    pos
}

pub fn sinusoidal(pos: f32) -> f32 {
    (-(pos * PI).cos() / 2.0) + 0.5
}

pub fn reverse(pos: f32) -> f32 {
    1.0 - pos
}

/// Plays `transition` forward over the first half and backward over the second.
/// Defaults to [`sinusoidal`].
pub fn mirror(pos: f32, transition: Option<fn(f32) -> f32>) -> f32 {
    let transition = transition.unwrap_or(sinusoidal);
    if pos < 0.5 {
        transition(pos * 2.0)
    } else {
        transition(1.0 - (pos - 0.5) * 2.0)
    }
}

/// [`sinusoidal`] with up to ±0.1 of jitter drawn from `rng`.
pub fn flicker(pos: f32, rng: &mut dyn RandomSource) -> f32 {
    let pos = pos + (rng.next_unit() - 0.5) / 5.0;
    sinusoidal(pos.clamp(0.0, 1.0))
}

pub fn wobble(pos: f32) -> f32 {
    (-(pos * PI * (9.0 * pos)).cos() / 2.0) + 0.5
}

pub fn pulse(pos: f32, pulses: Option<u32>) -> f32 {
    let pulses = pulses.unwrap_or(DEFAULT_PULSES) as f32;
    (-((pos * (pulses - 0.5) * 2.0) * PI).cos() / 2.0) + 0.5
}

/// Step function: returns `0.0` or `1.0`.
pub fn blink(pos: f32, blinks: Option<u32>) -> f32 {
    let blinks = blinks.unwrap_or(DEFAULT_BLINKS) as f32;
    (pos * blinks).round().rem_euclid(2.0)
}

pub fn spring(pos: f32) -> f32 {
    1.0 - ((pos * 4.5 * PI).cos() * (-pos * 6.0).exp())
}

pub fn none(_pos: f32) -> f32 {
    0.0
}

pub fn full(_pos: f32) -> f32 {
    1.0
}

// ==================== NAMED EASINGS ====================

/// Named easing curve, selectable per transitioned property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseOutBounce,
    Elastic,
    SwingFromTo,
    SwingFrom,
    SwingTo,
    Bounce,
    BouncePast,
    EaseFromTo,
    EaseFrom,
    EaseTo,
    Linear,
    Sinusoidal,
    Reverse,
    /// [`mirror`] over [`sinusoidal`].
    Mirror,
    Flicker,
    Wobble,
    /// [`pulse`] with the default pulse count.
    Pulse,
    /// [`blink`] with the default blink count.
    Blink,
    Spring,
    None,
    Full,
}

const NAMES: [(Easing, &str); 45] = [
    (Easing::EaseInQuad, "easeInQuad"),
    (Easing::EaseOutQuad, "easeOutQuad"),
    (Easing::EaseInOutQuad, "easeInOutQuad"),
    (Easing::EaseInCubic, "easeInCubic"),
    (Easing::EaseOutCubic, "easeOutCubic"),
    (Easing::EaseInOutCubic, "easeInOutCubic"),
    (Easing::EaseInQuart, "easeInQuart"),
    (Easing::EaseOutQuart, "easeOutQuart"),
    (Easing::EaseInOutQuart, "easeInOutQuart"),
    (Easing::EaseInQuint, "easeInQuint"),
    (Easing::EaseOutQuint, "easeOutQuint"),
    (Easing::EaseInOutQuint, "easeInOutQuint"),
    (Easing::EaseInSine, "easeInSine"),
    (Easing::EaseOutSine, "easeOutSine"),
    (Easing::EaseInOutSine, "easeInOutSine"),
    (Easing::EaseInExpo, "easeInExpo"),
    (Easing::EaseOutExpo, "easeOutExpo"),
    (Easing::EaseInOutExpo, "easeInOutExpo"),
    (Easing::EaseInCirc, "easeInCirc"),
    (Easing::EaseOutCirc, "easeOutCirc"),
    (Easing::EaseInOutCirc, "easeInOutCirc"),
    (Easing::EaseInBack, "easeInBack"),
    (Easing::EaseOutBack, "easeOutBack"),
    (Easing::EaseInOutBack, "easeInOutBack"),
    (Easing::EaseOutBounce, "easeOutBounce"),
    (Easing::Elastic, "elastic"),
    (Easing::SwingFromTo, "swingFromTo"),
    (Easing::SwingFrom, "swingFrom"),
    (Easing::SwingTo, "swingTo"),
    (Easing::Bounce, "bounce"),
    (Easing::BouncePast, "bouncePast"),
    (Easing::EaseFromTo, "easeFromTo"),
    (Easing::EaseFrom, "easeFrom"),
    (Easing::EaseTo, "easeTo"),
    (Easing::Linear, "linear"),
    (Easing::Sinusoidal, "sinusoidal"),
    (Easing::Reverse, "reverse"),
    (Easing::Mirror, "mirror"),
    (Easing::Flicker, "flicker"),
    (Easing::Wobble, "wobble"),
    (Easing::Pulse, "pulse"),
    (Easing::Blink, "blink"),
    (Easing::Spring, "spring"),
    (Easing::None, "none"),
    (Easing::Full, "full"),
];

impl Easing {
    /// Every named easing, in declaration order.
    pub fn all() -> impl Iterator<Item = Easing> {
        NAMES.iter().map(|(e, _)| *e)
    }

    /// The camelCase name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(e, _)| *e == self)
            .map(|(_, n)| *n)
            .unwrap_or("easeInOutQuad")
    }

    /// Evaluate the curve at `pos`. Only [`Easing::Flicker`] draws from `rng`.
    pub fn apply(self, pos: f32, rng: &mut dyn RandomSource) -> f32 {
        match self {
            Easing::EaseInQuad => ease_in_quad(pos),
            Easing::EaseOutQuad => ease_out_quad(pos),
            Easing::EaseInOutQuad => ease_in_out_quad(pos),
            Easing::EaseInCubic => ease_in_cubic(pos),
            Easing::EaseOutCubic => ease_out_cubic(pos),
            Easing::EaseInOutCubic => ease_in_out_cubic(pos),
            Easing::EaseInQuart => ease_in_quart(pos),
            Easing::EaseOutQuart => ease_out_quart(pos),
            Easing::EaseInOutQuart => ease_in_out_quart(pos),
            Easing::EaseInQuint => ease_in_quint(pos),
            Easing::EaseOutQuint => ease_out_quint(pos),
            Easing::EaseInOutQuint => ease_in_out_quint(pos),
            Easing::EaseInSine => ease_in_sine(pos),
            Easing::EaseOutSine => ease_out_sine(pos),
            Easing::EaseInOutSine => ease_in_out_sine(pos),
            Easing::EaseInExpo => ease_in_expo(pos),
            Easing::EaseOutExpo => ease_out_expo(pos),
            Easing::EaseInOutExpo => ease_in_out_expo(pos),
            Easing::EaseInCirc => ease_in_circ(pos),
            Easing::EaseOutCirc => ease_out_circ(pos),
            Easing::EaseInOutCirc => ease_in_out_circ(pos),
            Easing::EaseInBack => ease_in_back(pos),
            Easing::EaseOutBack => ease_out_back(pos),
            Easing::EaseInOutBack => ease_in_out_back(pos),
            Easing::EaseOutBounce => ease_out_bounce(pos),
            Easing::Elastic => elastic(pos),
            Easing::SwingFromTo => swing_from_to(pos),
            Easing::SwingFrom => swing_from(pos),
            Easing::SwingTo => swing_to(pos),
            Easing::Bounce => bounce(pos),
            Easing::BouncePast => bounce_past(pos),
            Easing::EaseFromTo => ease_from_to(pos),
            Easing::EaseFrom => ease_from(pos),
            Easing::EaseTo => ease_to(pos),
            Easing::Linear => linear(pos),
            Easing::Sinusoidal => sinusoidal(pos),
            Easing::Reverse => reverse(pos),
            Easing::Mirror => mirror(pos, None),
            Easing::Flicker => flicker(pos, rng),
            Easing::Wobble => wobble(pos),
            Easing::Pulse => pulse(pos, None),
            Easing::Blink => blink(pos, None),
            Easing::Spring => spring(pos),
            Easing::None => none(pos),
            Easing::Full => full(pos),
        }
    }
}

impl FromStr for Easing {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(_, n)| *n == s)
            .map(|(e, _)| *e)
            .ok_or_else(|| ActionError::UnknownEasing(s.to_string()))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    const STANDARD: [Easing; 24] = [
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
    ];

    // ==================== ENDPOINT TESTS ====================

    #[test]
    fn test_standard_easings_at_zero() {
        let mut rng = FixedSource(0.5);
        for easing in STANDARD {
            assert!(
                approx_eq(easing.apply(0.0, &mut rng), 0.0),
                "{:?} at pos=0.0 should be 0.0",
                easing
            );
        }
    }

    #[test]
    fn test_standard_easings_at_one() {
        let mut rng = FixedSource(0.5);
        for easing in STANDARD {
            assert!(
                approx_eq(easing.apply(1.0, &mut rng), 1.0),
                "{:?} at pos=1.0 should be 1.0",
                easing
            );
        }
    }

    #[test]
    fn test_in_out_quad_midpoint() {
        assert!(approx_eq(ease_in_out_quad(0.5), 0.5));
        assert!(approx_eq(ease_in_out_quad(0.25), 0.125));
        assert!(approx_eq(ease_in_out_quad(0.75), 0.875));
    }

    #[test]
    fn test_bounce_endpoints() {
        assert!(approx_eq(bounce(0.0), 0.0));
        assert!(approx_eq(bounce(1.0), 1.0));
        assert!(approx_eq(ease_out_bounce(1.0), 1.0));
        assert!(bounce_past(0.8) > 1.0);
    }

    #[test]
    fn test_back_overshoots() {
        assert!(ease_in_back(0.2) < 0.0);
        assert!(ease_out_back(0.8) > 1.0);
    }

    // ==================== MISC TESTS ====================

    #[test]
    fn test_linear_and_reverse() {
        assert!(approx_eq(linear(0.3), 0.3));
        assert!(approx_eq(reverse(0.3), 0.7));
    }

    #[test]
    fn test_constant_curves() {
        for pos in [0.0, 0.4, 1.0] {
            assert_eq!(none(pos), 0.0);
            assert_eq!(full(pos), 1.0);
        }
    }

    #[test]
    fn test_mirror_folds_around_midpoint() {
        assert!(approx_eq(mirror(0.25, None), mirror(0.75, None)));
        assert!(approx_eq(mirror(0.5, None), 1.0));
        assert!(approx_eq(mirror(0.25, Some(linear)), 0.5));
        assert!(approx_eq(mirror(1.0, Some(linear)), 0.0));
    }

    #[test]
    fn test_flicker_with_centered_source_matches_sinusoidal() {
        let mut rng = FixedSource(0.5);
        for pos in [0.0, 0.3, 0.6, 1.0] {
            assert!(approx_eq(flicker(pos, &mut rng), sinusoidal(pos)));
        }
    }

    #[test]
    fn test_flicker_jitter_is_bounded_and_clamped() {
        let mut low = FixedSource(0.0);
        let mut high = FixedSource(1.0);
        assert!(approx_eq(flicker(0.0, &mut low), 0.0));
        assert!(approx_eq(flicker(1.0, &mut high), 1.0));
        assert!(approx_eq(flicker(0.5, &mut high), sinusoidal(0.6)));
    }

    #[test]
    fn test_flicker_with_fastrand_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for i in 0..=20 {
            let v = flicker(i as f32 / 20.0, &mut rng);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_blink_is_step_function() {
        for i in 0..=50 {
            let v = blink(i as f32 / 50.0, None);
            assert!(v == 0.0 || v == 1.0);
        }
        assert_eq!(blink(0.0, None), 0.0);
        assert_eq!(blink(0.2, None), 1.0);
        assert_eq!(blink(0.5, Some(2)), 1.0);
    }

    #[test]
    fn test_pulse_and_spring_endpoints() {
        assert!(approx_eq(pulse(0.0, None), 0.0));
        assert!(approx_eq(pulse(1.0, None), 1.0));
        assert!(approx_eq(spring(0.0), 0.0));
        assert!((spring(1.0) - 1.0).abs() < 0.01);
    }

    // ==================== NAME TESTS ====================

    #[test]
    fn test_names_round_trip() {
        for easing in Easing::all() {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert_eq!(Easing::all().count(), 45);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            "easeSideways".parse::<Easing>(),
            Err(ActionError::UnknownEasing("easeSideways".to_string()))
        );
    }

    #[test]
    fn test_default_is_ease_in_out_quad() {
        assert_eq!(Easing::default(), Easing::EaseInOutQuad);
        assert_eq!(Easing::default().to_string(), "easeInOutQuad");
    }
}
