//! Galaxy parameters.
//!
//! [`GalaxyParameters`] is the tunable input of the generator. Every numeric
//! field has a declared range and step (see [`ParamField::spec`]) and writes
//! through [`GalaxyParameters::set`] are clamped, so a parameter set can never
//! hold an out-of-range value.
//!
//! ```ignore
//! use galaxy::{GalaxyParameters, ParamField};
//!
//! let mut params = GalaxyParameters::default();
//! params.set(ParamField::Branches, 50.0); // clamped to 20
//! assert_eq!(params.branches(), 20);
//! ```

/// Range, step and label of a single tunable field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Human-readable label shown next to the control.
    pub label: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Control granularity.
    pub step: f64,
    /// Whether the field only takes whole values.
    pub integer: bool,
}

impl ParamSpec {
    /// Clamp `value` into range, rounding integer fields.
    ///
    /// Returns `None` for non-finite input.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let value = if self.integer { value.round() } else { value };
        Some(value.clamp(self.min, self.max))
    }

    /// Whether `value` lies inside the declared range.
    ///
    /// Compared at `f32` precision, which is what the fields are stored as.
    pub fn contains(&self, value: f64) -> bool {
        let value = value as f32;
        value >= self.min as f32 && value <= self.max as f32
    }
}

/// Identifies one numeric field of [`GalaxyParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    /// Number of generated points.
    Count,
    /// On-screen point size.
    Size,
    /// Maximum galaxy radius.
    Radius,
    /// Number of spiral arms.
    Branches,
    /// Angular twist per unit radius.
    Spin,
    /// Maximum random offset, as a fraction of the point's radius.
    Randomness,
    /// Exponent pulling offsets toward the arm centerline.
    RandomnessPower,
}

impl ParamField {
    /// All fields in control panel order.
    pub const ALL: [ParamField; 7] = [
        ParamField::Count,
        ParamField::Size,
        ParamField::Radius,
        ParamField::Branches,
        ParamField::Spin,
        ParamField::Randomness,
        ParamField::RandomnessPower,
    ];

    /// Declared bounds, step and label for this field.
    pub const fn spec(self) -> ParamSpec {
        match self {
            ParamField::Count => ParamSpec {
                label: "count",
                min: 100.0,
                max: 1_000_000.0,
                step: 100.0,
                integer: true,
            },
            ParamField::Size => ParamSpec {
                label: "size",
                min: 0.001,
                max: 0.1,
                step: 0.001,
                integer: false,
            },
            ParamField::Radius => ParamSpec {
                label: "radius",
                min: 0.01,
                max: 20.0,
                step: 0.01,
                integer: false,
            },
            ParamField::Branches => ParamSpec {
                label: "branches",
                min: 2.0,
                max: 20.0,
                step: 1.0,
                integer: true,
            },
            ParamField::Spin => ParamSpec {
                label: "spin",
                min: -5.0,
                max: 5.0,
                step: 0.001,
                integer: false,
            },
            ParamField::Randomness => ParamSpec {
                label: "randomness",
                min: 0.0,
                max: 2.0,
                step: 0.001,
                integer: false,
            },
            ParamField::RandomnessPower => ParamSpec {
                label: "randomness power",
                min: 1.0,
                max: 10.0,
                step: 0.001,
                integer: false,
            },
        }
    }
}

/// Tunable inputs of the galaxy generator.
///
/// Fields are private; every write goes through a clamping setter so the
/// declared ranges always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParameters {
    count: u32,
    size: f32,
    radius: f32,
    branches: u32,
    spin: f32,
    randomness: f32,
    randomness_power: f32,
    inside_color: [f32; 3],
    outside_color: [f32; 3],
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: hex_rgb(0xff6030),
            outside_color: hex_rgb(0x1b3984),
        }
    }
}

impl GalaxyParameters {
    /// Create a parameter set with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn branches(&self) -> u32 {
        self.branches
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn randomness(&self) -> f32 {
        self.randomness
    }

    pub fn randomness_power(&self) -> f32 {
        self.randomness_power
    }

    /// Color at the galaxy core (sRGB, 0.0-1.0).
    pub fn inside_color(&self) -> [f32; 3] {
        self.inside_color
    }

    /// Color at the galaxy rim (sRGB, 0.0-1.0).
    pub fn outside_color(&self) -> [f32; 3] {
        self.outside_color
    }

    /// Read a numeric field.
    pub fn get(&self, field: ParamField) -> f64 {
        match field {
            ParamField::Count => self.count as f64,
            ParamField::Size => self.size as f64,
            ParamField::Radius => self.radius as f64,
            ParamField::Branches => self.branches as f64,
            ParamField::Spin => self.spin as f64,
            ParamField::Randomness => self.randomness as f64,
            ParamField::RandomnessPower => self.randomness_power as f64,
        }
    }

    /// Write a numeric field, clamping it into its declared range.
    ///
    /// Returns the value actually stored. Non-finite values are ignored and
    /// the current value is kept.
    pub fn set(&mut self, field: ParamField, value: f64) -> f64 {
        let Some(value) = field.spec().clamp(value) else {
            log::warn!("ignoring non-finite value for {}", field.spec().label);
            return self.get(field);
        };
        match field {
            ParamField::Count => self.count = value as u32,
            ParamField::Size => self.size = value as f32,
            ParamField::Radius => self.radius = value as f32,
            ParamField::Branches => self.branches = value as u32,
            ParamField::Spin => self.spin = value as f32,
            ParamField::Randomness => self.randomness = value as f32,
            ParamField::RandomnessPower => self.randomness_power = value as f32,
        }
        self.get(field)
    }

    /// Set the core color. Channels are clamped to [0, 1].
    pub fn set_inside_color(&mut self, color: [f32; 3]) {
        self.inside_color = clamp_rgb(color);
    }

    /// Set the rim color. Channels are clamped to [0, 1].
    pub fn set_outside_color(&mut self, color: [f32; 3]) {
        self.outside_color = clamp_rgb(color);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: ParamField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_colors(mut self, inside: [f32; 3], outside: [f32; 3]) -> Self {
        self.set_inside_color(inside);
        self.set_outside_color(outside);
        self
    }

    /// A copy with every field forced back into range.
    ///
    /// Setters already maintain the ranges; the generator calls this anyway
    /// so it never depends on how a parameter set was produced.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for field in ParamField::ALL {
            out.set(field, self.get(field));
        }
        out.inside_color = clamp_rgb(self.inside_color);
        out.outside_color = clamp_rgb(self.outside_color);
        out
    }

    /// Whether every numeric field is inside its declared range.
    pub fn is_valid(&self) -> bool {
        ParamField::ALL
            .iter()
            .all(|field| field.spec().contains(self.get(*field)))
    }
}

fn clamp_rgb(color: [f32; 3]) -> [f32; 3] {
    color.map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 })
}

fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GalaxyParameters::default();
        assert!(params.is_valid());
        assert_eq!(params.count(), 100_000);
        assert_eq!(params.branches(), 3);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut params = GalaxyParameters::default();

        assert_eq!(params.set(ParamField::Count, 5.0), 100.0);
        assert_eq!(params.set(ParamField::Count, 2_000_000.0), 1_000_000.0);
        assert_eq!(params.set(ParamField::Branches, 1.0), 2.0);
        assert_eq!(params.set(ParamField::Spin, -9.0), -5.0);
        assert_eq!(params.set(ParamField::Randomness, 3.5), 2.0);
        assert_eq!(params.set(ParamField::RandomnessPower, 0.0), 1.0);
        assert!(params.is_valid());
    }

    #[test]
    fn test_integer_fields_round() {
        let mut params = GalaxyParameters::default();
        params.set(ParamField::Branches, 4.6);
        assert_eq!(params.branches(), 5);
        params.set(ParamField::Count, 1234.4);
        assert_eq!(params.count(), 1234);
    }

    #[test]
    fn test_non_finite_write_is_ignored() {
        let mut params = GalaxyParameters::default();
        let before = params.radius();
        params.set(ParamField::Radius, f64::NAN);
        params.set(ParamField::Radius, f64::INFINITY);
        assert_eq!(params.radius(), before);
    }

    #[test]
    fn test_color_channels_clamped() {
        let params =
            GalaxyParameters::default().with_colors([2.0, -1.0, 0.5], [f32::NAN, 0.25, 1.0]);
        assert_eq!(params.inside_color(), [1.0, 0.0, 0.5]);
        assert_eq!(params.outside_color(), [0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_field_ranges_well_formed() {
        for field in ParamField::ALL {
            let spec = field.spec();
            assert!(spec.min < spec.max, "{}", spec.label);
            assert!(spec.step > 0.0 && spec.step <= spec.max - spec.min, "{}", spec.label);
        }
    }
}
