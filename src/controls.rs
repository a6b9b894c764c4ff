//! Binding between the control panel and the galaxy parameters.
//!
//! The panel reports two kinds of events: intermediate edits while the
//! operator drags a slider, and a commit when they let go. Only commits
//! regenerate, so a drag across a slider costs one rebuild, not one per frame.

use crate::params::{GalaxyParameters, ParamField, ParamSpec};

/// Owns the live parameter set and gates regeneration on commit.
pub struct ControlBinding {
    params: GalaxyParameters,
    dirty: bool,
    commits: u64,
    status: Option<String>,
}

impl ControlBinding {
    pub fn new(params: GalaxyParameters) -> Self {
        Self {
            params,
            dirty: false,
            commits: 0,
            status: None,
        }
    }

    /// Controls to show: one per numeric field, with bounds and label.
    pub fn controls(&self) -> impl Iterator<Item = (ParamField, ParamSpec)> {
        ParamField::ALL.into_iter().map(|field| (field, field.spec()))
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    /// Whether there are edits not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Commits that triggered a regeneration.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Message describing the last commit outcome.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Record an in-progress value. Clamps; never regenerates.
    pub fn edit(&mut self, field: ParamField, value: f64) -> f64 {
        let before = self.params.get(field);
        let stored = self.params.set(field, value);
        if stored != before {
            self.dirty = true;
        }
        stored
    }

    pub fn edit_inside_color(&mut self, color: [f32; 3]) {
        if color != self.params.inside_color() {
            self.params.set_inside_color(color);
            self.dirty = true;
        }
    }

    pub fn edit_outside_color(&mut self, color: [f32; 3]) {
        if color != self.params.outside_color() {
            self.params.set_outside_color(color);
            self.dirty = true;
        }
    }

    /// Finish an adjustment.
    ///
    /// Calls `regenerate` once with the current parameters if anything
    /// changed since the last commit, otherwise does nothing and returns
    /// `None`.
    pub fn commit<T, E, F>(&mut self, regenerate: F) -> Option<Result<T, E>>
    where
        F: FnOnce(&GalaxyParameters) -> Result<T, E>,
        E: std::fmt::Display,
    {
        if !self.dirty {
            return None;
        }
        Some(self.force_commit(regenerate))
    }

    /// Regenerate with the current parameters whether or not they changed.
    pub fn force_commit<T, E, F>(&mut self, regenerate: F) -> Result<T, E>
    where
        F: FnOnce(&GalaxyParameters) -> Result<T, E>,
        E: std::fmt::Display,
    {
        self.dirty = false;
        self.commits += 1;
        let result = regenerate(&self.params);
        self.status = match &result {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_then_single_commit() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        let mut calls = 0;

        for i in 0..10 {
            binding.edit(ParamField::Spin, i as f64 * 0.1);
        }
        assert_eq!(calls, 0);

        let result = binding.commit(|_| -> Result<(), String> {
            calls += 1;
            Ok(())
        });
        assert!(matches!(result, Some(Ok(()))));
        assert_eq!(calls, 1);
        assert_eq!(binding.commits(), 1);
        assert!(!binding.is_dirty());
    }

    #[test]
    fn test_commit_without_edits_is_noop() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        let result = binding.commit(|_| -> Result<(), String> { panic!("should not regenerate") });
        assert!(result.is_none());
    }

    #[test]
    fn test_commit_sees_latest_values() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        binding.edit(ParamField::Branches, 4.0);
        binding.edit(ParamField::Branches, 7.0);

        let mut seen = 0;
        binding
            .commit(|p| -> Result<(), String> {
                seen = p.branches();
                Ok(())
            })
            .unwrap()
            .unwrap();
        assert_eq!(seen, 7);
    }

    #[test]
    fn test_edit_clamps() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        assert_eq!(binding.edit(ParamField::Randomness, 10.0), 2.0);
        assert_eq!(binding.params().randomness(), 2.0);
    }

    #[test]
    fn test_unchanged_edit_does_not_dirty() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        let current = binding.params().get(ParamField::Count);
        binding.edit(ParamField::Count, current);
        assert!(!binding.is_dirty());
    }

    #[test]
    fn test_float_round_trip_is_not_an_edit() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        // What a slider stepping in f64 hands back for the f32 defaults.
        binding.edit(ParamField::Size, 0.01);
        binding.edit(ParamField::Randomness, 0.2);
        assert!(!binding.is_dirty());
    }

    #[test]
    fn test_failed_commit_records_status() {
        let mut binding = ControlBinding::new(GalaxyParameters::default());
        binding.edit(ParamField::Count, 500.0);
        let result = binding.commit(|_| -> Result<(), String> { Err("no memory".into()) });
        assert!(matches!(result, Some(Err(_))));
        assert_eq!(binding.status(), Some("no memory"));

        binding.edit(ParamField::Count, 600.0);
        binding.commit(|_| -> Result<(), String> { Ok(()) });
        assert_eq!(binding.status(), None);
    }

    #[test]
    fn test_controls_cover_every_field() {
        let binding = ControlBinding::new(GalaxyParameters::default());
        let labels: Vec<_> = binding.controls().map(|(_, spec)| spec.label).collect();
        assert_eq!(labels.len(), 7);
        assert!(labels.contains(&"randomness power"));
    }
}
