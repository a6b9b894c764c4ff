//! Egui control panel.
//!
//! One slider per galaxy parameter plus two color pickers. Slider drags
//! only edit the [`ControlBinding`]; the panel reports a commit when the
//! operator releases the pointer or changes a value without dragging
//! (keyboard, click on the track, typed value).

use crate::controls::ControlBinding;
use crate::params::{ParamField, ParamSpec};

/// Values shown in the panel footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub points: u32,
    pub generation: u64,
}

/// What the operator asked for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelOutput {
    /// An adjustment finished; regenerate if anything changed.
    pub commit: bool,
    /// Regenerate with a new random seed.
    pub reseed: bool,
}

/// Draw the control panel.
pub fn show(ctx: &egui::Context, binding: &mut ControlBinding, stats: &PanelStats) -> PanelOutput {
    let mut output = PanelOutput::default();

    egui::Window::new("Galaxy")
        .default_pos([12.0, 12.0])
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            let controls: Vec<_> = binding.controls().collect();
            for (field, spec) in controls {
                if parameter_slider(ui, binding, field, spec) {
                    output.commit = true;
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                let mut inside = binding.params().inside_color();
                if ui.color_edit_button_rgb(&mut inside).changed() {
                    binding.edit_inside_color(inside);
                }
                ui.label("inside color");
            });
            ui.horizontal(|ui| {
                let mut outside = binding.params().outside_color();
                if ui.color_edit_button_rgb(&mut outside).changed() {
                    binding.edit_outside_color(outside);
                }
                ui.label("outside color");
            });

            ui.separator();

            if ui.button("Regenerate").clicked() {
                output.reseed = true;
            }

            ui.label(format!(
                "{} points | galaxy #{} | {:.0} fps",
                stats.points, stats.generation, stats.fps
            ));

            if let Some(status) = binding.status() {
                ui.colored_label(egui::Color32::LIGHT_RED, status);
            }
        });

    // Color pickers drag inside their popup; finish them on release.
    if binding.is_dirty() && ctx.input(|i| i.pointer.any_released()) {
        output.commit = true;
    }

    output
}

/// One slider bound to `field`. Returns true when an adjustment finished.
///
/// Values only count as edits when the stored parameter moves. The slider
/// works on an `f64` copy of an `f32` field and re-snaps it to the step
/// every frame, which egui reports as a change even without input.
fn parameter_slider(
    ui: &mut egui::Ui,
    binding: &mut ControlBinding,
    field: ParamField,
    spec: ParamSpec,
) -> bool {
    let before = binding.params().get(field);
    let mut value = before;
    let slider = egui::Slider::new(&mut value, spec.min..=spec.max)
        .step_by(spec.step)
        .logarithmic(field == ParamField::Count)
        .text(spec.label);
    let response = ui.add(slider);

    let mut finished = response.drag_stopped();
    if response.changed() {
        let stored = binding.edit(field, value);
        // Keyboard and typed values have no release; they finish at once.
        if stored != before && !response.is_pointer_button_down_on() {
            finished = true;
        }
    }
    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GalaxyParameters;

    /// Drives the panel headlessly and commits the way the viewer does.
    struct Harness {
        ctx: egui::Context,
        binding: ControlBinding,
        frame: u32,
        regenerations: u32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                ctx: egui::Context::default(),
                binding: ControlBinding::new(GalaxyParameters::default()),
                frame: 0,
                regenerations: 0,
            }
        }

        fn input(&mut self, events: Vec<egui::Event>) -> egui::RawInput {
            self.frame += 1;
            egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    egui::Pos2::ZERO,
                    egui::vec2(1024.0, 768.0),
                )),
                time: Some(self.frame as f64 / 60.0),
                events,
                ..Default::default()
            }
        }

        fn commit(&mut self) {
            if let Some(Ok(())) = self.binding.commit(|_| Ok::<(), String>(())) {
                self.regenerations += 1;
            }
        }

        /// One frame of the full panel.
        fn panel_frame(&mut self, events: Vec<egui::Event>) -> PanelOutput {
            let input = self.input(events);
            let binding = &mut self.binding;
            let mut output = PanelOutput::default();
            let _ = self.ctx.run(input, |ctx| {
                output = show(ctx, binding, &PanelStats::default());
            });
            if output.commit {
                self.commit();
            }
            output
        }

        /// One frame with a single slider for `field`. Returns its rect.
        fn slider_frame(&mut self, field: ParamField, events: Vec<egui::Event>) -> egui::Rect {
            let input = self.input(events);
            let binding = &mut self.binding;
            let mut rect = egui::Rect::NOTHING;
            let mut finished = false;
            let _ = self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let response =
                        ui.scope(|ui| parameter_slider(ui, binding, field, field.spec()));
                    rect = response.response.rect;
                    finished |= response.inner;
                });
            });
            if finished {
                self.commit();
            }
            rect
        }
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_idle_panel_never_commits() {
        let mut harness = Harness::new();
        for _ in 0..10 {
            let output = harness.panel_frame(Vec::new());
            assert!(!output.commit);
        }
        assert!(!harness.binding.is_dirty());
        assert_eq!(harness.binding.params(), &GalaxyParameters::default());
    }

    #[test]
    fn test_step_snapping_is_not_an_edit() {
        let mut harness = Harness::new();
        for field in [ParamField::Size, ParamField::Randomness] {
            for _ in 0..5 {
                harness.slider_frame(field, Vec::new());
            }
        }
        assert!(!harness.binding.is_dirty());
        assert_eq!(harness.regenerations, 0);
    }

    #[test]
    fn test_drag_commits_once_on_release() {
        let mut harness = Harness::new();
        let field = ParamField::Spin;
        let rect = harness.slider_frame(field, Vec::new());

        let y = rect.center().y;
        let start = egui::pos2(rect.left() + 10.0, y);
        harness.slider_frame(field, vec![egui::Event::PointerMoved(start)]);
        harness.slider_frame(field, vec![button(start, true)]);

        let mut pos = start;
        for _ in 0..10 {
            pos.x += 6.0;
            harness.slider_frame(field, vec![egui::Event::PointerMoved(pos)]);
        }
        assert!(harness.binding.is_dirty());
        assert_eq!(harness.regenerations, 0);

        harness.slider_frame(field, vec![button(pos, false)]);
        assert_eq!(harness.regenerations, 1);
        assert!(!harness.binding.is_dirty());
        assert!(harness.binding.params().spin() > -5.0);

        // Hovering afterwards does not commit again.
        for _ in 0..3 {
            harness.slider_frame(field, vec![egui::Event::PointerMoved(pos)]);
        }
        assert_eq!(harness.regenerations, 1);
    }
}
