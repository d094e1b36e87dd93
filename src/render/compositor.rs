//! One frame of the visualizer: circuit diagram plus state equation.
//!
//! [`Compositor::compose`] is window-agnostic. It draws a [`Scene`] into a
//! caller-owned [`Pixmap`], asking a [`Rasterizer`] for every piece of text.

use super::pixmap::{Pixmap, Rgba};
use super::text::Rasterizer;
use crate::circuits::Circuit;
use crate::core::{QubitId, VizError};
use crate::operations::{Gate, Operation};

/// Geometry and colours of the frame, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub background: Rgba,
    pub wire_color: Rgba,
    pub gate_color: Rgba,
    /// y of qubit 0's wire.
    pub first_wire_y: f32,
    /// Vertical distance between consecutive wires.
    pub qubit_spacing: f32,
    pub wire_start_x: f32,
    pub wire_end_x: f32,
    /// x of the first operation column.
    pub first_gate_x: f32,
    /// Horizontal distance between operation columns.
    pub gate_spacing: f32,
    /// Side of a gate box and diameter of a CNOT target.
    pub gate_size: f32,
    pub line_width: f32,
    /// Centre of the equation image.
    pub equation_center: (f32, f32),
    /// Size of the equation image.
    pub equation_size: (u32, u32),
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            wire_color: Rgba::BLACK,
            gate_color: Rgba::BLUE,
            first_wire_y: 200.0,
            qubit_spacing: 80.0,
            wire_start_x: 100.0,
            wire_end_x: 700.0,
            first_gate_x: 400.0,
            gate_spacing: 100.0,
            gate_size: 40.0,
            line_width: 2.0,
            equation_center: (400.0, 50.0),
            equation_size: (600, 100),
        }
    }
}

/// What a frame shows. Immutable once built.
#[derive(Debug, Clone)]
pub struct Scene {
    circuit: Circuit,
    equation: String,
}

impl Scene {
    pub fn new(circuit: Circuit, equation: String) -> Self {
        Self { circuit, equation }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }
}

const CONTROL_RADIUS: f32 = 8.0;

/// Draws scenes with a fixed [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    layout: Layout,
}

impl Compositor {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// y of `qubit`'s wire. Qubit 0 is on top.
    pub fn wire_y(&self, qubit: QubitId) -> f32 {
        self.layout.first_wire_y + qubit.0 as f32 * self.layout.qubit_spacing
    }

    /// x of operation column `column`.
    pub fn gate_x(&self, column: usize) -> f32 {
        self.layout.first_gate_x + column as f32 * self.layout.gate_spacing
    }

    /// Renders `scene` into `frame`, overwriting every pixel.
    ///
    /// # Errors
    /// Whatever `rasterizer` returns for the equation or a gate label.
    pub fn compose(
        &self,
        scene: &Scene,
        rasterizer: &dyn Rasterizer,
        frame: &mut Pixmap,
    ) -> Result<(), VizError> {
        let l = &self.layout;
        frame.fill(l.background);

        for q in 0..scene.circuit().num_qubits() {
            let y = self.wire_y(QubitId(q));
            frame.draw_line(l.wire_start_x, y, l.wire_end_x, y, l.line_width, l.wire_color);
        }

        for (column, op) in scene.circuit().operations().iter().enumerate() {
            let x = self.gate_x(column);
            match op {
                Operation::Gate { target, gate } => {
                    if *gate != Gate::Identity {
                        self.draw_box(frame, rasterizer, x, self.wire_y(*target), gate.symbol())?;
                    }
                }
                Operation::Controlled { control, target, gate } => {
                    let (cy, ty) = (self.wire_y(*control), self.wire_y(*target));
                    frame.draw_line(x, cy, x, ty, l.line_width, l.gate_color);
                    frame.fill_circle(x, cy, CONTROL_RADIUS, l.gate_color);
                    if *gate == Gate::X {
                        self.draw_target(frame, x, ty);
                    } else {
                        self.draw_box(frame, rasterizer, x, ty, gate.symbol())?;
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        self.draw_box(frame, rasterizer, x, self.wire_y(*target), "M")?;
                    }
                }
            }
        }

        let (w, h) = l.equation_size;
        let image = rasterizer.rasterize(scene.equation(), w, h)?;
        let left = (l.equation_center.0 - w as f32 / 2.0).round() as i32;
        let top = (l.equation_center.1 - h as f32 / 2.0).round() as i32;
        frame.blit(&image, left, top);
        Ok(())
    }

    /// The CNOT target: a circle with a cross through it.
    fn draw_target(&self, frame: &mut Pixmap, x: f32, y: f32) {
        let l = &self.layout;
        let r = l.gate_size / 2.0;
        frame.stroke_circle(x, y, r, l.line_width, l.gate_color);
        frame.draw_line(x - r, y, x + r, y, l.line_width, l.gate_color);
        frame.draw_line(x, y - r, x, y + r, l.line_width, l.gate_color);
    }

    /// A framed gate box on a white ground with `label` centred inside.
    fn draw_box(
        &self,
        frame: &mut Pixmap,
        rasterizer: &dyn Rasterizer,
        x: f32,
        y: f32,
        label: &str,
    ) -> Result<(), VizError> {
        let l = &self.layout;
        let s = l.gate_size;
        let (left, top) = (x - s / 2.0, y - s / 2.0);
        frame.fill_rect(left, top, s, s, l.background);
        frame.stroke_rect(left, top, s, s, l.line_width, l.gate_color);
        let side = s.round().max(1.0) as u32;
        let image = rasterizer.rasterize(label, side, side)?;
        frame.blit(&image, left.round() as i32, top.round() as i32);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::library::cnot_demo;

    /// Paints nothing; the frame keeps only the diagram.
    struct Blank;

    impl Rasterizer for Blank {
        fn rasterize(&self, _text: &str, width: u32, height: u32) -> Result<Pixmap, VizError> {
            Pixmap::new(width, height)
        }
    }

    #[test]
    fn test_default_geometry() {
        let c = Compositor::default();
        assert_eq!(c.wire_y(QubitId(0)), 200.0);
        assert_eq!(c.wire_y(QubitId(1)), 280.0);
        assert_eq!(c.gate_x(0), 400.0);
        assert_eq!(c.gate_x(2), 600.0);
    }

    #[test]
    fn test_cnot_frame() -> Result<(), VizError> {
        let scene = Scene::new(cnot_demo()?, "|ψ⟩ = |00⟩".to_string());
        let mut frame = Pixmap::new(800, 600)?;
        Compositor::default().compose(&scene, &Blank, &mut frame)?;

        // Wires.
        assert_eq!(frame.get(150, 200), Some(Rgba::BLACK));
        assert_eq!(frame.get(150, 280), Some(Rgba::BLACK));
        // Control dot on q0, target ring on q1 (left edge of the circle).
        assert_eq!(frame.get(400, 200), Some(Rgba::BLUE));
        let ring = frame.get(380, 280).unwrap_or(Rgba::WHITE);
        assert!(ring.b > 240 && ring.r < 16, "ring pixel {:?}", ring);
        // Connector between the wires.
        assert_eq!(frame.get(400, 240), Some(Rgba::BLUE));
        // Background elsewhere.
        assert_eq!(frame.get(10, 10), Some(Rgba::WHITE));
        assert_eq!(frame.get(400, 500), Some(Rgba::WHITE));
        Ok(())
    }

    #[test]
    fn test_rasterizer_errors_propagate() -> Result<(), VizError> {
        struct Failing;
        impl Rasterizer for Failing {
            fn rasterize(&self, _: &str, _: u32, _: u32) -> Result<Pixmap, VizError> {
                Err(VizError::Display { message: "no font".to_string() })
            }
        }
        let scene = Scene::new(cnot_demo()?, String::new());
        let mut frame = Pixmap::new(800, 600)?;
        let err = Compositor::default().compose(&scene, &Failing, &mut frame);
        assert!(matches!(err, Err(VizError::Display { .. })));
        Ok(())
    }
}
