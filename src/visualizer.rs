// src/visualizer.rs

//! Ties the pieces together: simulate a circuit once, format its state, and
//! redraw the diagram plus equation every frame.

use crate::circuits::Circuit;
use crate::core::{StateVector, VizError};
use crate::format::EquationFormatter;
use crate::render::{
    run_with_state, AppConfig, AppState, Compositor, GlyphRasterizer, Layout, Pixmap, Rasterizer,
    Scene, TextStyle,
};
use crate::simulation::Simulator;
use crate::validation::check_normalization;

/// Everything configurable about a visualizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    pub app: AppConfig,
    pub layout: Layout,
    pub text: TextStyle,
    /// Reject simulator output whose norm is not 1.
    pub check_norm: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            layout: Layout::default(),
            text: TextStyle::default(),
            check_norm: true,
        }
    }
}

/// A simulated circuit ready to be drawn.
///
/// The state and equation are computed once at construction; every frame
/// redraws the same scene.
pub struct QuantumVisualizer<R: Rasterizer = GlyphRasterizer> {
    state: StateVector,
    scene: Scene,
    compositor: Compositor,
    rasterizer: R,
}

impl QuantumVisualizer<GlyphRasterizer> {
    /// Simulates `circuit` and prepares the system-font rasterizer.
    ///
    /// # Errors
    /// Simulation failures, a non-normalized state when `config.check_norm`
    /// is set, or no usable font.
    pub fn new(circuit: Circuit, config: &VisualizerConfig) -> Result<Self, VizError> {
        let rasterizer = GlyphRasterizer::new(config.text.clone())?;
        Self::with_rasterizer(circuit, config.layout.clone(), rasterizer, config.check_norm)
    }
}

impl<R: Rasterizer> QuantumVisualizer<R> {
    /// Simulates `circuit` and draws text with `rasterizer`.
    pub fn with_rasterizer(
        circuit: Circuit,
        layout: Layout,
        rasterizer: R,
        check_norm: bool,
    ) -> Result<Self, VizError> {
        let state = Simulator::new().statevector(&circuit)?;
        if check_norm {
            check_normalization(&state, None)?;
        }
        let equation = EquationFormatter::new(circuit.num_qubits()).format_state_vector(&state)?;
        log::info!("circuit:\n{}", circuit);
        log::info!("state: {}", equation);

        Ok(Self {
            state,
            scene: Scene::new(circuit, equation),
            compositor: Compositor::new(layout),
            rasterizer,
        })
    }

    /// The simulated final state.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// The equation drawn above the circuit.
    pub fn equation(&self) -> &str {
        self.scene.equation()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Draws one frame.
    pub fn render_frame(&self, frame: &mut Pixmap) -> Result<(), VizError> {
        self.compositor.compose(&self.scene, &self.rasterizer, frame)
    }
}

impl<R: Rasterizer + 'static> AppState for QuantumVisualizer<R> {
    fn render(&mut self, frame: &mut Pixmap) -> Result<(), VizError> {
        self.render_frame(frame)
    }
}

/// Visualizes `circuit` in a window until it is closed.
pub fn run(circuit: Circuit, config: VisualizerConfig) -> anyhow::Result<()> {
    let visualizer = QuantumVisualizer::new(circuit, &config)?;
    run_with_state(config.app, visualizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::library::{bell_pair, cnot_demo};
    use crate::core::QubitId;
    use crate::operations::{Gate, Operation};
    use crate::render::Rgba;

    /// Draws a solid block for any non-empty text.
    struct Block;

    impl Rasterizer for Block {
        fn rasterize(&self, text: &str, width: u32, height: u32) -> Result<Pixmap, VizError> {
            let color = if text.is_empty() { Rgba::TRANSPARENT } else { Rgba::BLACK };
            Pixmap::filled(width, height, color)
        }
    }

    #[test]
    fn test_cnot_demo_equation() -> Result<(), VizError> {
        let viz = QuantumVisualizer::with_rasterizer(cnot_demo()?, Layout::default(), Block, true)?;
        assert_eq!(viz.equation(), "|ψ⟩ = |00⟩");
        assert_eq!(viz.state().amplitudes()[0].re, 1.0);
        Ok(())
    }

    #[test]
    fn test_equation_follows_qubit_count() -> Result<(), VizError> {
        let circuit = crate::circuits::CircuitBuilder::new(3)
            .add_op(Operation::Gate { target: QubitId(2), gate: Gate::X })
            .build()?;
        let viz = QuantumVisualizer::with_rasterizer(circuit, Layout::default(), Block, true)?;
        assert_eq!(viz.equation(), "|ψ⟩ = |100⟩");
        Ok(())
    }

    #[test]
    fn test_render_frame_draws_equation_box() -> Result<(), VizError> {
        let viz = QuantumVisualizer::with_rasterizer(bell_pair()?, Layout::default(), Block, true)?;
        let mut frame = Pixmap::new(800, 600)?;
        viz.render_frame(&mut frame)?;
        // Equation block spans x 100..700, y 0..100.
        assert_eq!(frame.get(100, 0), Some(Rgba::BLACK));
        assert_eq!(frame.get(699, 99), Some(Rgba::BLACK));
        assert_eq!(frame.get(99, 50), Some(Rgba::WHITE));
        assert_eq!(frame.get(400, 100), Some(Rgba::WHITE));
        Ok(())
    }

    #[test]
    fn test_render_is_repeatable() -> Result<(), VizError> {
        let mut viz = QuantumVisualizer::with_rasterizer(cnot_demo()?, Layout::default(), Block, true)?;
        let mut first = Pixmap::new(800, 600)?;
        let mut second = Pixmap::new(800, 600)?;
        viz.render(&mut first)?;
        viz.render(&mut second)?;
        assert_eq!(first, second);
        Ok(())
    }
}
