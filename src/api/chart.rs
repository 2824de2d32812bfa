use tracing::{debug, error, warn};

use crate::core::Viewport;
use crate::data::DataTable;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    ClickModifiers, SelectionBehavior, SelectionHandler, SelectionState, ToggleSelectionHandler,
};
use crate::model::{HostServices, ObjectInstance, Settings, build_model};
use crate::render::Renderer;

use super::{
    ChartStyle, EstimatedTextMeasurer, HitTarget, LayoutEngine, RenderContext, TextMeasurer,
    TooltipPayload,
};

/// One host update event.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptions {
    pub data: Option<DataTable>,
    pub viewport: Viewport,
}

impl UpdateOptions {
    #[must_use]
    pub fn new(data: DataTable, viewport: Viewport) -> Self {
        Self {
            data: Some(data),
            viewport,
        }
    }
}

/// Why an update left the surface empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    NoData,
    InsufficientData,
    ViewportTooSmall,
    UnexpectedFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Rendered,
    Cleared(ClearReason),
}

/// Update orchestration facade consumed by hosts.
///
/// Each update runs model build, layout and frame building to completion
/// before the renderer is touched. Any failure clears the surface and is
/// logged; nothing propagates to the host.
pub struct VarianceChart<
    R: Renderer,
    H: HostServices,
    M: TextMeasurer = EstimatedTextMeasurer,
    S: SelectionHandler = ToggleSelectionHandler,
> {
    renderer: R,
    host: H,
    measurer: M,
    style: ChartStyle,
    layout_engine: LayoutEngine,
    behavior: SelectionBehavior<S>,
    context: Option<RenderContext>,
}

impl<R: Renderer, H: HostServices> VarianceChart<R, H> {
    #[must_use]
    pub fn new(renderer: R, host: H) -> Self {
        Self::with_parts(
            renderer,
            host,
            EstimatedTextMeasurer,
            SelectionBehavior::default(),
        )
    }
}

impl<R: Renderer, H: HostServices, M: TextMeasurer, S: SelectionHandler> VarianceChart<R, H, M, S> {
    #[must_use]
    pub fn with_parts(renderer: R, host: H, measurer: M, behavior: SelectionBehavior<S>) -> Self {
        Self {
            renderer,
            host,
            measurer,
            style: ChartStyle::default(),
            layout_engine: LayoutEngine,
            behavior,
            context: None,
        }
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.style
    }

    /// Applies on the next update or selection change.
    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        self.style = style.validate()?;
        Ok(())
    }

    pub fn update(&mut self, options: &UpdateOptions) -> UpdateOutcome {
        self.context = None;

        let outcome = match self.prepare_context(options) {
            Ok(context) => {
                self.behavior.bind(context.model().selection_keys());
                let context = context.reselect(self.behavior.state());
                match self.paint(&context) {
                    Ok(()) => {
                        self.context = Some(context);
                        UpdateOutcome::Rendered
                    }
                    Err(err) => {
                        error!(error = %err, "painting variance chart failed");
                        UpdateOutcome::Cleared(ClearReason::UnexpectedFailure)
                    }
                }
            }
            Err(reason) => UpdateOutcome::Cleared(reason),
        };

        if matches!(outcome, UpdateOutcome::Cleared(_)) {
            self.clear_surface(options.viewport);
        }
        outcome
    }

    fn prepare_context(&self, options: &UpdateOptions) -> Result<RenderContext, ClearReason> {
        let Some(data) = options.data.as_ref() else {
            debug!("update without data; clearing");
            return Err(ClearReason::NoData);
        };
        let Some(model) = build_model(Some(data), &self.host) else {
            return Err(ClearReason::InsufficientData);
        };

        match self
            .layout_engine
            .layout(&model, options.viewport, &self.measurer)
        {
            Ok(layout) => Ok(RenderContext::new(model, layout, self.style)),
            Err(ChartError::ViewportTooSmall { width, height, .. }) => {
                debug!(width, height, "viewport below minimum size; clearing");
                Err(ClearReason::ViewportTooSmall)
            }
            Err(err) => {
                error!(error = %err, "variance chart layout failed");
                Err(ClearReason::UnexpectedFailure)
            }
        }
    }

    fn paint(&mut self, context: &RenderContext) -> ChartResult<()> {
        let opacities = self
            .behavior
            .render_selection(self.behavior.state().has_selection());
        let frame = context.build_frame(&opacities)?;
        self.renderer.render(&frame)
    }

    fn clear_surface(&mut self, viewport: Viewport) {
        if let Err(err) = self.renderer.clear(viewport) {
            warn!(error = %err, "renderer failed to clear surface");
        }
    }

    /// Routes a click to an element or the background catcher.
    ///
    /// Returns `false` when nothing is rendered.
    pub fn click(&mut self, x: f64, y: f64, modifiers: ClickModifiers) -> bool {
        let Some(target) = self.context.as_ref().map(|context| context.hit_test(x, y)) else {
            return false;
        };
        match target {
            HitTarget::Element { index, .. } => {
                self.behavior.element_click(index, modifiers);
            }
            HitTarget::Background => self.behavior.background_click(),
        }
        self.refresh_selection();
        true
    }

    /// External clear request from the host.
    pub fn clear_selection(&mut self) {
        self.behavior.background_click();
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        let Some(context) = self.context.take() else {
            return;
        };
        let viewport = context.viewport();
        let context = context.reselect(self.behavior.state());
        match self.paint(&context) {
            Ok(()) => self.context = Some(context),
            Err(err) => {
                error!(error = %err, "repainting selection failed");
                self.clear_surface(viewport);
            }
        }
    }

    #[must_use]
    pub fn hover(&self, x: f64, y: f64) -> Option<TooltipPayload> {
        self.context.as_ref()?.tooltip_at(x, y)
    }

    /// Opacity of every rendered element under the current selection.
    #[must_use]
    pub fn element_opacities(&self) -> Vec<f64> {
        if self.context.is_none() {
            return Vec::new();
        }
        self.behavior
            .render_selection(self.behavior.state().has_selection())
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.behavior.state()
    }

    #[must_use]
    pub fn context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }

    /// Settings object for the host property editor; defaults when nothing is rendered.
    pub fn enumerate_object_instances(
        &self,
        object_name: &str,
    ) -> ChartResult<Option<ObjectInstance>> {
        match &self.context {
            Some(context) => context
                .model()
                .settings
                .enumerate_object_instances(object_name),
            None => Settings::default().enumerate_object_instances(object_name),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
