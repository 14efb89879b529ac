//! Drawing surfaces and the per-build context that owns them.
//!
//! A [`BuildContext`] replaces document-wide state: it hands out element ids
//! from its own counter and keeps the surfaces of one report until they are
//! released. Independent contexts never see each other.
use std::fmt;

use maud::{html, Markup, PreEscaped};

use crate::charts::table::TableView;
use crate::error::{ReportError, Result};
use crate::plot::PlotSpec;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Chart,
    Table,
}

impl SurfaceKind {
    fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Chart => "chart",
            SurfaceKind::Table => "table",
        }
    }
}

/// Resolved size of a surface, known when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Drawing {
    Plot(PlotSpec),
    Table(TableView),
}

#[derive(Debug, Clone)]
pub struct Surface {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    pub layout: Layout,
    pub drawing: Option<Drawing>,
}

#[derive(Debug, Default)]
pub struct BuildContext {
    next_id: u64,
    surfaces: Vec<Surface>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unique element id, e.g. `chart-3`. The counter only ever grows.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    pub fn create_surface(&mut self, kind: SurfaceKind, layout: Layout) -> SurfaceId {
        let id = SurfaceId(self.next_id(kind.as_str()));
        log::debug!("[ReportKit::Surface] created {} ({}x{})", id, layout.width, layout.height);
        self.surfaces.push(Surface {
            id: id.clone(),
            kind,
            layout,
            drawing: None,
        });
        id
    }

    pub fn surface(&self, id: &SurfaceId) -> Result<&Surface> {
        self.surfaces
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ReportError::UnknownSurface(id.to_string()))
    }

    pub fn layout(&self, id: &SurfaceId) -> Result<Layout> {
        self.surface(id).map(|s| s.layout)
    }

    /// Replace whatever the surface currently shows.
    pub fn draw(&mut self, id: &SurfaceId, drawing: Drawing) -> Result<()> {
        let surface = self
            .surfaces
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| ReportError::UnknownSurface(id.to_string()))?;
        surface.drawing = Some(drawing);
        Ok(())
    }

    /// Drop a surface once its markup has been emitted. Ids are never reused.
    pub fn release(&mut self, id: &SurfaceId) -> Option<Surface> {
        let index = self.surfaces.iter().position(|s| &s.id == id)?;
        Some(self.surfaces.remove(index))
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn render_surface(&self, id: &SurfaceId) -> Result<Markup> {
        let surface = self.surface(id)?;
        Ok(html! {
            div class={ "surface " (surface.kind.as_str()) "-surface" } id=(surface.id.as_str())
                data-surface-kind=(surface.kind.as_str()) {
                @match &surface.drawing {
                    Some(Drawing::Plot(spec)) => {
                        div class="plot-target"
                            style=(format!("height:{}px", surface.layout.height)) {
                            span class="plot-placeholder" { "Loading chart" }
                        }
                        script type="application/json" class="plot-spec" {
                            (PreEscaped(spec.to_embedded_json()))
                        }
                    }
                    Some(Drawing::Table(view)) => { (view.to_html()) }
                    None => {}
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotly::{Bar, Plot};

    fn layout() -> Layout {
        Layout { width: 100.0, height: 50.0 }
    }

    #[test]
    fn ids_are_monotonic_per_context() {
        let mut a = BuildContext::new();
        let mut b = BuildContext::new();
        assert_eq!(a.create_surface(SurfaceKind::Chart, layout()).as_str(), "chart-1");
        assert_eq!(a.create_surface(SurfaceKind::Table, layout()).as_str(), "table-2");
        assert_eq!(b.create_surface(SurfaceKind::Chart, layout()).as_str(), "chart-1");
        assert_eq!(a.next_id("section"), "section-3");
    }

    fn bar_spec(name: &str) -> Drawing {
        let mut plot = Plot::new();
        plot.add_trace(Bar::new(vec!["A".to_string()], vec![1.0]).name(name));
        Drawing::Plot(PlotSpec::from_plot(&plot).unwrap())
    }

    #[test]
    fn drawing_replaces_previous_contents() {
        let mut ctx = BuildContext::new();
        let id = ctx.create_surface(SurfaceKind::Chart, layout());
        ctx.draw(&id, bar_spec("first")).unwrap();
        ctx.draw(&id, bar_spec("second")).unwrap();
        let html = ctx.render_surface(&id).unwrap().into_string();
        assert!(html.contains("second"));
        assert!(!html.contains("first"));
        assert_eq!(html.matches("class=\"plot-spec\"").count(), 1);
        assert!(html.contains("style=\"height:50px\""));
    }

    #[test]
    fn released_surfaces_free_their_drawing() {
        let mut ctx = BuildContext::new();
        let id = ctx.create_surface(SurfaceKind::Chart, layout());
        ctx.draw(&id, bar_spec("only")).unwrap();
        let released = ctx.release(&id).unwrap();
        assert!(released.drawing.is_some());
        assert!(ctx.is_empty());
        assert!(ctx.release(&id).is_none());
        assert!(matches!(ctx.render_surface(&id), Err(ReportError::UnknownSurface(_))));
        assert_eq!(ctx.create_surface(SurfaceKind::Chart, layout()).as_str(), "chart-2");
    }

    #[test]
    fn unknown_surface_is_an_error() {
        let mut other = BuildContext::new();
        let id = other.create_surface(SurfaceKind::Chart, layout());
        let ctx = BuildContext::new();
        assert!(matches!(ctx.layout(&id), Err(ReportError::UnknownSurface(_))));
    }
}
