//! Renderer of the linkage and its traced paths.
//!
//! ```
//! use four_bar::{plot::*, FourBarLinkage};
//!
//! let fb = FourBarLinkage::new(1., 1., 1., 1.).unwrap();
//! let mut buf = String::new();
//! let svg = SVGBackend::with_string(&mut buf, (600, 600));
//! Renderer::new().render(svg, &fb.joints().unwrap()).unwrap();
//! assert!(buf.contains("<svg"));
//! ```
use crate::Coord;
#[doc(no_inline)]
pub use plotters::{prelude::*, *};

/// Get font setting.
pub fn font() -> TextStyle<'static> {
    ("Times New Roman", 24).into_font().color(&BLACK)
}

/// Fixed plotting area.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    /// X range
    pub x: [f64; 2],
    /// Y range
    pub y: [f64; 2],
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: [-1., 2.], y: [-1.5, 1.5] }
    }
}

impl Viewport {
    /// Square viewport around the bounding box of the curves.
    pub fn fit<L>(curves: &[(L, &[Coord])]) -> Self {
        let [x_min, x_max, y_min, y_max] = bounding_box(curves);
        Self { x: [x_min, x_max], y: [y_min, y_max] }
    }
}

/// Drawing option of a linkage frame.
///
/// The renderer keeps no state between frames, every call redraws the whole
/// backend.
#[derive(Clone, Debug)]
pub struct Renderer {
    /// Plotting area
    pub viewport: Viewport,
    /// Title of the chart, empty to skip
    pub title: String,
    /// Stroke width of the links
    pub stroke: u32,
    /// Radius of the joints
    pub dot: u32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create with the default viewport.
    pub fn new() -> Self {
        Self { viewport: Viewport::default(), title: String::new(), stroke: 3, dot: 5 }
    }

    /// Build with the viewport.
    pub fn viewport(self, viewport: Viewport) -> Self {
        Self { viewport, ..self }
    }

    /// Build with the title.
    pub fn title(self, title: impl Into<String>) -> Self {
        Self { title: title.into(), ..self }
    }

    /// Draw the links `p1-p2`, `p2-p3` and `p3-p4` of one frame.
    pub fn render<B>(&self, backend: B, joints: &[Coord; 4]) -> anyhow::Result<()>
    where
        B: DrawingBackend,
        B::ErrorType: 'static,
    {
        let root = backend.into_drawing_area();
        root.fill(&WHITE)?;
        let Viewport { x: [x_min, x_max], y: [y_min, y_max] } = self.viewport;
        let mut chart = ChartBuilder::on(&root);
        if !self.title.is_empty() {
            chart.caption(&self.title, font());
        }
        let mut chart = chart
            .set_label_area_size(LabelAreaPosition::Left, (8).percent())
            .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
            .margin((4).percent())
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_label_style(font())
            .y_label_style(font())
            .draw()?;
        for (i, link) in joints.windows(2).enumerate() {
            let color = Palette99::pick(i).stroke_width(self.stroke);
            let link = link.iter().map(|&[x, y]| (x, y));
            chart.draw_series(LineSeries::new(link, color))?;
        }
        let dot = self.dot as i32;
        // Ground pivots
        let [p1, .., p4] = *joints;
        chart.draw_series([p1, p4].into_iter().map(|[x, y]| {
            TriangleMarker::new((x, y), dot + 3, BLACK.filled())
        }))?;
        let joints = joints.iter().map(|&[x, y]| Circle::new((x, y), dot, BLACK.filled()));
        chart.draw_series(joints)?;
        root.present()?;
        Ok(())
    }

    /// Draw the traced paths of the driver tip and the follower tip.
    ///
    /// Frames are `(theta, joints)` pairs, infeasible frames split both
    /// paths. The viewport is fitted to the data.
    pub fn render_paths<B>(
        &self,
        backend: B,
        frames: &[(f64, Option<[Coord; 4]>)],
    ) -> anyhow::Result<()>
    where
        B: DrawingBackend,
        B::ErrorType: 'static,
    {
        let p2 = frames.iter().flat_map(|(_, js)| js.map(|[_, p2, ..]| p2)).collect::<Vec<_>>();
        let p3 = frames.iter().flat_map(|(_, js)| js.map(|[.., p3, _]| p3)).collect::<Vec<_>>();
        let viewport = Viewport::fit(&[("p2", &p2[..]), ("p3", &p3[..])]);
        let Viewport { x: [x_min, x_max], y: [y_min, y_max] } = viewport;
        let root = backend.into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root);
        if !self.title.is_empty() {
            chart.caption(&self.title, font());
        }
        let mut chart = chart
            .set_label_area_size(LabelAreaPosition::Left, (8).percent())
            .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
            .margin((8).percent())
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_label_style(font())
            .y_label_style(font())
            .draw()?;
        // Each feasible run is drawn separately
        let runs = frames.split(|(_, js)| js.is_none()).filter(|run| !run.is_empty());
        let runs = runs.collect::<Vec<_>>();
        for (joint, label) in [(1, "Driver tip"), (2, "Follower tip")] {
            let color = Palette99::pick(joint - 1).stroke_width(self.stroke);
            for (i, run) in runs.iter().enumerate() {
                let run = run.iter().filter_map(|(_, js)| *js);
                let run = run.map(|js| (js[joint][0], js[joint][1]));
                let anno = chart.draw_series(LineSeries::new(run, color))?;
                if i == 0 {
                    anno.label(label)
                        .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color));
                }
            }
        }
        chart
            .configure_series_labels()
            .background_style(&WHITE)
            .border_style(&BLACK)
            .label_font(font())
            .draw()?;
        root.present()?;
        Ok(())
    }
}

/// Get the bounding box of the data, ignore the labels.
///
/// The box is a square, or a unit square around the origin without data.
pub fn bounding_box<L>(curves: &[(L, &[Coord])]) -> [f64; 4] {
    let [mut x_min, mut x_max] = [f64::INFINITY, -f64::INFINITY];
    let [mut y_min, mut y_max] = [f64::INFINITY, -f64::INFINITY];
    for &[x, y] in curves.iter().flat_map(|(_, curve)| curve.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min > x_max {
        return [-1., 1., -1., 1.];
    }
    let dx = x_max - x_min;
    let dy = y_max - y_min;
    // Margin of 5% and never a zero-sized range
    let r = (dx.max(dy) * 0.55).max(f64::EPSILON.sqrt());
    let cx = (x_min + x_max) * 0.5;
    let cy = (y_min + y_max) * 0.5;
    [cx - r, cx + r, cy - r, cy + r]
}
