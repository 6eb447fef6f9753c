use crate::defaults;
use crate::error::SceneGraphError;
use crate::legend::{Legend, LegendEntry};
use crate::marks::line::SceneLineMark;
use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::symbol::SceneSymbolMark;
use crate::opts::{BarAlign, BarOpts, LineOpts, ScatterOpts};
use crate::ticks::{format_tick, ticks};
use itertools::izip;
use plotcheck_common::color::Color;
use plotcheck_common::types::{BarOrientation, LineStyle, MarkerShape};
use plotcheck_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single plotting area: the marks drawn into it, in draw order, plus its
/// decorations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Axes {
    pub marks: Vec<SceneMark>,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub xlim: Option<[f64; 2]>,
    pub ylim: Option<[f64; 2]>,
    pub xticks: Option<Vec<f64>>,
    pub yticks: Option<Vec<f64>>,
    pub xticklabels: Option<Vec<String>>,
    pub yticklabels: Option<Vec<String>>,
    pub legend: Option<Legend>,
    /// Position in [`defaults::COLOR_CYCLE`] of the next unstyled line
    color_cycle_index: usize,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one line through `(x, y)`. Returns the index of the new mark.
    pub fn plot(&mut self, x: &[f64], y: &[f64], opts: LineOpts) -> Result<usize, SceneGraphError> {
        check_xy(x, y)?;
        let color = match opts.color {
            Some(color) => color,
            None => self.next_cycle_color(),
        };
        color.rgba()?;
        for color in opts.marker_face_color.iter().chain(opts.marker_edge_color.iter()) {
            color.rgba()?;
        }

        let mark = SceneLineMark {
            label: opts.label,
            x: x.to_vec(),
            y: y.to_vec(),
            color,
            stroke_width: opts.line_width.unwrap_or(defaults::LINE_WIDTH),
            line_style: opts.line_style.unwrap_or(LineStyle::Solid),
            marker: opts.marker.unwrap_or(MarkerShape::None),
            marker_size: opts.marker_size.unwrap_or(defaults::MARKER_SIZE),
            marker_face_color: opts.marker_face_color,
            marker_edge_color: opts.marker_edge_color,
            marker_edge_width: opts.marker_edge_width.unwrap_or(defaults::MARKER_EDGE_WIDTH),
            alpha: opts.alpha,
        };
        debug!(
            index = self.marks.len(),
            points = mark.len(),
            line_style = mark.line_style.as_ref(),
            marker = mark.marker.as_ref(),
            "plot line"
        );
        Ok(self.push(mark))
    }

    /// Draws `y` against its indices `0..y.len()`
    pub fn plot_y(&mut self, y: &[f64], opts: LineOpts) -> Result<usize, SceneGraphError> {
        let x = (0..y.len()).map(|i| i as f64).collect::<Vec<_>>();
        self.plot(&x, y, opts)
    }

    /// Draws one line per entry of `columns`, all sharing `x`. Lines without an
    /// explicit color take successive cycle colors.
    pub fn plot_columns(
        &mut self,
        x: &[f64],
        columns: &[Vec<f64>],
        opts: LineOpts,
    ) -> Result<Vec<usize>, SceneGraphError> {
        columns
            .iter()
            .map(|y| self.plot(x, y, opts.clone()))
            .collect()
    }

    /// Draws a batch of unconnected markers. Per-point attributes are stored as
    /// given, even when their length differs from the number of points.
    pub fn scatter(
        &mut self,
        x: &[f64],
        y: &[f64],
        opts: ScatterOpts,
    ) -> Result<usize, SceneGraphError> {
        check_xy(x, y)?;
        let fill = resolve_colors(opts.color.as_ref(), defaults::SCATTER_COLOR)?;
        let stroke = resolve_colors(opts.edge_color.as_ref(), defaults::SCATTER_EDGE_COLOR)?;
        let mark = SceneSymbolMark {
            label: opts.label,
            x: x.to_vec(),
            y: y.to_vec(),
            fill,
            stroke,
            stroke_width: opts
                .line_width
                .unwrap_or(ScalarOrArray::new_scalar(defaults::SCATTER_LINE_WIDTH)),
            size: opts
                .size
                .unwrap_or(ScalarOrArray::new_scalar(defaults::SCATTER_SIZE)),
            alpha: opts.alpha,
        };
        debug!(index = self.marks.len(), points = mark.len(), "scatter");
        Ok(self.push(mark))
    }

    /// Draws vertical bars centered (or starting, with [`BarAlign::Edge`]) at
    /// `x`. Returns the mark index of each bar, in the order given.
    pub fn bar(
        &mut self,
        x: &[f64],
        heights: &[f64],
        opts: BarOpts,
    ) -> Result<Vec<usize>, SceneGraphError> {
        self.add_bars(x, heights, opts, BarOrientation::Vertical)
    }

    /// Draws horizontal bars at `y` extending along x by `widths`. The bar
    /// thickness comes from [`BarOpts::width`] and the left edge from
    /// [`BarOpts::bottom`].
    pub fn barh(
        &mut self,
        y: &[f64],
        widths: &[f64],
        opts: BarOpts,
    ) -> Result<Vec<usize>, SceneGraphError> {
        self.add_bars(y, widths, opts, BarOrientation::Horizontal)
    }

    fn add_bars(
        &mut self,
        positions: &[f64],
        lengths: &[f64],
        opts: BarOpts,
        orientation: BarOrientation,
    ) -> Result<Vec<usize>, SceneGraphError> {
        check_xy(positions, lengths)?;
        let n = positions.len();
        let thickness = broadcast("width", opts.width.as_ref(), defaults::BAR_WIDTH, n)?;
        let bases = broadcast("bottom", opts.bottom.as_ref(), 0.0, n)?;

        // colors and line widths cycle when fewer than the bars are given
        let fills = cycled(
            resolve_colors(opts.color.as_ref(), defaults::BAR_COLOR)?.values(),
            n,
        );
        let strokes = cycled(
            resolve_colors(opts.edge_color.as_ref(), defaults::BAR_EDGE_COLOR)?.values(),
            n,
        );
        let stroke_widths = cycled(
            opts.line_width
                .unwrap_or(ScalarOrArray::new_scalar(defaults::BAR_LINE_WIDTH))
                .values(),
            n,
        );

        let mut indices = Vec::with_capacity(n);
        for (i, (position, length, thickness, base)) in
            izip!(positions, lengths, &thickness, &bases).enumerate()
        {
            let start = match opts.align {
                BarAlign::Center => position - thickness / 2.0,
                BarAlign::Edge => *position,
            };
            let (x, y, width, height) = match orientation {
                BarOrientation::Vertical => (start, *base, *thickness, *length),
                BarOrientation::Horizontal => (*base, start, *length, *thickness),
            };
            let mark = SceneRectMark {
                // only the first bar carries the label, so a legend shows one entry
                label: if i == 0 { opts.label.clone() } else { None },
                x,
                y,
                width,
                height,
                orientation,
                fill: fills.get(i).copied().unwrap_or([0.0, 0.0, 1.0, 1.0]),
                stroke: strokes.get(i).copied().unwrap_or([0.0, 0.0, 0.0, 1.0]),
                stroke_width: stroke_widths
                    .get(i)
                    .copied()
                    .unwrap_or(defaults::BAR_LINE_WIDTH),
                alpha: opts.alpha,
                };
            indices.push(self.push(mark));
        }
        debug!(bars = n, orientation = ?orientation, "bar");
        Ok(indices)
    }

    fn push(&mut self, mark: impl Into<SceneMark>) -> usize {
        self.marks.push(mark.into());
        self.marks.len() - 1
    }

    fn next_cycle_color(&mut self) -> Color {
        let name = defaults::COLOR_CYCLE[self.color_cycle_index % defaults::COLOR_CYCLE.len()];
        self.color_cycle_index += 1;
        Color::parse(name)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = label.into();
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = label.into();
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.xlim = Some([min, max]);
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.ylim = Some([min, max]);
    }

    pub fn set_xticks(&mut self, ticks: Vec<f64>) {
        self.xticks = Some(ticks);
    }

    pub fn set_yticks(&mut self, ticks: Vec<f64>) {
        self.yticks = Some(ticks);
    }

    pub fn set_xticklabels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.xticklabels = Some(labels.into_iter().map(Into::into).collect());
    }

    pub fn set_yticklabels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.yticklabels = Some(labels.into_iter().map(Into::into).collect());
    }

    /// Adds a legend with one entry per labelled mark. Labels starting with
    /// `_` are hidden from the legend.
    pub fn add_legend(&mut self) -> Result<&Legend, SceneGraphError> {
        let entries = self
            .marks
            .iter()
            .enumerate()
            .filter_map(|(mark, m)| {
                m.label()
                    .filter(|label| !label.starts_with('_'))
                    .map(|label| LegendEntry {
                        mark,
                        label: label.to_string(),
                    })
            })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return Err(SceneGraphError::InvalidLegend(
                "no labelled marks to put in the legend".to_string(),
            ));
        }
        Ok(self.legend.insert(Legend { entries }))
    }

    /// Adds a legend labelling lines first, then bars, then scatter batches,
    /// each group in draw order. Extra labels are ignored.
    pub fn add_legend_with_labels<S: Into<String>>(
        &mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<&Legend, SceneGraphError> {
        let handles = self
            .lines()
            .map(|(i, _)| i)
            .chain(self.rects().map(|(i, _)| i))
            .chain(self.symbols().map(|(i, _)| i))
            .collect::<Vec<_>>();
        let entries = handles
            .into_iter()
            .zip(labels)
            .map(|(mark, label)| LegendEntry {
                mark,
                label: label.into(),
            })
            .collect::<Vec<_>>();
        Ok(self.legend.insert(Legend { entries }))
    }

    /// Adds a legend pairing explicit mark indices with labels
    pub fn add_legend_with_handles<S: Into<String>>(
        &mut self,
        handles: &[usize],
        labels: impl IntoIterator<Item = S>,
    ) -> Result<&Legend, SceneGraphError> {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();
        if labels.len() != handles.len() {
            return Err(SceneGraphError::InvalidLegend(format!(
                "{} handles but {} labels",
                handles.len(),
                labels.len()
            )));
        }
        if let Some(missing) = handles.iter().find(|h| **h >= self.marks.len()) {
            return Err(SceneGraphError::InvalidLegend(format!(
                "no mark at index {missing}"
            )));
        }
        let entries = izip!(handles, labels)
            .map(|(mark, label)| LegendEntry { mark: *mark, label })
            .collect();
        Ok(self.legend.insert(Legend { entries }))
    }

    pub fn marks(&self) -> &[SceneMark] {
        &self.marks
    }

    /// Line marks with their mark index, in draw order
    pub fn lines(&self) -> impl Iterator<Item = (usize, &SceneLineMark)> + '_ {
        self.marks.iter().enumerate().filter_map(|(i, m)| match m {
            SceneMark::Line(mark) => Some((i, mark)),
            _ => None,
        })
    }

    pub fn symbols(&self) -> impl Iterator<Item = (usize, &SceneSymbolMark)> + '_ {
        self.marks.iter().enumerate().filter_map(|(i, m)| match m {
            SceneMark::Symbol(mark) => Some((i, mark)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (usize, &SceneRectMark)> + '_ {
        self.marks.iter().enumerate().filter_map(|(i, m)| match m {
            SceneMark::Rect(mark) => Some((i, mark)),
            _ => None,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn xlabel(&self) -> &str {
        &self.xlabel
    }

    pub fn ylabel(&self) -> &str {
        &self.ylabel
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Extent of all marks as `[x_min, x_max, y_min, y_max]`
    pub fn data_bounds(&self) -> Option<[f64; 4]> {
        self.marks
            .iter()
            .filter_map(SceneMark::bounds)
            .reduce(|[a0, a1, a2, a3], [b0, b1, b2, b3]| {
                [a0.min(b0), a1.max(b1), a2.min(b2), a3.max(b3)]
            })
    }

    /// View limits along x: the explicit limits if set, else the data range
    /// padded by [`defaults::MARGIN`]
    pub fn xlim(&self) -> [f64; 2] {
        self.xlim.unwrap_or_else(|| {
            self.data_bounds()
                .map(|[x0, x1, _, _]| autoscale(x0, x1))
                .unwrap_or([0.0, 1.0])
        })
    }

    pub fn ylim(&self) -> [f64; 2] {
        self.ylim.unwrap_or_else(|| {
            self.data_bounds()
                .map(|[_, _, y0, y1]| autoscale(y0, y1))
                .unwrap_or([0.0, 1.0])
        })
    }

    /// Tick positions along x, generated over the view limits when not set
    pub fn xticks(&self) -> Vec<f64> {
        match &self.xticks {
            Some(ticks) => ticks.clone(),
            None => {
                let [min, max] = self.xlim();
                ticks(min, max, defaults::TICK_COUNT)
            }
        }
    }

    pub fn yticks(&self) -> Vec<f64> {
        match &self.yticks {
            Some(ticks) => ticks.clone(),
            None => {
                let [min, max] = self.ylim();
                ticks(min, max, defaults::TICK_COUNT)
            }
        }
    }

    /// Tick label text along x. Ticks without explicit labels show their value.
    pub fn xticklabels(&self) -> Vec<String> {
        match &self.xticklabels {
            Some(labels) => labels.clone(),
            None => self.xticks().into_iter().map(format_tick).collect(),
        }
    }

    pub fn yticklabels(&self) -> Vec<String> {
        match &self.yticklabels {
            Some(labels) => labels.clone(),
            None => self.yticks().into_iter().map(format_tick).collect(),
        }
    }
}

fn check_xy(x: &[f64], y: &[f64]) -> Result<(), SceneGraphError> {
    if x.len() != y.len() {
        return Err(SceneGraphError::DataLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(())
}

fn resolve_colors(
    colors: Option<&ScalarOrArray<Color>>,
    default: &str,
) -> Result<ScalarOrArray<[f64; 4]>, SceneGraphError> {
    let resolved = match colors {
        Some(colors) if !colors.values().is_empty() => colors.try_map(Color::rgba)?,
        _ => ScalarOrArray::new_scalar(Color::parse(default).rgba()?),
    };
    Ok(resolved)
}

fn broadcast(
    attribute: &str,
    values: Option<&ScalarOrArray<f64>>,
    default: f64,
    len: usize,
) -> Result<Vec<f64>, SceneGraphError> {
    let Some(values) = values else {
        return Ok(vec![default; len]);
    };
    values
        .broadcast(len)
        .ok_or_else(|| SceneGraphError::AttributeLengthMismatch {
            attribute: attribute.to_string(),
            len: values.values().len(),
            expected: len,
        })
}

fn cycled<T: Copy>(values: &[T], len: usize) -> Vec<T> {
    values.iter().copied().cycle().take(len).collect()
}

/// Pads `[min, max]` by the default margin, widening a degenerate range first
fn autoscale(min: f64, max: f64) -> [f64; 2] {
    let (min, max) = if min == max {
        if min == 0.0 {
            (-defaults::MARGIN, defaults::MARGIN)
        } else {
            (min - defaults::MARGIN * min.abs(), max + defaults::MARGIN * max.abs())
        }
    } else {
        (min, max)
    };
    let pad = (max - min) * defaults::MARGIN;
    [min - pad, max + pad]
}
