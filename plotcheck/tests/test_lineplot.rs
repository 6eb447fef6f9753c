use plotcheck::{InvalidPlotError, LineAttribute, LinePlotChecker, PlotCheckError, Tolerance};
use plotcheck_common::color::Color;
use plotcheck_common::types::{LineStyle, MarkerShape};
use plotcheck_scenegraph::axes::Axes;
use plotcheck_scenegraph::opts::LineOpts;
use rstest::{fixture, rstest};

const X0: [f64; 4] = [1.0, 2.17, 3.3, 4.0];
const Y0: [f64; 4] = [2.5, 3.25, 4.4, 5.0];
const ERR: f64 = 1e-12;

#[fixture]
fn axis() -> Axes {
    Axes::new()
}

/// Plots the two extra lines most tests end with, drawn with the same options
fn plot_pair(axis: &mut Axes, opts: LineOpts) {
    axis.plot(&[4.3, 5.0, 6.0], &[3.4, 4.0, 7.0], opts.clone())
        .unwrap();
    axis.plot(&[5.3, 6.0, 7.0], &[10.2, 9.0, 8.0], opts).unwrap();
}

fn plot_one(axis: &mut Axes, opts: LineOpts) -> usize {
    axis.plot(&X0, &Y0, opts).unwrap()
}

fn tight() -> Tolerance {
    Tolerance::new(1e-13, 0.0)
}

#[rstest]
fn test_empty_plot(axis: Axes) {
    assert_eq!(
        LinePlotChecker::new(&axis).err(),
        Some(PlotCheckError::InvalidPlot(InvalidPlotError::NoData))
    );
}

#[rstest]
fn test_num_lines(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default());
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_num_lines(1)
        .unwrap();

    axis.plot(&[2.0, 3.17, 4.3, 5.0, 6.0], &[1.5, 2.25, 3.4, 4.0, 7.0], LineOpts::default())
        .unwrap();
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_num_lines(2)
        .unwrap();

    // a line without x values
    axis.plot_y(&[10.0, 20.0, 30.0], LineOpts::default()).unwrap();
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_num_lines(3)
        .unwrap();

    plot_pair(&mut axis, LineOpts::default());
    let checker = LinePlotChecker::new(&axis).unwrap();
    checker.assert_num_lines(5).unwrap();
    assert!(checker.assert_num_lines(6).is_err());
}

#[rstest]
fn test_data(mut axis: Axes) {
    let x1 = vec![2.0, 3.17, 4.3, 5.0, 6.0];
    let y1 = vec![1.5, 2.25, 3.4, 4.0, 7.0];
    plot_one(&mut axis, LineOpts::default());
    axis.plot(&x1, &y1, LineOpts::default()).unwrap();
    axis.plot_y(&[10.0, 20.0, 30.0], LineOpts::default()).unwrap();
    plot_pair(&mut axis, LineOpts::default());

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_x_data_equal(&[
            X0.to_vec(),
            x1,
            vec![0.0, 1.0, 2.0],
            vec![4.3, 5.0, 6.0],
            vec![5.3, 6.0, 7.0],
        ])
        .unwrap();
    checker
        .assert_y_data_equal(&[
            Y0.to_vec(),
            y1,
            vec![10.0, 20.0, 30.0],
            vec![3.4, 4.0, 7.0],
            vec![10.2, 9.0, 8.0],
        ])
        .unwrap();
}

#[rstest]
fn test_data_allclose(mut axis: Axes) {
    let x = X0.map(|v| v + ERR);
    let y = Y0.map(|v| v + ERR);
    axis.plot(&x, &y, LineOpts::default()).unwrap();

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_x_data_equal(&[X0.to_vec()]).is_err());
    assert!(checker.assert_y_data_equal(&[Y0.to_vec()]).is_err());
    assert!(checker.assert_x_data_allclose(&[X0.to_vec()], tight()).is_err());
    assert!(checker.assert_y_data_allclose(&[Y0.to_vec()], tight()).is_err());

    checker
        .assert_x_data_allclose(&[X0.to_vec()], Tolerance::default())
        .unwrap();
    checker
        .assert_y_data_allclose(&[Y0.to_vec()], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_colors(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_color([0.0, 1.0, 1.0]));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_colors_equal([[0.0, 1.0, 1.0]])
        .unwrap();

    plot_one(&mut axis, LineOpts::default().with_color("#FF0000"));
    plot_one(&mut axis, LineOpts::default().with_color("g"));
    plot_one(&mut axis, LineOpts::default().with_color("magenta"));
    plot_pair(&mut axis, LineOpts::default().with_color("k"));

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_colors_equal([
            Color::from([0.0, 1.0, 1.0]),
            Color::parse("#FF0000"),
            Color::parse("g"),
            Color::parse("magenta"),
            Color::parse("k"),
            Color::parse("k"),
        ])
        .unwrap();
    assert!(checker.assert_colors_equal(["k"]).is_err());
}

#[rstest]
fn test_colors_allclose(mut axis: Axes) {
    let color = [0.1, 1.0, 1.0];
    plot_one(&mut axis, LineOpts::default().with_color(color.map(|c| c - ERR)));

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_colors_equal([color]).is_err());
    assert!(checker.assert_colors_allclose([color], tight()).is_err());
    checker
        .assert_colors_allclose([color], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_linewidths(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_line_width(1.0));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_linewidths_equal(&[1.0])
        .unwrap();

    plot_one(&mut axis, LineOpts::default().with_line_width(2.0));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_linewidths_equal(&[1.0, 2.0])
        .unwrap();

    plot_pair(&mut axis, LineOpts::default().with_line_width(4.0));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_linewidths_equal(&[1.0, 2.0, 4.0, 4.0])
        .unwrap();
}

#[rstest]
fn test_linewidths_allclose(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_line_width(1.0 + ERR));

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_linewidths_equal(&[1.0]).is_err());
    assert!(checker.assert_linewidths_allclose(&[1.0], tight()).is_err());
    checker
        .assert_linewidths_allclose(&[1.0], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_linestyles(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default());
    plot_one(&mut axis, LineOpts::fmt("k--").unwrap());
    plot_one(&mut axis, LineOpts::default().with_line_style(LineStyle::Dotted));
    plot_one(&mut axis, LineOpts::fmt("o").unwrap());

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_linestyles_equal(["-", "--", ":", ""])
        .unwrap();
    checker
        .assert_linestyles_equal(["solid", "dashed", "dotted", "None"])
        .unwrap();
    assert!(matches!(
        checker.assert_linestyles_equal(["-", "--", ":", "~"]),
        Err(PlotCheckError::InvalidExpectation { .. })
    ));
}

#[rstest]
fn test_markerfacecolors(mut axis: Axes) {
    let circle = || LineOpts::default().with_marker(MarkerShape::Circle);

    // inherits the line color
    plot_one(&mut axis, circle().with_color("c"));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_markerfacecolors_equal(["c"])
        .unwrap();

    plot_one(&mut axis, circle().with_marker_face_color([0.0, 1.0, 1.0]));
    plot_one(&mut axis, circle().with_marker_face_color("#FF0000"));
    plot_one(&mut axis, circle().with_marker_face_color("g"));
    plot_one(&mut axis, circle().with_marker_face_color("magenta"));
    plot_pair(&mut axis, circle().with_marker_face_color("k"));

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_markerfacecolors_equal([
            Color::parse("c"),
            Color::from([0.0, 1.0, 1.0]),
            Color::parse("#FF0000"),
            Color::parse("g"),
            Color::parse("magenta"),
            Color::parse("k"),
            Color::parse("k"),
        ])
        .unwrap();
}

#[rstest]
fn test_markerfacecolors_allclose(mut axis: Axes) {
    let color = [0.1, 1.0, 1.0];
    plot_one(
        &mut axis,
        LineOpts::default().with_marker_face_color(color.map(|c| c + ERR)),
    );

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_markerfacecolors_equal([color]).is_err());
    assert!(checker
        .assert_markerfacecolors_allclose([color], tight())
        .is_err());
    checker
        .assert_markerfacecolors_allclose([color], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_markeredgecolors(mut axis: Axes) {
    let circle = || LineOpts::default().with_marker(MarkerShape::Circle);

    // filled markers default to a black edge, whatever the line color
    plot_one(&mut axis, circle().with_color("c"));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_markeredgecolors_equal([[0.0, 0.0, 0.0]])
        .unwrap();

    plot_one(&mut axis, circle().with_marker_edge_color([0.0, 1.0, 1.0]));
    plot_one(&mut axis, circle().with_marker_edge_color("#FF0000"));
    plot_one(&mut axis, circle().with_marker_edge_color("g"));
    plot_one(&mut axis, circle().with_marker_edge_color("magenta"));
    plot_pair(&mut axis, circle().with_marker_edge_color("k"));
    // unfilled markers take the line color
    plot_one(
        &mut axis,
        LineOpts::default().with_marker(MarkerShape::Plus).with_color("c"),
    );

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_markeredgecolors_equal([
            Color::parse("k"),
            Color::from([0.0, 1.0, 1.0]),
            Color::parse("#FF0000"),
            Color::parse("g"),
            Color::parse("magenta"),
            Color::parse("k"),
            Color::parse("k"),
            Color::from([0.0, 0.75, 0.75]),
        ])
        .unwrap();
}

#[rstest]
fn test_markeredgecolors_allclose(mut axis: Axes) {
    let color = [0.1, 1.0, 1.0];
    plot_one(
        &mut axis,
        LineOpts::default().with_marker_edge_color(color.map(|c| c + ERR)),
    );

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_markeredgecolors_equal([color]).is_err());
    assert!(checker
        .assert_markeredgecolors_allclose([color], tight())
        .is_err());
    checker
        .assert_markeredgecolors_allclose([color], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_markeredgewidths(mut axis: Axes) {
    let circle = || LineOpts::default().with_marker(MarkerShape::Circle);
    plot_one(&mut axis, circle().with_marker_edge_width(1.0));
    plot_one(&mut axis, circle().with_marker_edge_width(2.0));
    plot_pair(&mut axis, circle().with_marker_edge_width(4.0));

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_markeredgewidths_equal(&[1.0, 2.0, 4.0, 4.0])
        .unwrap();
    assert!(checker.assert_markeredgewidths_equal(&[1.0, 2.0, 4.0]).is_err());
}

#[rstest]
fn test_markeredgewidths_allclose(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_marker_edge_width(1.0 + ERR));

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_markeredgewidths_equal(&[1.0]).is_err());
    assert!(checker
        .assert_markeredgewidths_allclose(&[1.0], tight())
        .is_err());
    checker
        .assert_markeredgewidths_allclose(&[1.0], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_markersizes(mut axis: Axes) {
    let circle = || LineOpts::default().with_marker(MarkerShape::Circle);
    plot_one(&mut axis, circle().with_marker_size(1.0));
    plot_one(&mut axis, circle().with_marker_size(2.0));
    plot_pair(&mut axis, circle().with_marker_size(4.0));

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_markersizes_equal(&[1.0, 2.0, 4.0, 4.0])
        .unwrap();
}

#[rstest]
fn test_markersizes_allclose(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_marker_size(1.0 + ERR));

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_markersizes_equal(&[1.0]).is_err());
    assert!(checker.assert_markersizes_allclose(&[1.0], tight()).is_err());
    checker
        .assert_markersizes_allclose(&[1.0], Tolerance::default())
        .unwrap();
}

#[rstest]
fn test_markers(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default());
    plot_one(&mut axis, LineOpts::default().with_marker(MarkerShape::None));
    plot_one(&mut axis, LineOpts::default().with_marker(MarkerShape::Circle));
    plot_one(&mut axis, LineOpts::default().with_marker(MarkerShape::Point));
    plot_pair(&mut axis, LineOpts::default().with_marker(MarkerShape::Diamond));

    let checker = LinePlotChecker::new(&axis).unwrap();
    checker
        .assert_markers_equal(["", "", "o", ".", "D", "D"])
        .unwrap();
    assert!(matches!(
        checker.assert_markers_equal(["", "", "o", ".", "D", "Q"]),
        Err(PlotCheckError::InvalidMarker(_))
    ));
}

#[rstest]
fn test_kwarg_labels(mut axis: Axes) {
    axis.plot(&X0, &Y0, LineOpts::default().with_label("foo"))
        .unwrap();
    axis.plot(&X0[1..], &Y0[1..], LineOpts::default().with_label("bar"))
        .unwrap();
    axis.plot(&X0[..3], &Y0[..3], LineOpts::default().with_label("baz"))
        .unwrap();

    // no legend yet
    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_labels_equal(&["foo", "bar", "baz"]).is_err());

    axis.add_legend().unwrap();
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_labels_equal(&["foo", "bar", "baz"])
        .unwrap();
}

#[rstest]
fn test_legend_labels(mut axis: Axes) {
    axis.plot(&X0, &Y0, LineOpts::default()).unwrap();
    axis.plot(&X0[1..], &Y0[1..], LineOpts::default()).unwrap();
    axis.plot(&X0[..3], &Y0[..3], LineOpts::default()).unwrap();

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_labels_equal(&["foo", "bar", "baz"]).is_err());

    axis.add_legend_with_labels(["foo", "bar", "baz"]).unwrap();
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_labels_equal(&["foo", "bar", "baz"])
        .unwrap();
}

#[rstest]
fn test_legend_handles_and_labels(mut axis: Axes) {
    let l0 = axis.plot(&X0, &Y0, LineOpts::default()).unwrap();
    let l1 = axis.plot(&X0[1..], &Y0[1..], LineOpts::default()).unwrap();
    let l2 = axis.plot(&X0[..3], &Y0[..3], LineOpts::default()).unwrap();

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_labels_equal(&["foo", "bar", "baz"]).is_err());

    // handles out of draw order
    axis.add_legend_with_handles(&[l2, l0, l1], ["baz", "foo", "bar"])
        .unwrap();
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_labels_equal(&["foo", "bar", "baz"])
        .unwrap();
}

#[rstest]
fn test_alphas(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_color([0.0, 1.0, 1.0]));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_alphas_equal(&[1.0])
        .unwrap();

    // alpha from the rgba color
    plot_one(&mut axis, LineOpts::default().with_color([0.0, 1.0, 1.0, 0.5]));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_alphas_equal(&[1.0, 0.5])
        .unwrap();

    // explicit alpha
    plot_pair(&mut axis, LineOpts::default().with_alpha(0.2));
    LinePlotChecker::new(&axis)
        .unwrap()
        .assert_alphas_equal(&[1.0, 0.5, 0.2, 0.2])
        .unwrap();
}

#[rstest]
fn test_alphas_allclose(mut axis: Axes) {
    plot_one(&mut axis, LineOpts::default().with_alpha(0.5 + ERR));

    let checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_alphas_equal(&[0.5]).is_err());
    assert!(checker.assert_alphas_allclose(&[0.5], tight()).is_err());
    checker
        .assert_alphas_allclose(&[0.5], Tolerance::default())
        .unwrap();
}

struct Expected {
    x: Vec<Vec<f64>>,
    y: Vec<Vec<f64>>,
    colors: [&'static str; 3],
    markers: [&'static str; 3],
    labels: [&'static str; 3],
}

/// Three labelled lines, drawn in a different order than they are listed
fn shuffled_lines(axis: &mut Axes) -> Expected {
    let x = (0..20).map(|i| i as f64 / 19.0).collect::<Vec<_>>();
    let expected = Expected {
        x: vec![x.clone(); 3],
        y: (1..=3)
            .map(|p| x.iter().map(|v| v.powi(p)).collect())
            .collect(),
        colors: ["r", "g", "b"],
        markers: ["o", "s", "D"],
        labels: ["Line A", "Line B", "Line C"],
    };

    for i in [2, 0, 1] {
        let opts = LineOpts::default()
            .with_color(expected.colors[i])
            .with_marker(MarkerShape::parse(expected.markers[i]).unwrap())
            .with_label(expected.labels[i])
            .with_alpha(0.5);
        axis.plot(&expected.x[i], &expected.y[i], opts).unwrap();
    }
    axis.add_legend().unwrap();
    expected
}

fn assert_in_expected_order(checker: &LinePlotChecker, expected: &Expected) {
    checker.assert_num_lines(3).unwrap();
    checker.assert_x_data_equal(&expected.x).unwrap();
    checker.assert_y_data_equal(&expected.y).unwrap();
    checker.assert_colors_equal(expected.colors).unwrap();
    checker.assert_markers_equal(expected.markers).unwrap();
    checker.assert_labels_equal(&expected.labels).unwrap();
    checker.assert_alphas_equal(&[0.5, 0.5, 0.5]).unwrap();
}

#[rstest]
#[case(LineAttribute::Colors)]
#[case(LineAttribute::Markers)]
#[case(LineAttribute::Labels)]
#[case(LineAttribute::YData)]
fn test_permutations(mut axis: Axes, #[case] key: LineAttribute) {
    let expected = shuffled_lines(&mut axis);
    let mut checker = LinePlotChecker::new(&axis).unwrap();
    assert!(checker.assert_y_data_equal(&expected.y).is_err());

    let found = match key {
        LineAttribute::Colors => checker.find_permutation(key, expected.colors),
        LineAttribute::Markers => checker.find_permutation(key, expected.markers),
        LineAttribute::Labels => checker.find_permutation(key, expected.labels),
        _ => checker.find_permutation(key, expected.y.clone()),
    }
    .unwrap();
    assert_eq!(found.indices(), &[2, 0, 1]);
    assert_in_expected_order(&checker, &expected);
}

#[rstest]
fn test_permutation_not_found(mut axis: Axes) {
    let expected = shuffled_lines(&mut axis);
    let mut checker = LinePlotChecker::new(&axis).unwrap();

    let err = checker
        .find_permutation(LineAttribute::Labels, ["Line A", "Line B"])
        .unwrap_err();
    assert!(matches!(err, PlotCheckError::PermutationNotFound { .. }));

    let renamed = expected
        .labels
        .iter()
        .map(|l| format!("{l}a"))
        .collect::<Vec<_>>();
    let err = checker
        .find_permutation(LineAttribute::Labels, renamed)
        .unwrap_err();
    assert!(err.is_assertion_failure());
    assert!(checker.permutation().is_none());
}

#[rstest]
fn test_permutation_by_attribute_name(mut axis: Axes) {
    let expected = shuffled_lines(&mut axis);
    let mut checker = LinePlotChecker::new(&axis).unwrap();
    let key = LineAttribute::parse("markers").unwrap();
    checker.find_permutation(key, expected.markers).unwrap();
    assert_in_expected_order(&checker, &expected);
}
