use approx::assert_relative_eq;
use bubble_chart::api::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use bubble_chart::core::{LeafId, LeafRecord};
use bubble_chart::render::{Document, ElementId, NullRenderer, style_overrides};
use bubble_chart::{BubbleChart, ChartError};

fn scenario_records() -> Vec<LeafRecord> {
    vec![LeafRecord::new(1, "xyz", 1.0), LeafRecord::new(2, "abc", 4.0)]
}

fn circle_radius(document: &Document, circle: ElementId) -> f64 {
    document
        .attribute(circle, "r")
        .expect("circle has a radius")
        .parse()
        .expect("radius is numeric")
}

#[test]
fn default_chart_renders_single_svg_with_default_view_box() {
    let mut chart: BubbleChart = BubbleChart::default();
    assert_eq!(chart.width(), DEFAULT_WIDTH);
    assert_eq!(chart.height(), DEFAULT_HEIGHT);

    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    let svgs = document.children_by_tag(body, "svg");
    assert_eq!(svgs.len(), 1);
    assert_eq!(document.attribute(svgs[0], "viewBox"), Some("0 0 600 600"));
    assert_eq!(
        document.attribute(svgs[0], "class"),
        Some("lgv-bubble-chart")
    );
    assert!(document.children(svgs[0]).is_empty());
    assert_eq!(chart.artboard(), Some(svgs[0]));
}

#[test]
fn two_records_render_two_groups_with_value_ordered_radii() {
    let mut chart =
        BubbleChart::with_dimensions(scenario_records(), 300.0, 500.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    let artboard = chart.artboard().expect("attached");
    assert_eq!(document.attribute(artboard, "viewBox"), Some("0 0 300 500"));
    assert_eq!(document.children_by_tag(artboard, "g").len(), 2);
    assert_eq!(chart.rendered_leaf_count(), 2);

    let small = chart.leaf_circle(&LeafId::from(1)).expect("circle 1");
    let large = chart.leaf_circle(&LeafId::from(2)).expect("circle 2");
    assert!(circle_radius(&document, small) > 0.0);
    assert!(circle_radius(&document, large) > circle_radius(&document, small));
    assert_eq!(document.attribute(large, "class"), Some("lgv-node"));
}

#[test]
fn leaf_group_carries_transform_and_stacked_label() {
    let mut chart =
        BubbleChart::with_dimensions(scenario_records(), 300.0, 500.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    let group = chart.leaf_group(&LeafId::from(2)).expect("group 2");
    let transform = document.attribute(group, "transform").expect("transform");
    assert!(transform.starts_with("translate("));

    let label = chart.leaf_label(&LeafId::from(2)).expect("label 2");
    assert_eq!(document.attribute(label, "class"), Some("lgv-label"));
    let spans = document.children_by_tag(label, "tspan");
    assert_eq!(spans.len(), 2);
    let first = document.element(spans[0]).expect("first tspan");
    let second = document.element(spans[1]).expect("second tspan");
    assert_eq!(first.text(), Some("abc"));
    assert_eq!(document.attribute(spans[0], "dy"), Some("-0.1em"));
    assert_eq!(second.text(), Some("4"));
    assert_eq!(document.attribute(spans[1], "dy"), Some("1.2em"));
}

#[test]
fn circles_fit_inside_the_inset_artboard() {
    let mut chart =
        BubbleChart::with_dimensions(scenario_records(), 300.0, 500.0).expect("chart init");
    let snapshot = chart.layout_snapshot().expect("snapshot");

    for leaf in &snapshot.leaves {
        assert!(leaf.x - leaf.r >= 1.0 - 1e-9);
        assert!(leaf.x + leaf.r <= 299.0 + 1e-9);
        assert!(leaf.y - leaf.r >= 1.0 - 1e-9);
        assert!(leaf.y + leaf.r <= 499.0 + 1e-9);
    }

    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");
    let circle = chart.leaf_circle(&LeafId::from(2)).expect("circle 2");
    let leaf = snapshot.leaf(&LeafId::from(2)).expect("leaf 2");
    assert_relative_eq!(circle_radius(&document, circle), leaf.r);
}

#[test]
fn repeated_render_is_idempotent() {
    let mut chart =
        BubbleChart::with_dimensions(scenario_records(), 300.0, 500.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();

    chart.render(&mut document, body, None).expect("first render");
    let first_markup = document.to_svg_string(body).expect("markup");
    let first_count = document.element_count();

    chart.render(&mut document, body, None).expect("second render");
    assert_eq!(document.to_svg_string(body).expect("markup"), first_markup);
    assert_eq!(document.element_count(), first_count);
    assert_eq!(document.children_by_tag(body, "svg").len(), 1);
}

#[test]
fn style_overrides_are_applied_to_every_circle() {
    let mut chart =
        BubbleChart::with_dimensions(scenario_records(), 300.0, 500.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart
        .render(
            &mut document,
            body,
            Some(style_overrides([("fill", "steelblue"), ("stroke", "#333")])),
        )
        .expect("render");

    for id in [LeafId::from(1), LeafId::from(2)] {
        let circle = chart.leaf_circle(&id).expect("circle");
        assert_eq!(document.attribute(circle, "fill"), Some("steelblue"));
        assert_eq!(document.attribute(circle, "stroke"), Some("#333"));
    }
    assert_eq!(chart.style_overrides().len(), 2);
}

#[test]
fn empty_data_renders_empty_artboard() {
    let mut chart = BubbleChart::new(Vec::<LeafRecord>::new()).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    let artboard = chart.artboard().expect("attached");
    assert!(document.children_by_tag(artboard, "g").is_empty());
    assert_eq!(chart.rendered_leaf_count(), 0);
}

#[test]
fn zero_weight_data_renders_collapsed_bubbles() {
    let records = vec![LeafRecord::new(1, "a", 0.0), LeafRecord::new(2, "b", 0.0)];
    let mut chart = BubbleChart::with_dimensions(records, 200.0, 100.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    for id in [LeafId::from(1), LeafId::from(2)] {
        let circle = chart.leaf_circle(&id).expect("circle");
        assert_eq!(circle_radius(&document, circle), 0.0);
        let group = chart.leaf_group(&id).expect("group");
        assert_eq!(document.attribute(group, "transform"), Some("translate(100,50)"));
    }
}

#[test]
fn invalid_dimensions_fail_without_touching_the_document() {
    for (width, height) in [(0.0, 100.0), (100.0, -5.0), (f64::NAN, 100.0), (1.5, 300.0)] {
        let mut chart =
            BubbleChart::with_dimensions(scenario_records(), width, height).expect("chart init");
        let mut document = Document::new();
        let body = document.body();

        let err = chart
            .render(&mut document, body, None)
            .expect_err("dimensions must be rejected");
        assert!(matches!(err, ChartError::InvalidDimension { .. }), "{err:?}");
        assert_eq!(document.element_count(), 1);
        assert!(!chart.is_attached());
    }
}

#[test]
fn missing_host_is_reported() {
    let mut chart = BubbleChart::new(scenario_records()).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    let host = document.create_element(body, "div").expect("host");
    assert!(document.remove_element(host));

    let err = chart
        .render(&mut document, host, None)
        .expect_err("host is gone");
    assert!(matches!(err, ChartError::HostUnavailable(_)));
    assert_eq!(document.element_count(), 1);
}

#[test]
fn invalid_records_are_rejected_at_construction() {
    let err = BubbleChart::new(vec![LeafRecord::new(1, "neg", -2.0)])
        .expect_err("negative value");
    assert!(matches!(err, ChartError::InvalidRecord(_)));

    let err = BubbleChart::new(vec![LeafRecord::new(1, "a", 1.0), LeafRecord::new(1, "b", 1.0)])
        .expect_err("duplicate id");
    assert!(matches!(err, ChartError::InvalidRecord(_)));
}

#[test]
fn render_with_null_renderer_needs_no_document() {
    let chart = BubbleChart::new(scenario_records()).expect("chart init");
    let mut renderer = NullRenderer::default();

    chart.render_with(&mut renderer).expect("render");
    assert_eq!(renderer.last_bubble_count, 2);
    assert_eq!(renderer.frames_rendered, 1);
    assert!(!chart.is_attached());
}

#[test]
fn markup_declares_svg_namespace() {
    let mut chart = BubbleChart::new(scenario_records()).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");

    let artboard = chart.artboard().expect("attached");
    let markup = document.to_svg_string(artboard).expect("markup");
    assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert_eq!(markup.matches("<circle").count(), 2);
}
