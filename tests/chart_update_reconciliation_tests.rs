use bubble_chart::api::ChartData;
use bubble_chart::core::{HierarchyDatum, LeafId, LeafRecord};
use bubble_chart::interaction::PointerInput;
use bubble_chart::render::{Document, ElementId, style_overrides};
use bubble_chart::{BubbleChart, ChartError};

fn rendered_chart(records: Vec<LeafRecord>) -> (BubbleChart, Document, ElementId) {
    let mut chart = BubbleChart::with_dimensions(records, 400.0, 400.0).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart.render(&mut document, body, None).expect("render");
    (chart, document, body)
}

fn group_ids(chart: &BubbleChart, document: &Document) -> Vec<ElementId> {
    let artboard = chart.artboard().expect("attached");
    document.children_by_tag(artboard, "g")
}

#[test]
fn update_adds_removes_and_reuses_groups_by_id() {
    let (mut chart, mut document, _) = rendered_chart(vec![
        LeafRecord::new(1, "a", 1.0),
        LeafRecord::new(2, "b", 2.0),
        LeafRecord::new(3, "c", 3.0),
    ]);
    let kept = chart.leaf_group(&LeafId::from(2)).expect("group 2");
    let kept_circle = chart.leaf_circle(&LeafId::from(2)).expect("circle 2");
    let removed = chart.leaf_group(&LeafId::from(1)).expect("group 1");

    chart
        .update(
            &mut document,
            vec![
                LeafRecord::new(2, "b", 5.0),
                LeafRecord::new(3, "c", 3.0),
                LeafRecord::new(4, "d", 1.0),
            ],
            400.0,
            400.0,
            None,
        )
        .expect("update");

    assert!(!document.contains(removed));
    assert_eq!(chart.leaf_group(&LeafId::from(1)), None);
    assert_eq!(chart.leaf_group(&LeafId::from(2)), Some(kept));
    assert_eq!(chart.leaf_circle(&LeafId::from(2)), Some(kept_circle));
    assert!(chart.leaf_group(&LeafId::from(4)).is_some());
    assert_eq!(group_ids(&chart, &document).len(), 3);

    let label = chart.leaf_label(&LeafId::from(2)).expect("label 2");
    let spans = document.children_by_tag(label, "tspan");
    assert_eq!(spans.len(), 2);
    let value_line = document.element(spans[1]).expect("value tspan");
    assert_eq!(value_line.text(), Some("5"));
}

#[test]
fn groups_follow_data_order_after_update() {
    let (mut chart, mut document, _) = rendered_chart(vec![
        LeafRecord::new(1, "a", 1.0),
        LeafRecord::new(2, "b", 2.0),
        LeafRecord::new(3, "c", 3.0),
    ]);

    chart
        .update(
            &mut document,
            vec![
                LeafRecord::new(3, "c", 3.0),
                LeafRecord::new(1, "a", 1.0),
                LeafRecord::new(2, "b", 2.0),
            ],
            400.0,
            400.0,
            None,
        )
        .expect("update");

    let expected: Vec<ElementId> = [3, 1, 2]
        .into_iter()
        .map(|id| chart.leaf_group(&LeafId::from(id)).expect("group"))
        .collect();
    assert_eq!(group_ids(&chart, &document), expected);
}

#[test]
fn update_with_same_arguments_is_geometrically_idempotent() {
    let records = vec![LeafRecord::new(1, "a", 1.0), LeafRecord::new(2, "b", 4.0)];
    let (mut chart, mut document, body) = rendered_chart(records.clone());

    chart
        .update(&mut document, records.clone(), 300.0, 500.0, None)
        .expect("first update");
    let markup = document.to_svg_string(body).expect("markup");

    chart
        .update(&mut document, records, 300.0, 500.0, None)
        .expect("second update");
    assert_eq!(document.to_svg_string(body).expect("markup"), markup);
    assert_eq!(chart.width(), 300.0);
    assert_eq!(chart.height(), 500.0);
    let artboard = chart.artboard().expect("attached");
    assert_eq!(document.attribute(artboard, "viewBox"), Some("0 0 300 500"));
}

#[test]
fn update_to_empty_data_clears_every_group() {
    let (mut chart, mut document, _) =
        rendered_chart(vec![LeafRecord::new(1, "a", 1.0), LeafRecord::new(2, "b", 2.0)]);

    chart
        .update(&mut document, Vec::<LeafRecord>::new(), 400.0, 400.0, None)
        .expect("update");

    assert!(group_ids(&chart, &document).is_empty());
    assert_eq!(chart.rendered_leaf_count(), 0);
    assert!(chart.data().is_empty());
}

#[test]
fn failed_update_leaves_state_and_document_untouched() {
    let records = vec![LeafRecord::new(1, "a", 1.0), LeafRecord::new(2, "b", 2.0)];
    let (mut chart, mut document, body) = rendered_chart(records.clone());
    let markup = document.to_svg_string(body).expect("markup");

    let err = chart
        .update(&mut document, vec![LeafRecord::new(9, "z", 1.0)], 0.0, 400.0, None)
        .expect_err("invalid width");
    assert!(matches!(err, ChartError::InvalidDimension { .. }));

    let err = chart
        .update(
            &mut document,
            vec![LeafRecord::new(9, "z", f64::NAN)],
            400.0,
            400.0,
            None,
        )
        .expect_err("invalid value");
    assert!(matches!(err, ChartError::InvalidRecord(_)));

    assert_eq!(document.to_svg_string(body).expect("markup"), markup);
    assert_eq!(chart.data(), &ChartData::Flat(records));
    assert_eq!(chart.width(), 400.0);
}

#[test]
fn update_before_render_reports_missing_host() {
    let mut chart = BubbleChart::new(vec![LeafRecord::new(1, "a", 1.0)]).expect("chart init");
    let mut document = Document::new();

    let err = chart
        .update(&mut document, vec![LeafRecord::new(1, "a", 2.0)], 100.0, 100.0, None)
        .expect_err("not attached");
    assert!(matches!(err, ChartError::HostUnavailable(_)));
    assert_eq!(document.element_count(), 1);
}

#[test]
fn update_after_host_removal_reports_missing_host() {
    let mut chart = BubbleChart::new(vec![LeafRecord::new(1, "a", 1.0)]).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    let host = document.create_element(body, "div").expect("host");
    chart.render(&mut document, host, None).expect("render");
    assert!(document.remove_element(host));

    let err = chart
        .update(&mut document, vec![LeafRecord::new(1, "a", 2.0)], 100.0, 100.0, None)
        .expect_err("host removed");
    assert!(matches!(err, ChartError::HostUnavailable(_)));
}

#[test]
fn style_overrides_persist_replace_and_retire() {
    let records = vec![LeafRecord::new(1, "a", 1.0)];
    let mut chart = BubbleChart::new(records.clone()).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart
        .render(
            &mut document,
            body,
            Some(style_overrides([("fill", "red"), ("opacity", "0.5")])),
        )
        .expect("render");

    chart
        .update(&mut document, records.clone(), 600.0, 600.0, None)
        .expect("update keeping styles");
    let circle = chart.leaf_circle(&LeafId::from(1)).expect("circle");
    assert_eq!(document.attribute(circle, "fill"), Some("red"));
    assert_eq!(document.attribute(circle, "opacity"), Some("0.5"));

    chart
        .update(
            &mut document,
            records,
            600.0,
            600.0,
            Some(style_overrides([("fill", "blue")])),
        )
        .expect("update replacing styles");
    assert_eq!(document.attribute(circle, "fill"), Some("blue"));
    assert_eq!(document.attribute(circle, "opacity"), None);
}

#[test]
fn hover_state_survives_update_of_the_same_leaf() {
    let (mut chart, mut document, _) =
        rendered_chart(vec![LeafRecord::new(1, "a", 1.0), LeafRecord::new(2, "b", 2.0)]);
    chart
        .handle_pointer_on_leaf(&mut document, &LeafId::from(1), PointerInput::enter(5.0, 5.0))
        .expect("enter");

    chart
        .update(
            &mut document,
            vec![LeafRecord::new(1, "a", 3.0), LeafRecord::new(2, "b", 2.0)],
            400.0,
            400.0,
            None,
        )
        .expect("update");

    let circle = chart.leaf_circle(&LeafId::from(1)).expect("circle");
    assert_eq!(document.attribute(circle, "class"), Some("lgv-node active"));
}

#[test]
fn nested_data_renders_only_leaf_groups() {
    let data = vec![
        HierarchyDatum::Group {
            id: LeafId::from("g"),
            label: "group".to_owned(),
            children: vec![
                LeafRecord::new(1, "a", 1.0).into(),
                LeafRecord::new(2, "b", 2.0).into(),
            ],
        },
        LeafRecord::new(3, "c", 4.0).into(),
    ];
    let (mut chart, mut document, _) = rendered_chart(Vec::new());

    chart
        .update(&mut document, data, 400.0, 400.0, None)
        .expect("nested update");

    assert_eq!(group_ids(&chart, &document).len(), 3);
    assert!(chart.leaf_group(&LeafId::from("g")).is_none());
}

#[test]
fn duplicate_leaf_ids_across_groups_are_rejected() {
    let data = vec![
        HierarchyDatum::Group {
            id: LeafId::from("g1"),
            label: "g1".to_owned(),
            children: vec![LeafRecord::new(1, "a", 1.0).into()],
        },
        HierarchyDatum::Group {
            id: LeafId::from("g2"),
            label: "g2".to_owned(),
            children: vec![LeafRecord::new(1, "b", 1.0).into()],
        },
    ];

    let err = BubbleChart::new(data).expect_err("leaf ids collide");
    assert!(matches!(err, ChartError::InvalidRecord(_)));
}
