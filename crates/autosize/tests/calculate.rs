use autosize::{
    EngineQuirks, HeightCalculator, MeasurementCache, NodeHeights, SizingProperty,
    StylePriority, compute_metrics,
};
use headless_dom::{Document, NodeId};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A connected textarea with `style` and `value`.
fn textarea(document: &mut Document, style: &str, value: &str) -> NodeId {
    let node = document.create_element("textarea");
    document.append_child(document.body(), node).unwrap();
    document.set_attribute(node, "style", style).unwrap();
    document.set_form_value(node, value).unwrap();
    node
}

const CONTENT_BOX_PLAIN: &str = "box-sizing: content-box; line-height: 20px; \
    padding-top: 0; padding-bottom: 0; padding-left: 0; padding-right: 0; \
    border-top-width: 0; border-bottom-width: 0; border-left-width: 0; border-right-width: 0; \
    font-family: serif; font-size: 20px; width: 400px";

const BORDER_BOX_PADDED: &str = "box-sizing: border-box; line-height: 20px; \
    padding-top: 4px; padding-bottom: 4px; padding-left: 4px; padding-right: 4px; \
    border-top-width: 1px; border-bottom-width: 1px; border-left-width: 1px; border-right-width: 1px; \
    font-family: serif; font-size: 20px; width: 400px";

fn measure(
    document: &mut Document,
    node: NodeId,
    min_rows: Option<u32>,
    max_rows: Option<u32>,
) -> NodeHeights {
    let mut calculator = HeightCalculator::for_environment(&*document);
    let mut cache: MeasurementCache = None;
    calculator
        .calculate(document, &node, &mut cache, min_rows, max_rows)
        .unwrap()
}

#[test]
fn single_line_content_box_without_bounds() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "hello");
    let heights = measure(&mut document, node, None, None);
    assert_eq!(
        heights,
        NodeHeights {
            height: 20.0,
            min_height: f64::NEG_INFINITY,
            max_height: f64::INFINITY,
            row_height: 20.0,
            rows: 1,
            visible_rows: 1,
        }
    );
}

#[test]
fn border_box_is_clamped_to_max_rows() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "one\ntwo\nthree");
    let heights = measure(&mut document, node, Some(1), Some(2));
    assert!((heights.row_height - 20.0).abs() < 0.001);
    assert!((heights.min_height - 30.0).abs() < 0.001);
    assert!((heights.max_height - 50.0).abs() < 0.001);
    assert!((heights.height - 50.0).abs() < 0.001);
    assert_eq!(heights.rows, 3);
    assert_eq!(heights.visible_rows, 2);
}

#[test]
fn content_box_height_excludes_padding_and_border() {
    init_logging();
    let mut document = Document::new();
    let style = "box-sizing: content-box; line-height: 20px; padding-top: 5px; padding-bottom: 5px; \
        border-top-width: 3px; border-bottom-width: 3px; font-family: serif; font-size: 20px; width: 400px";
    let node = textarea(&mut document, style, "a\nb");
    let natural = {
        let twin = textarea(&mut document, style, "a\nb");
        f64::from(document.scroll_height_of(twin))
    };
    let heights = measure(&mut document, node, None, None);
    assert!((natural - 50.0).abs() < 0.001);
    assert!((heights.height - (natural - 10.0)).abs() < 0.001);
}

#[test]
fn border_box_height_adds_border() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "a\nb");
    let heights = measure(&mut document, node, None, None);
    // 2 rows of 20px + 8px padding, plus 2px border.
    assert!((heights.height - 50.0).abs() < 0.001);
    assert_eq!(heights.rows, 2);
}

#[test]
fn row_height_does_not_depend_on_content() {
    init_logging();
    let mut document = Document::new();
    let hello = textarea(&mut document, BORDER_BOX_PADDED, "hello\nworld\nagain");
    let filler = textarea(&mut document, BORDER_BOX_PADDED, "x");
    let first = measure(&mut document, hello, None, None);
    let second = measure(&mut document, filler, None, None);
    assert!((first.row_height - second.row_height).abs() < f64::EPSILON);
}

#[test]
fn repeated_calculations_are_identical() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "some text\nover lines");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;
    let first = calculator.calculate(&mut document, &node, &mut cache, Some(1), Some(4));
    let second = calculator.calculate(&mut document, &node, &mut cache, Some(1), Some(4));
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn clamping_is_monotonic() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "1\n2\n3\n4");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;

    let mut previous = f64::NEG_INFINITY;
    for min_rows in 0..8 {
        let heights = calculator
            .calculate(&mut document, &node, &mut cache, Some(min_rows), None)
            .unwrap();
        assert!(heights.height >= previous);
        previous = heights.height;
    }

    let mut previous_ceiling = f64::NEG_INFINITY;
    for max_rows in 0..8 {
        let heights = calculator
            .calculate(&mut document, &node, &mut cache, None, Some(max_rows))
            .unwrap();
        assert!(heights.max_height >= previous_ceiling);
        assert!(heights.height <= heights.max_height);
        previous_ceiling = heights.max_height;
    }
}

#[test]
fn rows_ignore_bounds() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "1\n2\n3\n4\n5");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;
    for (min_rows, max_rows) in [(None, None), (Some(8), None), (None, Some(2)), (Some(1), Some(3))] {
        let heights = calculator
            .calculate(&mut document, &node, &mut cache, min_rows, max_rows)
            .unwrap();
        assert_eq!(heights.rows, 5);
    }
}

#[test]
fn min_rows_raises_short_content() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "short");
    let heights = measure(&mut document, node, Some(3), None);
    assert!((heights.min_height - 60.0).abs() < 0.001);
    assert!((heights.height - 60.0).abs() < 0.001);
    assert_eq!(heights.rows, 1);
    assert_eq!(heights.visible_rows, 3);
}

#[test]
fn filled_cache_is_trusted_even_when_stale() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "a\nb");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;

    let before = calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert!(cache.is_some());

    document
        .set_inline_style_property(node, "line-height", "40px", StylePriority::Normal)
        .unwrap();
    let stale = calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert_eq!(before, stale);

    cache = None;
    let fresh = calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert!((fresh.row_height - 40.0).abs() < 0.001);
    assert!((fresh.height - 80.0).abs() < 0.001);
}

#[test]
fn detached_element_yields_nothing_and_leaves_cache_empty() {
    init_logging();
    let mut document = Document::new();
    let node = document.create_element("textarea");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;
    assert!(
        calculator
            .calculate(&mut document, &node, &mut cache, Some(1), None)
            .is_none()
    );
    assert!(cache.is_none());
}

#[test]
fn non_interactive_environment_is_a_no_op() {
    init_logging();
    let mut document = Document::non_interactive();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "text");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;
    assert!(
        calculator
            .calculate(&mut document, &node, &mut cache, None, None)
            .is_none()
    );
    assert!(calculator.surface().is_none());
    assert!(cache.is_none());
}

#[test]
fn surface_is_created_once_hidden_and_reattached() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "text");
    let mut calculator = HeightCalculator::for_environment(&document);
    let mut cache: MeasurementCache = None;
    calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();

    let surface = *calculator.surface().unwrap();
    assert!(document.is_connected(surface));
    let inline = document.inline_style(surface).unwrap();
    for (name, value) in autosize::HIDDEN_SURFACE_STYLE {
        assert_eq!(inline.get(name), Some(value));
        assert_eq!(inline.priority(name), Some(StylePriority::Important));
    }
    assert_eq!(inline.get("width"), Some("400px"));
    assert_eq!(inline.get("box-sizing"), Some("border-box"));

    document.detach(surface);
    calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert_eq!(calculator.surface(), Some(&surface));
    assert!(document.is_connected(surface));
}

#[test]
fn surface_never_touches_the_measured_element() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "text");
    let before = document.inline_style(node).cloned();
    measure(&mut document, node, Some(2), Some(4));
    assert_eq!(document.inline_style(node).cloned(), before);
    assert_eq!(document.form_value(node), "text");
}

#[test]
fn placeholder_then_filler_are_measured_when_empty() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, CONTENT_BOX_PLAIN, "");
    document.set_attribute(node, "placeholder", "one\ntwo\nthree").unwrap();
    assert_eq!(measure(&mut document, node, None, None).rows, 3);

    let bare = textarea(&mut document, CONTENT_BOX_PLAIN, "");
    let heights = measure(&mut document, bare, None, None);
    assert_eq!(heights.rows, 1);
    assert!((heights.height - 20.0).abs() < 0.001);
}

#[test]
fn legacy_width_reporting_is_corrected() {
    init_logging();
    let style = "box-sizing: border-box; width: 200px; padding-left: 10px; padding-right: 10px; \
        border-left-width: 1px; border-right-width: 1px; padding-top: 0; padding-bottom: 0; \
        border-top-width: 0; border-bottom-width: 0; line-height: 20px; font-family: serif; font-size: 20px";
    // 17 characters of 10px fit the 178px content box, but not a 156px one.
    let text = "aaaaaaaaaaaaaaaaa";

    let mut document = Document::new().with_legacy_width_reporting(true);
    let node = textarea(&mut document, style, text);

    let quirks = EngineQuirks::detect(&document);
    assert!(quirks.content_width_for_border_box);
    let corrected = compute_metrics(&document, &node, quirks).unwrap();
    assert_eq!(corrected.sizing_style().get(SizingProperty::Width), "200px");
    let raw = compute_metrics(&document, &node, quirks.with_width_correction(false)).unwrap();
    assert_eq!(raw.sizing_style().get(SizingProperty::Width), "178px");

    let mut calculator = HeightCalculator::new(quirks);
    assert_eq!(calculator.quirks(), quirks);
    let mut cache: MeasurementCache = None;
    let heights = calculator
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert_eq!(heights.rows, 1);

    let mut uncorrected = HeightCalculator::new(quirks.with_width_correction(false));
    let mut cache: MeasurementCache = None;
    let heights = uncorrected
        .calculate(&mut document, &node, &mut cache, None, None)
        .unwrap();
    assert_eq!(heights.rows, 2);
}

#[test]
fn zero_line_height_reports_zero_rows() {
    init_logging();
    let mut document = Document::new();
    let style = CONTENT_BOX_PLAIN.replace("line-height: 20px", "line-height: 0px");
    let node = textarea(&mut document, &style, "a\nb");
    let heights = measure(&mut document, node, Some(1), Some(3));
    assert!(heights.row_height.abs() < f64::EPSILON);
    assert_eq!(heights.rows, 0);
    assert_eq!(heights.visible_rows, 0);
    assert!(heights.height.is_finite());
}

#[test]
fn padding_and_border_totals() {
    init_logging();
    let mut document = Document::new();
    let node = textarea(&mut document, BORDER_BOX_PADDED, "");
    let styling = compute_metrics(&document, &node, EngineQuirks::none()).unwrap();
    assert!((styling.padding_size() - 8.0).abs() < f32::EPSILON);
    assert!((styling.border_size() - 2.0).abs() < f32::EPSILON);
}

/// A textarea with the user-agent default style: 16px monospace,
/// `line-height: normal`, 2px padding and 1px border.
fn default_textarea(document: &mut Document, lines: usize) -> NodeId {
    let node = document.create_element("textarea");
    document.append_child(document.body(), node).unwrap();
    document.set_form_value(node, &vec!["x"; lines].join("\n")).unwrap();
    node
}

#[test]
fn default_style_counts_every_row() {
    init_logging();
    for lines in [1, 15, 30] {
        let mut document = Document::new();
        let node = default_textarea(&mut document, lines);
        let max_rows = u32::try_from(lines).unwrap();
        let heights = measure(&mut document, node, None, Some(max_rows));
        assert_eq!((heights.rows, heights.visible_rows), (max_rows, max_rows), "{lines} lines");
        assert!((heights.height - heights.max_height).abs() < 0.001);
    }
}

#[test]
fn fractional_line_heights_keep_row_counts_exact() {
    init_logging();
    let line_heights = ["normal", "1.3", "1.45", "18.6px"];
    for box_sizing in ["content-box", "border-box"] {
        for font_size in 13..=21 {
            for line_height in line_heights {
                let style = format!(
                    "box-sizing: {box_sizing}; font-size: {font_size}px; line-height: {line_height}; \
                     width: 400px"
                );
                let mut document = Document::new();
                let node = textarea(&mut document, &style, "");
                let mut calculator = HeightCalculator::for_environment(&document);
                for lines in 1..=24_u32 {
                    let text = vec!["x"; lines as usize].join("\n");
                    document.set_form_value(node, &text).unwrap();
                    let mut cache: MeasurementCache = None;
                    let free = calculator
                        .calculate(&mut document, &node, &mut cache, None, None)
                        .unwrap();
                    assert_eq!(free.rows, lines, "{style} with {lines} lines");

                    let max_rows = lines.div_ceil(2);
                    let clamped = calculator
                        .calculate(&mut document, &node, &mut cache, None, Some(max_rows))
                        .unwrap();
                    assert_eq!(clamped.rows, lines, "{style} with {lines} lines");
                    assert_eq!(clamped.visible_rows, max_rows, "{style} clamped to {max_rows}");
                }
            }
        }
    }
}
