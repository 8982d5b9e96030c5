use groupchart::chart::pad::AxisType;
use groupchart::chart::{Chart, PanelAllocator};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn ensure_grows_stack_and_shrinks_existing_pads() {
    let mut chart = Chart::new();
    let alloc = PanelAllocator::default();
    alloc.ensure(&mut chart, 2, "F5");

    assert_eq!(chart.pad_count(), 3);
    let heights: Vec<f64> = chart.pads().iter().map(|p| p.canvas_height()).collect();
    assert_close(heights[0], 0.7225);
    assert_close(heights[1], 0.1275);
    assert_close(heights[2], 0.15);

    let pads = chart.pads();
    assert_close(pads[0].canvas_y1, 0.0);
    assert_close(pads[1].canvas_y1, pads[0].canvas_y2);
    assert_close(pads[2].canvas_y1, pads[1].canvas_y2);
    assert_close(pads[2].canvas_y2, 1.0);
}

#[test]
fn new_pad_takes_first_pad_look() {
    let mut chart = Chart::new();
    PanelAllocator::default().ensure(&mut chart, 2, "F5");

    let first = &chart.pads()[0];
    let last = &chart.pads()[2];
    assert_eq!(last.back_color, first.back_color);
    assert_eq!(last.legend, first.legend);
    assert_eq!(last.margins.left, first.margins.left);
    assert_eq!(last.margins.right, first.margins.right);
    assert_eq!(last.axis_left.grid_dash, first.axis_left.grid_dash);
    assert_eq!(last.axis_bottom.label_format, first.axis_bottom.label_format);
    assert_eq!(last.axis_bottom.axis_type, AxisType::DateTime);
    assert_eq!(last.renderers(), first.renderers());

    assert_eq!(last.axis_left.label_format, "F5");
    assert_eq!(last.axis_right.label_format, "F5");
    assert_eq!(last.margins.bottom, 0.0);
}

#[test]
fn ensure_is_idempotent() {
    let mut chart = Chart::new();
    let alloc = PanelAllocator::default();
    alloc.ensure(&mut chart, 1, "F2");
    let before = chart.pads().to_vec();

    alloc.ensure(&mut chart, 1, "F2");
    alloc.ensure(&mut chart, 0, "F2");
    assert_eq!(chart.pads().len(), 2);
    assert_eq!(chart.pads()[1], before[1]);
    assert_eq!(chart.pads()[0].canvas_height(), before[0].canvas_height());
}

#[test]
fn custom_fraction_is_used() {
    let mut chart = Chart::new();
    PanelAllocator::new(0.25).ensure(&mut chart, 1, "F2");
    assert_close(chart.pads()[0].canvas_height(), 0.75);
    assert_close(chart.pads()[1].canvas_height(), 0.25);
}
