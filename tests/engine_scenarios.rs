use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use egui::Color32;
use groupchart::data::series::SeriesData;
use groupchart::{
    channel, Bar, ChartError, ChartRecord, DataObject, Group, GroupChart, GroupEvent, GroupUpdate,
    RecordKind, TimeSeriesItem,
};
use std::sync::Arc;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap()
}

fn minute(n: i64) -> DateTime<Utc> {
    t0() + TimeDelta::minutes(n)
}

fn bar(at: DateTime<Utc>, close: f64) -> DataObject {
    DataObject::Bar(Bar {
        datetime: at,
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10.0,
    })
}

fn point(at: DateTime<Utc>, value: f64) -> DataObject {
    DataObject::TimeSeriesItem(TimeSeriesItem { datetime: at, value })
}

fn event(group: &Arc<Group>, obj: DataObject) -> ChartRecord {
    ChartRecord::Event(GroupEvent::new(group.clone(), obj))
}

#[test]
fn later_registered_group_drawn_first_is_kept_after_earlier_one() {
    let mut chart = GroupChart::default();
    let g1 = Arc::new(Group::new(1, "first").with_pad(0));
    let g2 = Arc::new(Group::new(2, "second").with_pad(0));

    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g1).clone()),
            ChartRecord::NewGroup((*g2).clone()),
            event(&g2, bar(minute(0), 10.0)),
            event(&g1, bar(minute(0), 20.0)),
        ])
        .unwrap();

    let h1 = chart.binding(1, RecordKind::Bar).unwrap().series;
    let h2 = chart.binding(2, RecordKind::Bar).unwrap().series;
    assert_eq!(chart.chart().pad(0).unwrap().series(), &[h1, h2]);
    assert_eq!(chart.drawn_order("", 0), Some(&[1, 2][..]));
}

#[test]
fn events_go_through_the_sink_and_queue() {
    let (sink, queue) = channel();
    let mut chart = GroupChart::default();

    let g = sink
        .register_group(Group::new(7, "via sink").with_pad(1))
        .unwrap()
        .unwrap();
    sink.send_events(&g, (0..3).map(|i| point(minute(i), i as f64)))
        .unwrap();

    let summary = chart.dispatch(&queue).unwrap().unwrap();
    assert_eq!(summary.drained, 4);
    assert_eq!(summary.registered, 1);
    assert_eq!(summary.processed, 3);

    assert_eq!(chart.chart().pad_count(), 2);
    let h = chart.binding(7, RecordKind::TimeSeries).unwrap().series;
    assert_eq!(chart.chart().series(h).unwrap().len(), 3);
    assert_eq!(chart.chart().pad_of(h), Some(1));
    assert!(chart.dispatch(&queue).unwrap().is_none());
}

#[test]
fn group_without_pad_is_rejected() {
    let mut chart = GroupChart::default();
    assert!(!chart.on_new_group(Group::new(3, "padless")));
    assert_eq!(chart.group_count(), 0);
}

#[test]
fn event_for_unregistered_group_is_skipped_and_batch_continues() {
    let mut chart = GroupChart::default();
    let known = Arc::new(Group::new(1, "known").with_pad(0));
    let stranger = Arc::new(Group::new(9, "stranger").with_pad(0));
    let late = Arc::new(Group::new(2, "late").with_pad(1));

    let err = chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*known).clone()),
            event(&known, bar(minute(0), 1.0)),
            event(&stranger, bar(minute(0), 2.0)),
            ChartRecord::NewGroup((*late).clone()),
            event(&late, bar(minute(1), 3.0)),
            ChartRecord::Update(GroupUpdate::color(1, Color32::RED)),
        ])
        .unwrap_err();
    assert!(matches!(err, ChartError::UnregisteredGroup(9)));

    assert!(chart.binding(1, RecordKind::Bar).is_some());
    assert!(chart.group(2).is_some());
    assert!(chart.binding(2, RecordKind::Bar).is_some());
    assert_eq!(chart.group(1).unwrap().color, Some(Color32::RED));
    assert_eq!(chart.replay_buffer().len(""), 2);

    // The live view matches a rebuild from the recorded history.
    let live = chart.chart().series_count();
    chart.select("").unwrap();
    assert_eq!(chart.chart().series_count(), live);

    let summary = chart
        .dispatch_records(vec![event(&late, bar(minute(2), 4.0))])
        .unwrap();
    assert_eq!(summary.processed, 1);
}

#[test]
fn update_for_unknown_group_in_a_batch_keeps_later_records() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "g").with_pad(0));

    let err = chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            ChartRecord::Update(GroupUpdate::pad(42, 1)),
            event(&g, point(minute(0), 1.0)),
        ])
        .unwrap_err();
    assert!(matches!(err, ChartError::UnregisteredGroup(42)));
    let h = chart.binding(1, RecordKind::TimeSeries).unwrap().series;
    assert_eq!(chart.chart().series(h).unwrap().len(), 1);
}

#[test]
fn hidden_selector_history_is_replayed_on_switch() {
    let mut chart = GroupChart::default();
    let plain = Arc::new(Group::new(1, "plain").with_pad(0).with_selector_key(""));
    let keyed = Arc::new(Group::new(2, "keyed").with_pad(0).with_selector_key("x"));

    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*plain).clone()),
            ChartRecord::NewGroup((*keyed).clone()),
            event(&keyed, bar(minute(0), 5.0)),
            event(&keyed, bar(minute(1), 6.0)),
        ])
        .unwrap();

    assert_eq!(chart.active_selector(), Some(""));
    assert_eq!(chart.selector_choices(), &["".to_string(), "x".to_string()]);
    assert_eq!(chart.chart().series_count(), 0);
    assert_eq!(chart.replay_buffer().len("x"), 2);

    chart.select("x").unwrap();

    let pad = chart.chart().pad(0).unwrap();
    assert_eq!(pad.series().len(), 1);
    let series = chart.chart().series(pad.series()[0]).unwrap();
    assert_eq!(series.kind, RecordKind::Bar);
    assert_eq!(series.len(), 2);
}

#[test]
fn switching_back_rebuilds_the_same_view() {
    let mut chart = GroupChart::default();
    let a = Arc::new(Group::new(1, "a").with_pad(0).with_selector_key("x"));
    let b = Arc::new(Group::new(2, "b").with_pad(1).with_selector_key("x"));
    let other = Arc::new(Group::new(3, "c").with_pad(0).with_selector_key("y"));

    let mut records = vec![
        ChartRecord::NewGroup((*a).clone()),
        ChartRecord::NewGroup((*b).clone()),
        ChartRecord::NewGroup((*other).clone()),
    ];
    for i in 0..5 {
        records.push(event(&b, point(minute(i), i as f64)));
        records.push(event(&a, bar(minute(i), 10.0 + i as f64)));
        records.push(event(&other, bar(minute(i), 1.0)));
    }
    chart.dispatch_records(records).unwrap();
    assert_eq!(chart.active_selector(), Some("x"));

    let snapshot = |chart: &GroupChart| -> Vec<Vec<(String, usize)>> {
        chart
            .chart()
            .pads()
            .iter()
            .map(|pad| {
                pad.series()
                    .iter()
                    .map(|h| {
                        let s = chart.chart().series(*h).unwrap();
                        (s.name.clone(), s.len())
                    })
                    .collect()
            })
            .collect()
    };
    let live = snapshot(&chart);
    let live_range = chart.chart().visible_range();

    chart.select("y").unwrap();
    assert_eq!(chart.chart().pad(0).unwrap().series().len(), 1);
    chart.select("x").unwrap();

    assert_eq!(snapshot(&chart), live);
    assert_eq!(chart.chart().visible_range(), live_range);
}

#[test]
fn pad_update_moves_series_and_legend() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "mover").with_pad(0));
    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            event(&g, point(minute(0), 1.0)),
        ])
        .unwrap();
    assert_eq!(chart.chart().pad_count(), 1);
    chart
        .dispatch_records(vec![ChartRecord::Update(
            GroupUpdate::pad(1, 2).with_label_format("F4"),
        )])
        .unwrap();

    let h = chart.binding(1, RecordKind::TimeSeries).unwrap().series;
    let c = chart.chart();
    assert_eq!(c.pad_count(), 3);
    assert_eq!(c.pad_of(h), Some(2));
    assert!(c.pad(0).unwrap().series().is_empty());
    assert!(c.pad(0).unwrap().legend_entries().is_empty());
    assert_eq!(c.pad(2).unwrap().legend_entries()[0].label, "mover");
    assert_eq!(c.pad(2).unwrap().axis_left.label_format, "F4");
    assert_eq!(chart.group(1).unwrap().pad, 2);
    assert_eq!(chart.panel_order(2), Some(&[1][..]));
    assert!(chart.panel_order(0).map_or(true, |o| o.is_empty()));
}

#[test]
fn pad_update_to_current_pad_keeps_rank() {
    let mut chart = GroupChart::default();
    let g1 = Arc::new(Group::new(1, "first").with_pad(0));
    let g2 = Arc::new(Group::new(2, "second").with_pad(0));
    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g1).clone()),
            ChartRecord::NewGroup((*g2).clone()),
            event(&g1, bar(minute(0), 10.0)),
            event(&g2, bar(minute(0), 20.0)),
        ])
        .unwrap();
    chart
        .dispatch_records(vec![ChartRecord::Update(
            GroupUpdate::pad(1, 0).with_label_format("F4"),
        )])
        .unwrap();

    let h1 = chart.binding(1, RecordKind::Bar).unwrap().series;
    let h2 = chart.binding(2, RecordKind::Bar).unwrap().series;
    let pad = chart.chart().pad(0).unwrap();
    assert_eq!(pad.series(), &[h1, h2]);
    assert_eq!(pad.axis_left.label_format, "F4");
    assert_eq!(chart.panel_order(0), Some(&[1, 2][..]));
    assert_eq!(chart.drawn_groups("", 0), vec![1, 2]);
    assert_eq!(chart.group(1).unwrap().format, "F4");
}

#[test]
fn color_update_recolors_line_and_legend() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "line").with_pad(0));
    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            event(&g, point(minute(0), 1.0)),
        ])
        .unwrap();
    chart
        .dispatch_records(vec![ChartRecord::Update(GroupUpdate::color(1, Color32::RED))])
        .unwrap();

    let h = chart.binding(1, RecordKind::TimeSeries).unwrap().series;
    assert_eq!(chart.chart().series(h).unwrap().look.color, Color32::RED);
    assert_eq!(
        chart.chart().pad(0).unwrap().legend_entries()[0].color,
        Color32::RED
    );
    assert_eq!(chart.group(1).unwrap().color, Some(Color32::RED));
}

#[test]
fn update_for_unknown_group_is_an_error() {
    let mut chart = GroupChart::default();
    let err = chart.apply_update(&GroupUpdate::pad(42, 1)).unwrap_err();
    assert!(matches!(err, ChartError::UnregisteredGroup(42)));
}

#[test]
fn unknown_payload_binds_nothing_but_moves_the_window() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "odd").with_pad(0));
    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            event(
                &g,
                DataObject::Other {
                    type_id: 250,
                    datetime: minute(3),
                },
            ),
        ])
        .unwrap();

    assert_eq!(chart.chart().series_count(), 0);
    assert!(chart.group(1).unwrap().bindings().next().is_none());
    assert!(chart.chart().visible_range().is_some());
}

#[test]
fn stream_clear_restarts_window_from_next_event() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "bars").with_pad(0));
    let t = minute(120);

    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            event(&g, bar(minute(0), 1.0)),
            event(&g, bar(minute(1), 1.0)),
        ])
        .unwrap();
    assert_eq!(chart.chart().visible_range(), Some((minute(0), minute(1))));

    let summary = chart
        .dispatch_records(vec![
            event(&g, bar(minute(2), 1.0)),
            ChartRecord::StreamCleared,
            ChartRecord::NewGroup((*g).clone()),
            event(&g, bar(t, 1.0)),
        ])
        .unwrap();
    assert!(summary.cleared);
    assert_eq!(summary.processed, 1);

    assert_eq!(chart.chart().visible_range(), Some((t - TimeDelta::seconds(30 * 60), t)));
    let h = chart.binding(1, RecordKind::Bar).unwrap().series;
    match &chart.chart().series(h).unwrap().data {
        SeriesData::Bars(bars) => assert_eq!(bars.len(), 1),
        other => panic!("unexpected series data {other:?}"),
    }
}

#[test]
fn only_last_event_of_a_batch_moves_the_window() {
    let mut chart = GroupChart::default();
    let g = Arc::new(Group::new(1, "bars").with_pad(0));
    chart
        .dispatch_records(vec![
            ChartRecord::NewGroup((*g).clone()),
            event(&g, bar(minute(0), 1.0)),
            event(&g, bar(minute(5), 1.0)),
            event(&g, bar(minute(9), 1.0)),
        ])
        .unwrap();
    assert_eq!(chart.window().anchor(), Some(minute(0)));
    assert_eq!(chart.chart().visible_range(), Some((minute(0), minute(9))));

    chart.reanchor_window();
    chart
        .dispatch_records(vec![event(&g, bar(minute(10), 1.0))])
        .unwrap();
    assert_eq!(
        chart.chart().visible_range(),
        Some((minute(10) - TimeDelta::minutes(30), minute(10)))
    );
}
