use dataviz_report::chart::ChartKind;
use dataviz_report::chart::aggregate::{self, BoxPlot};
use dataviz_report::config::{AggregationConfig, EngineConfig};
use dataviz_report::data::loader::{parse_csv_str, parse_json};
use dataviz_report::data::model::Dataset;
use dataviz_report::report::{Section, build_report};
use dataviz_report::stats::correlation::{Pairing, correlate};
use dataviz_report::stats::inference::ColumnKind;
use dataviz_report::stats::summary::{ColumnSummary, DatasetStatistics, column_statistics};

fn abc() -> Dataset {
    parse_json(r#"[{"a": 1, "b": "x"}, {"a": 2, "b": "x"}, {"a": 3, "b": "y"}]"#).unwrap()
}

fn sales() -> Dataset {
    parse_csv_str(
        "region,product,units,price,note\n\
         North,Laptop,3,1200.5,\n\
         South,Mouse,10,25,promo\n\
         North,Mouse,,24.5,\n\
         East,Monitor,2,310,n/a\n\
         ,Laptop,1,1180,\n\
         West,Dock,4,199.99,\n\
         South,Laptop,2,1210,\n\
         North,Dock,5,205,\n\
         East,Keyboard,8,45,\n\
         West,Headset,6,,\n\
         North,Webcam,3,89,\n\
         South,Tablet,2,640,\n",
    )
    .unwrap()
}

#[test]
fn scenario_numeric_and_categorical_summaries() {
    let ds = abc();
    assert_eq!(ds.columns, vec!["a", "b"]);

    let a = column_statistics(&ds, "a").unwrap();
    assert_eq!(a.profile.kind, ColumnKind::Numeric);
    let n = a.summary.as_numeric().unwrap();
    assert!((n.mean - 2.0).abs() < 1e-10);
    assert!((n.median - 2.0).abs() < 1e-10);
    assert_eq!(n.min, 1.0);
    assert_eq!(n.max, 3.0);
    assert_eq!(n.missing_count, 0);

    let b = column_statistics(&ds, "b").unwrap();
    let c = b.summary.as_categorical().unwrap();
    assert_eq!(c.unique_count, 2);
    assert_eq!(c.most_common_value.as_deref(), Some("x"));
}

#[test]
fn scenario_group_mean() {
    let s = aggregate::mean_by_group(&abc(), "b", "a", &AggregationConfig::default()).unwrap();
    let pairs: Vec<(String, f64)> = s.labels.into_iter().zip(s.values).collect();
    assert_eq!(pairs, vec![("y".to_string(), 3.0), ("x".to_string(), 1.5)]);
}

#[test]
fn scenario_empty_dataset() {
    let ds = parse_json("[]").unwrap();
    assert!(ds.is_empty());

    let stats = DatasetStatistics::compute(&ds, &[]).unwrap();
    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.missing_pct, 0.0);

    let doc = build_report(&ds, &[], &EngineConfig::default()).unwrap();
    assert!(doc.chart_kinds().is_empty());
    assert!(matches!(doc.sections.last(), Some(Section::Narrative { .. })));

    // Header-only CSV: columns exist, every summary is a sentinel.
    let ds = parse_csv_str("a,b\n").unwrap();
    let stats = DatasetStatistics::compute(&ds, &[]).unwrap();
    for col in &stats.columns {
        match &col.summary {
            ColumnSummary::Categorical(c) => {
                assert_eq!(c.unique_count, 0);
                assert!(c.most_common_value.is_none());
            }
            other => panic!("unexpected summary {other:?}"),
        }
    }
    let doc = build_report(&ds, &[], &EngineConfig::default()).unwrap();
    assert!(doc.chart_kinds().is_empty());
}

#[test]
fn column_invariants_hold() {
    let ds = sales();
    let stats = DatasetStatistics::compute(&ds, &[]).unwrap();
    assert_eq!(stats.total_rows, 12);
    for col in &stats.columns {
        assert_eq!(col.profile.present_count() + col.profile.missing_count, 12);
        if let Some(n) = col.summary.as_numeric() {
            assert!(n.min <= n.median && n.median <= n.max);
            assert!(n.min <= n.mean && n.mean <= n.max);
        }
    }
    assert_eq!(stats.numeric_columns(), vec!["units", "price"]);
    assert_eq!(stats.categorical_count(), 3);
}

#[test]
fn correlation_properties() {
    let ds = sales();
    let cols = vec!["units".to_string(), "price".to_string()];
    for pairing in [Pairing::Truncated, Pairing::RowAligned] {
        let m = correlate(&ds, &cols, pairing).unwrap();
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                assert!(m.get(i, j).is_some_and(|r| (-1.0..=1.0).contains(&r)));
            }
        }
        assert!(m.get(m.len(), 0).is_none());
    }
}

#[test]
fn pie_and_histogram_totals() {
    let ds = sales();
    let cfg = AggregationConfig::default();

    let pie = aggregate::category_counts(&ds, "product", &cfg).unwrap();
    assert_eq!(pie.values.iter().sum::<f64>() as usize, ds.len());
    assert!(pie.len() <= cfg.pie_top_n + 1);

    let regions = aggregate::category_counts(&ds, "region", &cfg).unwrap();
    assert!(regions.labels.iter().any(|l| l == "Undefined"));

    let values = ds.numeric_values("price").unwrap();
    let h = aggregate::histogram(&ds, "price", &cfg).unwrap();
    assert_eq!(h.total(), values.len());
    let (lo, hi) = (h.bins[0].min, h.bins[h.bins.len() - 1].max);
    assert!(values.iter().all(|v| (lo..=hi).contains(v)));
}

#[test]
fn boxplot_ordering() {
    let ds = sales();
    for col in ["units", "price"] {
        let b = aggregate::boxplot(&ds, col).unwrap().unwrap();
        assert!(b.min <= b.q1 && b.q1 <= b.median && b.median <= b.q3 && b.q3 <= b.max);
        assert!(b.lower_whisker >= b.min && b.upper_whisker <= b.max);
    }
    assert!(BoxPlot::from_values("empty", &[]).is_none());
}

#[test]
fn report_is_idempotent() {
    let ds = sales();
    let mut config = EngineConfig::default();
    config.report.include_histogram = true;
    config.report.include_scatter = true;

    let first = serde_json::to_string(&build_report(&ds, &[], &config).unwrap()).unwrap();
    let second = serde_json::to_string(&build_report(&ds, &[], &config).unwrap()).unwrap();
    assert_eq!(first, second);

    let doc = build_report(&ds, &[], &config).unwrap();
    assert_eq!(
        doc.chart_kinds(),
        vec![
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Pie,
            ChartKind::Heatmap,
            ChartKind::Boxplot,
            ChartKind::Histogram,
            ChartKind::Scatter,
        ]
    );
}

#[test]
fn selection_limits_report() {
    let ds = sales();
    let doc = build_report(&ds, &["product".to_string()], &EngineConfig::default()).unwrap();
    // No numeric column selected: only the pie chart survives.
    assert_eq!(doc.chart_kinds(), vec![ChartKind::Pie]);
}
