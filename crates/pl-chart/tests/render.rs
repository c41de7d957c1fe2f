use pl_chart::{ChartError, ChartSeries, LineChart, colors};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pl-chart-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn save_writes_png_into_new_directory() {
    let x: Vec<f64> = (0..=300).map(|i| i as f64 * 100.0).collect();
    let egl: Vec<f64> = x.iter().map(|d| 400.0 - d * 0.01).collect();
    let hgl: Vec<f64> = egl.iter().map(|e| e - 0.5).collect();

    let dir = scratch_dir("save");
    let path = dir.join("nested").join("0.9_0.png");
    let chart = LineChart::default();
    chart
        .save(
            &path,
            &x,
            &[
                ChartSeries {
                    label: "EGL",
                    values: &egl,
                    color: colors::BLUE,
                },
                ChartSeries {
                    label: "HGL",
                    values: &hgl,
                    color: colors::GREEN,
                },
            ],
        )
        .unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (800, 600));
    assert!(img.pixels().any(|p| *p == colors::BLUE));
    assert!(img.pixels().any(|p| *p == colors::GREEN));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn gaps_in_data_are_skipped() {
    let x = vec![0.0, 1.0, 2.0, 3.0];
    let y = vec![1.0, f64::NAN, 3.0, 4.0];
    let img = LineChart::default()
        .render(
            &x,
            &[ChartSeries {
                label: "EGL",
                values: &y,
                color: colors::BLUE,
            }],
        )
        .unwrap();
    assert!(img.pixels().any(|p| *p == colors::BLUE));
}

#[test]
fn all_nan_series_is_empty() {
    let x = vec![0.0, 1.0];
    let y = vec![f64::NAN, f64::NAN];
    let err = LineChart::default()
        .render(
            &x,
            &[ChartSeries {
                label: "EGL",
                values: &y,
                color: colors::BLUE,
            }],
        )
        .unwrap_err();
    assert!(matches!(err, ChartError::EmptyData { .. }));
}
