//! Purpose: Lock end-to-end decoder behavior against a realistic record type.
//! Exports: Integration tests only (no runtime exports).
//! Role: Exercise field/optional/one_of composition the way a caller would.
//! Invariants: The nested line/point decode and its error paths stay stable.
//! Invariants: Optional absorbs only missing fields, never malformed ones.

use glean_json::decode::{self, Decoder};
use glean_json::encode::{self, Object};
use glean_json::{StringifyMode, Value};

#[derive(Clone, Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Line {
    start: Point,
    end: Point,
    thickness: Option<i64>,
}

fn point_decoder() -> Decoder<Point> {
    decode::field("x", decode::float()).and_then(|x| {
        decode::field("y", decode::float()).map(move |y| Point { x, y })
    })
}

fn line_decoder() -> Decoder<Line> {
    decode::field("start", point_decoder()).and_then(|start| {
        decode::field("end", point_decoder()).and_then(move |end| {
            let start = start.clone();
            decode::optional(decode::field("thickness", decode::integer())).map(move |thickness| {
                Line {
                    start: start.clone(),
                    end: end.clone(),
                    thickness,
                }
            })
        })
    })
}

fn encode_point(point: &Point) -> Value {
    Object::new()
        .field("x", encode::float(point.x))
        .field("y", encode::float(point.y))
        .build()
}

fn encode_line(line: &Line) -> Value {
    Object::new()
        .field("start", encode_point(&line.start))
        .field("end", encode_point(&line.end))
        .field_opt("thickness", line.thickness.map(encode::integer))
        .build()
}

const LINE_TEXT: &str = r#" {
  "start": { "x": 1.1, "y": -0.4 },
  "end":   { "x": 5.3, "y": 3.8 }
} "#;

#[test]
fn nested_line_decodes_with_absent_thickness() {
    let line = line_decoder().run_str(LINE_TEXT).expect("line decodes");
    assert_eq!(
        line,
        Line {
            start: Point { x: 1.1, y: -0.4 },
            end: Point { x: 5.3, y: 3.8 },
            thickness: None,
        }
    );
}

#[test]
fn present_thickness_decodes_to_some() {
    let line = line_decoder()
        .run_str(r#"{"start":{"x":0,"y":0},"end":{"x":1,"y":1},"thickness":2}"#)
        .expect("line decodes");
    assert_eq!(line.thickness, Some(2));
}

#[test]
fn malformed_thickness_fails_at_its_path() {
    let err = line_decoder()
        .run_str(r#"{"start":{"x":0,"y":0},"end":{"x":1,"y":1},"thickness":"x"}"#)
        .expect_err("present but malformed");
    assert_eq!(err.path().to_string(), ".thickness");
}

#[test]
fn missing_point_field_names_the_deep_path() {
    let report = line_decoder()
        .run_report(&glean_json::parse(r#"{"start":{"x":1.1},"end":{"x":5.3,"y":3.8}}"#).unwrap())
        .expect_err("start.y missing");
    assert_eq!(report, "missing field 'y' at .start");
}

#[test]
fn line_round_trips_through_encode_and_decode() {
    let lines = [
        Line {
            start: Point { x: 1.1, y: -0.4 },
            end: Point { x: 5.3, y: 3.8 },
            thickness: None,
        },
        Line {
            start: Point { x: 0.0, y: 0.0 },
            end: Point { x: -2.5, y: 7.0 },
            thickness: Some(3),
        },
    ];
    for line in lines {
        let encoded = encode_line(&line);
        assert_eq!(line_decoder().run(&encoded), Ok(line.clone()));
        // Omitted thickness stays omitted in the rendered text.
        let text = glean_json::stringify(&encoded, StringifyMode::Compact);
        assert_eq!(text.contains("thickness"), line.thickness.is_some());
    }
}

#[test]
fn one_of_failure_reports_every_alternative() {
    let id_or_name = decode::one_of([
        decode::field("id", decode::integer()).map(|id| id.to_string()),
        decode::field("name", decode::string()),
    ]);
    let err = id_or_name
        .run_str(r#"{"tag": true}"#)
        .expect_err("neither branch matches");
    let text = err.to_string();
    assert!(text.contains("no decoder matched"));
    assert!(text.contains("missing field 'id'"));
    assert!(text.contains("missing field 'name'"));
}

#[test]
fn array_of_lines_fails_fast_on_the_first_bad_element() {
    let err = decode::array(line_decoder())
        .run_str(r#"[{"start":{"x":0,"y":0},"end":{"x":1,"y":1}}, 42]"#)
        .expect_err("second element wrong");
    assert_eq!(err.path().to_string(), "[1]");
}
