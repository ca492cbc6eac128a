//! Round-trip tests: bind, write, bind again.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xmile_bind::view::{EntityRef, PenStyle, PieInput, Plot, PlotScale};
use xmile_bind::{Numeric, Uid};

const FIXTURE: &str = include_str!("data/pie_input.xml");

fn round_trip(pie: &PieInput) -> PieInput {
    let xml = pie
        .to_xml_string()
        .unwrap_or_else(|e| panic!("Failed to write: {:?}", e));
    PieInput::from_xml_str(&xml).unwrap_or_else(|e| panic!("Failed to re-bind {}: {:?}", xml, e))
}

#[test]
fn test_round_trip_fixture() {
    let pie = PieInput::from_xml_str(FIXTURE).unwrap();
    assert_eq!(round_trip(&pie), pie);
}

#[test]
fn test_plot_order_is_preserved() {
    let mut pie = PieInput::new("right");
    for title in ["A", "B", "C"] {
        pie.plot.push(Plot {
            title: Some(title.to_string()),
            ..Plot::default()
        });
    }
    let back = round_trip(&pie);
    let titles: Vec<_> = back.plot.iter().map(|p| p.title.as_deref()).collect();
    assert_eq!(titles, vec![Some("A"), Some("B"), Some("C")]);
}

#[test]
fn test_written_document_shape() {
    let mut pie = PieInput::new("left");
    pie.transparent = Some(true);
    pie.width = Some(100.0);
    pie.plot.push(Plot {
        index: Some(0),
        entity: vec![EntityRef::new("Stock")],
        ..Plot::default()
    });

    let xml = pie.to_xml_string().unwrap();
    assert!(xml.contains("<isee:pie_input"), "{}", xml);
    assert!(xml.contains("xmlns:isee=\"http://iseesystems.com/XMILE\""));
    assert!(xml.contains("isee:transparent=\"true\""));
    assert!(xml.contains("width=\"100\""));
    assert!(xml.contains("legend_position=\"left\""));
    assert!(xml.contains("<plot index=\"0\">"));
    assert!(xml.contains("<entity name=\"Stock\"/>"));
    // Absent values are not written.
    assert!(!xml.contains("height="));
    assert!(!xml.contains("round_values"));
}

#[test]
fn test_numeric_variant_survives_round_trip() {
    let mut pie = PieInput::new("top");
    pie.x = Some(Numeric::Float(10.0));
    pie.height = Some(Numeric::Integer(10));

    let xml = pie.to_xml_string().unwrap();
    assert!(xml.contains("x=\"10.0\""));
    assert!(xml.contains("height=\"10\""));
    assert_eq!(round_trip(&pie), pie);
}

#[test]
fn test_nan_binds_back_as_nan() {
    let mut pie = PieInput::new("top");
    pie.width = Some(f64::NAN);
    pie.x = Some(Numeric::Float(f64::NAN));

    let xml = pie.to_xml_string().unwrap();
    assert!(xml.contains("width=\"NaN\""));

    let back = PieInput::from_xml_str(&xml).unwrap();
    assert!(back.width.is_some_and(f64::is_nan));
    assert!(matches!(back.x, Some(Numeric::Float(v)) if v.is_nan()));
    // NaN never equals itself, so the records compare unequal.
    assert_ne!(back, pie);
}

#[test]
fn test_text_is_escaped_on_write() {
    let mut pie = PieInput::new("top");
    pie.title = Some("Cost & \"value\" <2024>".to_string());
    assert_eq!(round_trip(&pie), pie);
}

fn text() -> impl Strategy<Value = String> {
    // Printable characters, including spaces and markup characters.
    "\\PC{0,16}"
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn numeric() -> impl Strategy<Value = Numeric> {
    prop_oneof![
        any::<i64>().prop_map(Numeric::Integer),
        finite().prop_map(Numeric::Float),
    ]
}

fn pen_style() -> impl Strategy<Value = PenStyle> {
    prop_oneof![
        Just(PenStyle::Solid),
        Just(PenStyle::Dotted),
        Just(PenStyle::Dashed),
        Just(PenStyle::DotDashed),
    ]
}

fn plot() -> impl Strategy<Value = Plot> {
    (
        (
            proptest::option::of(any::<u32>()),
            proptest::option::of(finite()),
            proptest::option::of(pen_style()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(text()),
        ),
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<u32>()),
            proptest::option::of(text()),
            proptest::collection::vec(text().prop_map(EntityRef::new), 0..3),
            proptest::option::of((finite(), finite()).prop_map(|(min, max)| PlotScale { min, max })),
        ),
    )
        .prop_map(
            |(
                (index, pen_width, pen_style, show_y_axis, title),
                (right_axis, precision, color, entity, scale),
            )| Plot {
                index,
                pen_width,
                pen_style,
                show_y_axis,
                title,
                right_axis,
                precision,
                color,
                entity,
                scale,
            },
        )
}

fn pie_input() -> impl Strategy<Value = PieInput> {
    (
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(finite()),
            proptest::option::of(finite()),
            proptest::option::of(numeric()),
            proptest::option::of(numeric()),
            proptest::option::of(any::<i32>()),
            proptest::option::of(any::<i32>()),
        ),
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(text()),
            proptest::option::of(text()),
            proptest::option::of(text()),
            proptest::option::of(text()),
            proptest::option::of(text()),
            text(),
        ),
        proptest::collection::vec(plot(), 0..4),
    )
        .prop_map(
            |(
                (round_values, width, y, x, height, uid, z_index),
                (transparent, label_pie_slices, title, color, background, font_family, font_size, legend),
                plot,
            )| {
                let mut pie = PieInput::new(legend);
                pie.round_values = round_values;
                pie.width = width;
                pie.y = y;
                pie.x = x;
                pie.height = height;
                pie.uid = uid.map(Uid::new);
                pie.z_index = z_index;
                pie.transparent = transparent;
                pie.label_pie_slices = label_pie_slices;
                pie.title = title;
                pie.color = color;
                pie.background = background;
                pie.font_family = font_family;
                pie.font_size = font_size;
                pie.plot = plot;
                pie
            },
        )
}

proptest! {
    #[test]
    fn prop_write_then_bind_is_identity(pie in pie_input()) {
        let xml = pie.to_xml_string().unwrap();
        let back = PieInput::from_xml_str(&xml).unwrap();
        prop_assert_eq!(back, pie);
    }
}
