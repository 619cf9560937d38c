use linsys_attrs::ErrorKind;
use linsys_error::{Error, ErrorKind};

/// A factor that cannot be used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot use `{}` as a factor", factor),
    labels = ["this factor"],
    help = "try a different number",
)]
struct BadFactor {
    factor: String,
}

/// An error with no labels or help.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something went wrong")]
struct Plain;

/// Renders the report of the given error to a string without color codes.
fn render(err: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    err.write_report("input", input, &mut buf).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn report_contains_message_label_and_help() {
    let input = "mul 1 0";
    let err = Error::new(vec![6..7], BadFactor { factor: "0".to_string() });
    let report = render(&err, input);

    assert!(report.contains("cannot use `0` as a factor"));
    assert!(report.contains("this factor"));
    assert!(report.contains("try a different number"));
}

#[test]
fn spanless_error_still_renders() {
    let err = Error::spanless(Plain);
    let report = render(&err, "add 1 2");
    assert!(report.contains("something went wrong"));
}

#[test]
fn downcast_error_kind() {
    let err = Error::spanless(BadFactor { factor: "1/0".to_string() });
    assert!(err.is::<BadFactor>());
    assert!(!err.is::<Plain>());
    assert_eq!(err.downcast_ref::<BadFactor>().unwrap().factor, "1/0");
}

#[test]
fn attach_spans_later() {
    let err = Error::spanless(Plain).or_spans(|| vec![0..3]);
    assert_eq!(err.spans, vec![0..3]);

    // existing spans are kept
    let err = Error::new(vec![4..5], Plain).or_spans(|| vec![0..3]);
    assert_eq!(err.spans, vec![4..5]);
}
