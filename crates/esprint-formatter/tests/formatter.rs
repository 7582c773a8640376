//! Formatter façade: single units, verbatim fallback and parallel batches

use esprint_formatter::prelude::*;
use esprint_formatter::{ErrorKind, VERSION};
use esprint_test::{parse, sample_program};
use insta::assert_snapshot;

fn unit(source: &str) -> SourceUnit {
    let (tree, comments) = parse(source).unwrap();
    SourceUnit::new(source, tree, comments)
}

#[test]
fn test_format_single_unit() {
    let formatter = Formatter::new(FormatOptions::default()).unwrap();
    let output = formatter
        .format(&unit("function f(a,b){return a+b}"))
        .unwrap();
    assert_snapshot!(output, @r"
    function f(a, b) {
      return a + b;
    }
    ");
}

#[test]
fn test_failure_falls_back_to_source() {
    let formatter = Formatter::new(FormatOptions::default()).unwrap();
    let outcome = formatter.format_or_verbatim(&unit("x++;"));

    assert!(!outcome.is_formatted());
    assert_eq!(outcome.text(), "x++;");
    assert_eq!(
        outcome.error().map(|err| err.kind()),
        Some(ErrorKind::UnsupportedNode)
    );
}

#[test]
fn test_success_is_not_verbatim() {
    let formatter = Formatter::new(FormatOptions::default()).unwrap();
    let outcome = formatter.format_or_verbatim(&unit("a;;"));
    assert_eq!(outcome, FormatOutcome::Formatted("a;\n".to_string()));
}

#[test]
fn test_batch_preserves_order_and_isolates_failures() {
    let formatter = Formatter::new(FormatOptions::default()).unwrap();
    let mut units: Vec<SourceUnit> = (1..=8)
        .map(|n| unit(&sample_program(n)))
        .collect();
    units.insert(3, unit("x++;"));

    let results = formatter.format_batch(&units);
    assert_eq!(results.len(), units.len());

    for (index, (result, unit)) in results.iter().zip(&units).enumerate() {
        if index == 3 {
            assert!(result.is_err());
            continue;
        }
        assert_eq!(result.as_ref().unwrap(), &formatter.format(unit).unwrap());
    }
}

#[test]
fn test_version_is_set() {
    assert!(!VERSION.is_empty());
}
