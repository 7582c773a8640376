//! End-to-end rendering scenarios, from fixture source to formatted text

use esprint_core::{
    CommentKind, CommentPlacement, ErrorKind, FormatError, FormatOptions, RawComment, format_tree,
};
use esprint_test::{FixtureError, format_source, parse};
use insta::assert_snapshot;
use text_size::TextRange;

fn format(source: &str) -> String {
    format_source(source, &FormatOptions::default()).unwrap()
}

fn format_with(source: &str, options: FormatOptions) -> String {
    format_source(source, &options).unwrap()
}

fn format_error(source: &str) -> FormatError {
    match format_source(source, &FormatOptions::default()) {
        Err(FixtureError::Format(err)) => err,
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_trailing_comment_with_after_placement() {
    let options = FormatOptions {
        comment_placement: CommentPlacement::After,
        ..Default::default()
    };
    assert_eq!(
        format_with("const x = 10; // keep", options),
        "const x = 10; // keep\n"
    );
}

#[test]
fn test_binary_chain_breaks_after_each_operator() {
    let options = FormatOptions {
        line_width: 10,
        ..Default::default()
    };
    assert_snapshot!(format_with("a + b + c + d;", options), @r"
    a +
      b +
      c +
      d;
    ");
}

#[test]
fn test_empty_block_keeps_sole_comment() {
    assert_snapshot!(format("{ /* todo */ }"), @r"
    {
      /* todo */
    }
    ");
}

#[test]
fn test_five_short_arguments_stay_on_one_line() {
    assert_eq!(format("foo(a,b,  c,d,e)"), "foo(a, b, c, d, e);\n");
}

#[test]
fn test_if_else_chain() {
    assert_snapshot!(format("if (a) { b(); } else if (c) d(); else { e(); }"), @r"
    if (a) {
      b();
    } else if (c)
      d();
    else {
      e();
    }
    ");
}

#[test]
fn test_class_members_keep_one_blank_line() {
    let source = concat!(
        "class A extends B {\n",
        "  constructor(x) { super(x); }\n\n\n\n",
        "  static get y() { return 1; }\n}",
    );
    assert_snapshot!(format(source), @r"
    class A extends B {
      constructor(x) {
        super(x);
      }

      static get y() {
        return 1;
      }
    }
    ");
}

#[test]
fn test_leading_trailing_and_dangling_comments() {
    let source = concat!(
        "// leading\nconst a = 1; // trailing\n\n",
        "/** doc */\nfunction f() {\n  // inside\n}\n",
    );
    assert_eq!(format(source), source);
}

#[test]
fn test_comment_before_returned_value_keeps_parentheses() {
    let source = "function f() {\n  return (\n    // why\n    a\n  );\n}\n";
    assert_eq!(format(source), source);
}

#[test]
fn test_dangling_comment_in_empty_call() {
    assert_eq!(format("f( /* c */ );"), "f(/* c */);\n");
}

#[test]
fn test_parentheses_are_rederived() {
    assert_eq!(format("(a + b) * c;"), "(a + b) * c;\n");
    assert_eq!(format("a - (b - c);"), "a - (b - c);\n");
    assert_eq!(format("(a - b) - c;"), "a - b - c;\n");
    assert_eq!(format("a ?? (b || c);"), "a ?? (b || c);\n");
    assert_eq!(format("-(-x);"), "-(-x);\n");
    assert_eq!(format("new (a.b())();"), "new (a.b())();\n");
    assert_eq!(format("typeof x === 'string';"), "typeof x === 'string';\n");
}

#[test]
fn test_statement_start_is_disambiguated() {
    assert_eq!(format("({}).x;"), "({}).x;\n");
    assert_eq!(format("(function () {})();"), "(function () {})();\n");
    assert_eq!(format("const f = () => ({ a: 1 });"), "const f = () => ({ a: 1 });\n");
}

#[test]
fn test_last_object_argument_hugs_the_call() {
    let options = FormatOptions {
        line_width: 30,
        ..Default::default()
    };
    assert_snapshot!(format_with("update(id, { name: first, age: second });", options), @r"
    update(id, {
      name: first,
      age: second
    });
    ");
}

#[test]
fn test_long_leading_arguments_break_out_of_the_hug() {
    let options = FormatOptions {
        line_width: 40,
        ..Default::default()
    };
    let source = "foo(someLongArgumentName, anotherLongArgumentName, () => { x(); });";
    assert_snapshot!(format_with(source, options.clone()), @r"
    foo(
      someLongArgumentName,
      anotherLongArgumentName,
      () => {
        x();
      }
    );
    ");

    let source = "foo(someLongArgumentName, anotherLongArgumentName, { a: 1 });";
    assert_snapshot!(format_with(source, options.clone()), @r"
    foo(
      someLongArgumentName,
      anotherLongArgumentName, { a: 1 }
    );
    ");

    assert_snapshot!(format_with("foo(a, () => { x(); });", options), @r"
    foo(a, () => {
      x();
    });
    ");
}

#[test]
fn test_comment_after_consequent_block_moves_else_down() {
    let source = "if (a) {\n  b();\n} // after\nelse {\n  c();\n}\n";
    assert_eq!(format(source), source);
}

#[test]
fn test_comment_in_empty_parameter_list() {
    assert_eq!(format("function f(/* none */) {}"), "function f(/* none */) {}\n");
    assert_eq!(format("const g = (/* none */) => 1;"), "const g = (/* none */) => 1;\n");
    assert_snapshot!(format("class A {\n  m(/* none */) {}\n}"), @r"
    class A {
      m(/* none */) {}
    }
    ");
}

#[test]
fn test_source_expanded_object_stays_expanded() {
    assert_snapshot!(format("x = {\n  a: 1, b: 2 };"), @r"
    x = {
      a: 1,
      b: 2
    };
    ");
    assert_eq!(format("x = { a: 1, b: 2 };"), "x = { a: 1, b: 2 };\n");
}

#[test]
fn test_comment_style_conversion() {
    let options = FormatOptions {
        comment_style: Some(esprint_core::CommentStyle::Block),
        ..Default::default()
    };
    assert_eq!(
        format_with("// hello\nx; // there", options),
        "/* hello */\nx; /* there */\n"
    );
}

#[test]
fn test_unsupported_production_is_reported() {
    let err = format_error("x++;");
    assert_eq!(err.kind(), ErrorKind::UnsupportedNode);
    assert!(matches!(
        err,
        FormatError::UnsupportedNode { ref production, .. } if production == "UpdateExpression"
    ));
}

#[test]
fn test_multiline_literal_is_unsupported() {
    let err = format_error("x = 'a\\\nb';");
    assert!(matches!(
        err,
        FormatError::UnsupportedNode { ref production, .. } if production == "MultilineLiteral"
    ));
}

#[test]
fn test_comment_beyond_source_is_malformed() {
    let source = "a;";
    let (tree, _) = parse(source).unwrap();
    let comments = [RawComment::new(
        TextRange::new(1.into(), 9.into()),
        CommentKind::Block,
    )];
    let err = format_tree(&tree, &comments, source, &FormatOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_tabs_indentation() {
    let options = FormatOptions {
        indent_style: esprint_core::IndentStyle::Tabs,
        ..Default::default()
    };
    assert_eq!(
        format_with("function f() { return 1; }", options),
        "function f() {\n\treturn 1;\n}\n"
    );
}

#[test]
fn test_short_bodies_stay_inline_without_forced_breaks() {
    let options = FormatOptions {
        force_break_statements: false,
        ..Default::default()
    };
    assert_eq!(
        format_with("if (a) b(); if (c) { d(); }", options),
        "if (a) b();\nif (c) { d(); }\n"
    );
}
