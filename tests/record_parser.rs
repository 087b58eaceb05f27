use gendersdb::parser::{Parser, substitute};
use gendersdb::{Attributes, GendersError, Record};

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn record(name: &str, pairs: &[(&str, &str)]) -> Record {
    Record::new(name.to_string(), attributes(pairs))
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(Record::name).collect()
}

#[test]
fn parses_single_node() {
    let records = Parser::new().parse("node1 attr1,attr2=val2").unwrap();
    assert_eq!(records, vec![record("node1", &[("attr1", ""), ("attr2", "val2")])]);
}

#[test]
fn parses_node_list() {
    let records = Parser::new().parse("node1,node2 attr1,attr2=val2").unwrap();
    assert_eq!(
        records,
        vec![
            record("node1", &[("attr1", ""), ("attr2", "val2")]),
            record("node2", &[("attr1", ""), ("attr2", "val2")]),
        ]
    );
}

#[test]
fn parses_node_without_attributes() {
    let records = Parser::new().parse("node1").unwrap();
    assert_eq!(records, vec![record("node1", &[])]);
}

#[test]
fn ignores_comments_and_blank_lines() {
    let parser = Parser::new();
    assert!(parser.parse("# comment").unwrap().is_empty());
    assert!(parser.parse("                 ").unwrap().is_empty());
    assert!(parser.parse("").unwrap().is_empty());
    let records = parser.parse("node1,node2 attr1,attr2=val2# comment").unwrap();
    assert_eq!(names(&records), vec!["node1", "node2"]);
    assert_eq!(records[1].attribute("attr2"), Some("val2"));
}

#[test]
fn ignores_surrounding_whitespace_and_extra_fields() {
    let records = Parser::new().parse("\t node1   attr1 trailing junk  ").unwrap();
    assert_eq!(records, vec![record("node1", &[("attr1", "")])]);
}

#[test]
fn expands_range_with_suffix() {
    let records = Parser::new().parse("node[1-3]x attr1,attr2=val2").unwrap();
    assert_eq!(names(&records), vec!["node1x", "node2x", "node3x"]);
    for r in &records {
        assert_eq!(r.attributes(), &attributes(&[("attr1", ""), ("attr2", "val2")]));
    }
}

#[test]
fn expands_single_value_and_list_ranges() {
    let parser = Parser::new();
    assert_eq!(names(&parser.parse("node[1] attr1").unwrap()), vec!["node1"]);
    assert_eq!(
        names(&parser.parse("node[1-2,5,7-8] attr1").unwrap()),
        vec!["node1", "node2", "node5", "node7", "node8"]
    );
}

#[test]
fn commas_inside_ranges_do_not_split_names() {
    let records = Parser::new().parse("a[1,3],b,c[2-3]-ib flag").unwrap();
    assert_eq!(names(&records), vec!["a1", "a3", "b", "c2-ib", "c3-ib"]);
}

#[test]
fn range_discards_leading_zeros() {
    let records = Parser::new().parse("n[01-03]").unwrap();
    assert_eq!(names(&records), vec!["n1", "n2", "n3"]);
}

#[test]
fn reversed_range_expands_to_nothing() {
    assert!(Parser::new().parse("n[5-3] attr").unwrap().is_empty());
}

#[test]
fn non_numeric_range_is_an_error() {
    let err = Parser::new().parse("node[a-3] attr1").unwrap_err();
    match err {
        GendersError::Range { field, range } => {
            assert_eq!(field, "node[a-3]");
            assert_eq!(range, "a-3");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_ranges_are_errors() {
    let parser = Parser::new();
    for line in [
        "n[1-]", "n[]", "n[1-2-3]", "n[1,,2]", "n[-4]", "node[1-3", "a[1,2,b", "node1-3]",
    ] {
        assert!(
            matches!(parser.parse(line), Err(GendersError::Range { .. })),
            "{line} should fail"
        );
    }
}

#[test]
fn unclosed_bracket_is_reported_from_its_opening() {
    let err = Parser::new().parse("a,node[1-3 attr").unwrap_err();
    match err {
        GendersError::Range { field, range } => {
            assert_eq!(field, "a,node[1-3");
            assert_eq!(range, "[1-3");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn stray_closing_bracket_is_an_error() {
    let err = Parser::new().parse("node1,node1-3] attr").unwrap_err();
    match err {
        GendersError::Range { field, range } => {
            assert_eq!(field, "node1-3]");
            assert_eq!(range, "]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn oversized_range_is_an_error() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("n[0-99999999999999]"),
        Err(GendersError::Range { .. })
    ));
    assert!(matches!(
        parser.parse("n[1-600000,1-600000]"),
        Err(GendersError::Range { .. })
    ));
    let records = parser.parse("n[1-1000]").unwrap();
    assert_eq!(records.len(), 1000);
}

#[test]
fn value_keeps_everything_after_first_equals() {
    let records = Parser::new().parse("n1 opts=a=b=c,x=").unwrap();
    assert_eq!(records[0].attribute("opts"), Some("a=b=c"));
    assert_eq!(records[0].attribute("x"), Some(""));
}

#[test]
fn substitutes_node_name_in_values() {
    let records = Parser::new().parse("web[1-2] console=%n-%%t,plain=100%").unwrap();
    assert_eq!(records[0].attribute("console"), Some("web1-%t"));
    assert_eq!(records[1].attribute("console"), Some("web2-%t"));
    assert_eq!(records[1].attribute("plain"), Some("100%"));
}

#[test]
fn substitution_scans_left_to_right() {
    assert_eq!(substitute("%n-%%t", "web1"), "web1-%t");
    assert_eq!(substitute("%%n", "web1"), "%n");
    assert_eq!(substitute("%%%n", "web1"), "%web1");
    assert_eq!(substitute("50%x", "web1"), "50%x");
    assert_eq!(substitute("trailing%", "web1"), "trailing%");
}

#[test]
fn records_do_not_share_attributes() {
    let mut records = Parser::new().parse("n[1-2] a=%n").unwrap();
    let second = records.pop().unwrap();
    let first = records.pop().unwrap();
    assert_eq!(first.attribute("a"), Some("n1"));
    assert_eq!(second.attribute("a"), Some("n2"));
}
