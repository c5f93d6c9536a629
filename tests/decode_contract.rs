//! Purpose: Lock the decode contract: accepted bodies and the error kind for each failure.
//! Exports: Integration tests only.
//! Role: Table-driven coverage over the public `api::decode` / `api::read_json` surface.
//! Invariants: Each failing body maps to exactly one stable `ErrorKind`.
//! Invariants: Size ceiling is inclusive; one byte over is a size error, never syntax.

use jsonkit::api::{Config, ErrorKind, decode, read_json};
use serde::Deserialize;
use std::io::{self, Read};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Foo {
    #[serde(default)]
    foo: String,
}

struct Case {
    name: &'static str,
    json: &'static str,
    max_size: usize,
    allow_unknown: bool,
    expected: Option<ErrorKind>,
}

const CASES: &[Case] = &[
    Case {
        name: "good json",
        json: r#"{"foo": "bar"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: None,
    },
    Case {
        name: "badly formatted json",
        json: r#"{"foo":"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MalformedSyntax),
    },
    Case {
        name: "incorrect type",
        json: r#"{"foo": 1}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::TypeMismatch),
    },
    Case {
        name: "non-string key",
        json: r#"{1: 1}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MalformedSyntax),
    },
    Case {
        name: "two json values",
        json: r#"{"foo": "bar"}{"alpha": "beta"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MultipleValues),
    },
    Case {
        name: "empty body",
        json: "",
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::EmptyBody),
    },
    Case {
        name: "syntax error in json",
        json: r#"{"foo": 1"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MalformedSyntax),
    },
    Case {
        name: "unknown field in json",
        json: r#"{"fooo": "bar"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::UnknownField),
    },
    Case {
        name: "allow unknown field in json",
        json: r#"{"fooo": "bar"}"#,
        max_size: 1024,
        allow_unknown: true,
        expected: None,
    },
    Case {
        name: "missing field name",
        json: r#"{jack: "bar"}"#,
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MalformedSyntax),
    },
    Case {
        name: "file too large",
        json: r#"{"foo": "bar"}"#,
        max_size: 5,
        allow_unknown: false,
        expected: Some(ErrorKind::SizeExceeded),
    },
    Case {
        name: "not json",
        json: "Hello, world",
        max_size: 1024,
        allow_unknown: false,
        expected: Some(ErrorKind::MalformedSyntax),
    },
];

#[test]
fn decode_cases_match_expected_kinds() {
    for case in CASES {
        let config = Config::new()
            .with_max_json_size(case.max_size)
            .with_allow_unknown_fields(case.allow_unknown);
        let mut target = Foo::default();
        let result = read_json(&config, case.json.as_bytes(), &mut target);
        match (case.expected, result) {
            (None, Ok(())) => {}
            (Some(kind), Err(err)) => assert_eq!(err.kind(), kind, "case {}: {err}", case.name),
            (None, Err(err)) => panic!("case {}: error not expected, got {err}", case.name),
            (Some(kind), Ok(())) => panic!("case {}: expected {kind:?}, decoded {target:?}", case.name),
        }
    }
}

#[test]
fn literal_scenarios() {
    let config = Config::default();

    let mut target = Foo::default();
    read_json(&config, &br#"{"foo": "bar"}"#[..], &mut target).expect("good json");
    assert_eq!(target.foo, "bar");

    let err = decode::<Foo, _>(&config, &br#"{"foo": "bar"}{"alpha":"beta"}"#[..])
        .expect_err("two values");
    assert_eq!(err.to_string(), "body must only contain a single JSON value");

    let err = decode::<Foo, _>(&config, &br#"{"fooo":"bar"}"#[..]).expect_err("unknown");
    assert_eq!(err.kind(), ErrorKind::UnknownField);
    assert_eq!(err.field(), Some("fooo"));
    assert_eq!(err.to_string(), r#"body contains unknown key "fooo""#);

    let lenient = Config::new().with_allow_unknown_fields(true);
    let mut target = Foo::default();
    read_json(&lenient, &br#"{"fooo":"bar"}"#[..], &mut target).expect("lenient");
    assert_eq!(target.foo, "");
}

#[test]
fn empty_body_is_never_malformed() {
    let err = decode::<Foo, _>(&Config::default(), io::empty()).expect_err("empty");
    assert_eq!(err.kind(), ErrorKind::EmptyBody);
    assert_eq!(err.to_string(), "body must not be empty");
}

#[test]
fn size_ceiling_is_inclusive() {
    let body = br#"{"foo": "bar"}"#;
    let exact = Config::new().with_max_json_size(body.len());
    let value: Foo = decode(&exact, &body[..]).expect("exactly at ceiling");
    assert_eq!(value.foo, "bar");

    let under = Config::new().with_max_json_size(body.len() - 1);
    let err = decode::<Foo, _>(&under, &body[..]).expect_err("one byte over");
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);
    assert_eq!(err.limit(), Some(body.len() as u64 - 1));
    assert_eq!(
        err.to_string(),
        format!("body must not be larger than {} bytes", body.len() - 1)
    );
}

#[test]
fn size_error_beats_syntax_error() {
    // Truncated at the ceiling this body would look malformed.
    let config = Config::new().with_max_json_size(8);
    let err = decode::<Foo, _>(&config, &br#"{"foo": "barbarbar"}"#[..]).expect_err("too large");
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);
}

#[test]
fn default_ceiling_is_one_mebibyte() {
    let padding = " ".repeat(1024 * 1024);
    let body = format!("{{\"foo\": \"bar\"}}{padding}");
    let err = decode::<Foo, _>(&Config::default(), body.as_bytes()).expect_err("over 1 MiB");
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);
    assert_eq!(err.limit(), Some(1024 * 1024));
}

#[test]
fn reader_is_not_drained_past_ceiling() {
    struct Counting<'a> {
        inner: &'a [u8],
        served: usize,
    }
    impl Read for Counting<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let read = self.inner.read(buf)?;
            self.served += read;
            Ok(read)
        }
    }

    let body = vec![b' '; 4096];
    let mut reader = Counting {
        inner: &body,
        served: 0,
    };
    let config = Config::new().with_max_json_size(16);
    let err = decode::<Foo, _>(&config, &mut reader).expect_err("too large");
    assert_eq!(err.kind(), ErrorKind::SizeExceeded);
    assert_eq!(reader.served, 17);
}

#[test]
fn read_failures_surface_as_other() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"))
        }
    }
    let err = decode::<Foo, _>(&Config::default(), Broken).expect_err("io");
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(err.to_string(), "peer reset");
}

#[test]
fn valid_values_of_any_shape_decode() {
    let config = Config::default();
    let list: Vec<u32> = decode(&config, &b" [1, 2, 3] \n"[..]).expect("array");
    assert_eq!(list, vec![1, 2, 3]);

    let value: serde_json::Value =
        decode(&config, &br#"{"nested": {"k": [true, null]}}"#[..]).expect("value");
    assert_eq!(value["nested"]["k"][0], true);

    let text: String = decode(&config, &br#""hi""#[..]).expect("string");
    assert_eq!(text, "hi");
}
