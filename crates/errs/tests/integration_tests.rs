use errs::{
    BadCall, BoxError, Code, DEFAULT_REALM, Error, Kind, Parameter, Realm, ResultExt, StackTrace,
    UNDEFINED_MESSAGE, UserName, ValidationErrors, as_structured, e, kind_is, match_errors,
};

fn structured(err: &BoxError) -> &Error {
    as_structured(&**err).expect("structured error")
}

#[allow(dead_code)]
#[derive(Debug)]
struct Port(u16);

#[test]
fn every_supported_argument_list_yields_a_cause() {
    let cases: Vec<BoxError> = vec![
        e![Kind::IO],
        e![UserName::new("alice")],
        e![Code::new("C")],
        e![Parameter::new("p")],
        e![Realm::new("r")],
        e!["text"],
        e![String::from("owned text")],
        e![std::io::Error::other("io")],
        e![Error::builder().build()],
    ];
    for err in &cases {
        let err = structured(err);
        assert!(!err.cause().to_string().is_empty());
    }
}

#[test]
#[should_panic(expected = "call to errs::e with no arguments")]
fn zero_arguments_panic() {
    let _ = e![];
}

#[test]
fn unsupported_type_is_reported_not_panicked() {
    let _ = tracing_subscriber::fmt::try_init();
    let err = e![Kind::IO, Port(8080)];
    assert!(as_structured(&*err).is_none());
    assert!(err.downcast_ref::<BadCall>().is_some());

    let msg = err.to_string();
    assert!(msg.contains("integration_tests.rs"), "{msg}");
    assert!(msg.contains("Port"), "{msg}");
    assert!(msg.contains("Port(8080)"), "{msg}");
}

#[test]
fn unauthenticated_defaults_realm() {
    let err = e![Kind::Unauthenticated, "who are you"];
    assert_eq!(structured(&err).realm, DEFAULT_REALM);
    assert_eq!(DEFAULT_REALM, "restricted");
}

#[test]
fn wrapping_keeps_outer_kind_and_inner_message() {
    let err = e![Kind::Internal, e!["inner message"]];
    let err = structured(&err);
    assert_eq!(err.kind, Kind::Internal);
    assert_eq!(err.to_string(), "inner message");
}

#[test]
fn double_wrap_code_promotion() {
    let same = e![Code::new("A"), e![Code::new("A"), "msg"]];
    let same = structured(&same);
    assert_eq!(same.code, "A");
    assert!(same.nested().expect("nested").code.is_empty());

    let differ = e![Code::new("A"), e![Code::new("B"), "msg"]];
    let differ = structured(&differ);
    assert_eq!(differ.code, "A");
    assert_eq!(differ.nested().expect("nested").code, "B");
}

#[test]
fn match_ignores_fields_only_on_actual() {
    let expected = e![Kind::NotExist, UserName::new("alice")];
    let actual = e![Kind::NotExist, UserName::new("alice"), Code::new("X")];
    assert!(match_errors(&*expected, &*actual));
}

#[test]
fn match_rejects_kind_mismatch() {
    assert!(!match_errors(&*e![Kind::NotExist], &*e![Kind::Exist]));
}

#[test]
fn kind_is_only_for_structured_errors() {
    assert!(kind_is(Kind::Internal, &*e![Kind::Internal, "boom"]));
    assert!(!kind_is(Kind::Internal, &std::io::Error::other("boom")));
}

#[test]
fn zero_check() {
    assert!(!structured(&e!["just a message"]).is_zero());
    assert!(structured(&e![Kind::Private]).is_zero());
    assert_eq!(e![Kind::Private].to_string(), UNDEFINED_MESSAGE);
}

#[test]
fn validation_aggregate_is_stored_verbatim() {
    let mut v = ValidationErrors::new();
    v.push("email", "invalid format");
    v.push("age", "must be positive");
    let err = e![Kind::Validation, v.clone()];
    let err = structured(&err);
    assert_eq!(err.cause().downcast_ref::<ValidationErrors>(), Some(&v));
    assert!(err.stack_trace().is_none());
}

#[test]
fn source_chain_does_not_repeat_the_message() {
    let err = e![Kind::IO, std::io::Error::other("eof")];
    let err = structured(&err);
    assert_eq!(err.to_string(), "eof");
    assert!(std::error::Error::source(err).is_none());
}

#[cfg(feature = "backtrace-default")]
#[test]
fn verbose_rendering_lists_frames() {
    let err = e!["with stack"];
    let verbose = format!("{err:#}");
    let mut lines = verbose.lines();
    assert_eq!(lines.next(), Some("with stack"));
    let first_frame = lines.next().expect("at least one frame");
    for machinery in ["errs::", "core::", "backtrace::"] {
        assert!(!first_frame.starts_with(machinery), "{verbose}");
    }
    assert!(
        first_frame.contains("verbose_rendering_lists_frames"),
        "{verbose}"
    );
    assert_eq!(err.to_string(), "with stack");
}

#[derive(Debug)]
struct Upstream(backtrace::Backtrace);

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("upstream timed out")
    }
}

impl std::error::Error for Upstream {}

impl StackTrace for Upstream {
    fn stack_trace(&self) -> Option<&backtrace::Backtrace> {
        Some(&self.0)
    }
}

#[test]
fn causes_with_their_own_stack_are_not_wrapped_again() {
    let err = e![Kind::IO, Upstream(backtrace::Backtrace::new_unresolved())];
    let err = structured(&err);
    assert!(err.cause().downcast_ref::<Upstream>().is_some());
    assert!(err.cause().downcast_ref::<errs::Traced>().is_none());
    assert!(err.stack_trace().is_some());
}

#[test]
fn result_ext_layers_structure_onto_errors() {
    fn read_config() -> Result<String, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml"))
    }

    let err = read_config().kind(Kind::NotExist).unwrap_err();
    assert!(kind_is(Kind::NotExist, &err));
    assert_eq!(
        err.find::<std::io::Error>().map(|io| io.kind()),
        Some(std::io::ErrorKind::NotFound)
    );

    let outer = e![Code::new("cfg"), err];
    let outer = structured(&outer);
    assert_eq!(outer.kind, Kind::NotExist);
    assert_eq!(outer.code, "cfg");
}

#[test]
fn errors_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<Error>();

    let err = Error::builder().kind(Kind::Database).message("deadlock").build();
    let handle = std::thread::spawn(move || err.to_string());
    assert_eq!(handle.join().expect("thread"), "deadlock");
}
