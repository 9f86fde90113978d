use std::path::PathBuf;

use serde_json::Value;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn value_at<'a>(value: &'a Value, pointer: &str) -> &'a Value {
    value.pointer(pointer).unwrap_or(&Value::Null)
}

#[macro_export]
macro_rules! assert_value {
    ($value:expr=> $( $pointer:literal = $expected:expr, $error:literal)* ) => {{
        $(
            let actual = $crate::common::value_at(&$value, $pointer);
            assert!(
                actual == &$expected,
                "{}: {} expected to be: {:?} but was: {:?}",
                $error, $pointer, $expected, actual
            );
        )*
    }};
}
