//! Canned configuration documents.
//!
//! The three valid documents describe the same configuration, so tests
//! written against one format carry over to the others unchanged.

/// A well-formed JSON document exercising scalars, mixed-case keys,
/// nested objects and arrays.
pub const VALID_JSON: &str = r#"{
  "test": "123",
  "test_number": 1,
  "test_bool": true,
  "test_float": 12.34,
  "MixedCase": true,
  "test_object": {
    "nested_string": "abcd",
    "nested_int": 987,
    "MixedCase": true
  },
  "double_nested": {
    "nested_object": {
      "test_inner": "foo"
    }
  },
  "test_array": [
    { "id": 1 },
    { "id": "2" },
    { "id": 3 }
  ]
}
"#;

/// [`VALID_JSON`] expressed as TOML.
pub const VALID_TOML: &str = r#"test = "123"
test_number = 1
test_bool = true
test_float = 12.34
MixedCase = true

[test_object]
nested_string = "abcd"
nested_int = 987
MixedCase = true

[double_nested.nested_object]
test_inner = "foo"

[[test_array]]
id = 1

[[test_array]]
id = "2"

[[test_array]]
id = 3
"#;

/// [`VALID_JSON`] expressed as YAML.
pub const VALID_YAML: &str = r#"test: "123"
test_number: 1
test_bool: true
test_float: 12.34
MixedCase: true
test_object:
  nested_string: abcd
  nested_int: 987
  MixedCase: true
double_nested:
  nested_object:
    test_inner: foo
test_array:
  - id: 1
  - id: "2"
  - id: 3
"#;

/// A truncated JSON document that fails to parse.
pub const INVALID_JSON: &str = r#"{
  "test": "123",
  "test_object": {
"#;

/// Valid JSON whose top level is not an object.
pub const ARRAY_JSON: &str = "[1, 2, 3]\n";
