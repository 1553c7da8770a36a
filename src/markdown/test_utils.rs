use std::fs;

/// Asserts that clearing `$markup` leaves exactly `$expected`.
#[macro_export]
macro_rules! clear_assert_eq {
    ($markup:expr , $expected:expr) => {
        assert_eq!(
            $crate::markdown::clear(Some(AsRef::<str>::as_ref(&$markup))).as_deref(),
            Some($expected)
        );
    };
}

/// Generates one test per header level, each clearing a header whose
/// title is "Some Text".
#[macro_export]
macro_rules! header_tests {
    ($expected:expr) => {
        seq_macro::seq!(N in 1..=6 {
            #[test]
            fn it_removes_header_level_~N() {
                let markup = format!("{} Some Text", "#".repeat(N));
                clear_assert_eq!(markup, $expected);
            }
        });
    };
}

/// Loads a markup fixture and its expected plain text.
pub fn load_fixture(name: &str) -> (String, String) {
    let markup = read_fixture(&format!("{name}.md"));
    let text = read_fixture(&format!("{name}.txt"));
    (markup, String::from(text.trim_end()))
}

fn read_fixture(file: &str) -> String {
    let path = format!("{}/tests/markdown/{file}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("could not find test file: {path}"))
}
