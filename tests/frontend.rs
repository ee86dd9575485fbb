extern crate include_dir;
extern crate mini;
extern crate rstest;

use include_dir::{include_dir, Dir, File};
use rstest::rstest;

use mini::frontend::{process_code, Error};

static GOOD_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/good");
static BAD_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/bad");

fn mini_files<'a>(dir: &'a Dir<'a>) -> impl Iterator<Item = &'a File<'a>> {
    dir.files().filter(|file| file.path().extension().map_or(false, |ext| ext == "mini"))
}

fn process_bad_file(name: &str) -> Vec<Error> {
    let file = BAD_DIR.get_file(name).unwrap();
    let source_code = file.contents_utf8().unwrap();
    process_code(name, source_code).unwrap_err()
}

#[test]
fn good_examples_processed() {
    let mut failed_cases: Vec<String> = vec![];
    for file in mini_files(&GOOD_DIR) {
        let file_name = file.path().to_str().unwrap();
        match process_code(file_name, file.contents_utf8().unwrap()) {
            Ok(_) => {
                // make sure to run cargo test with --nocapture flag
                println!("Passed {}", file_name);
            }
            Err(errors) => {
                println!("Failed {}: {:?}", file_name, errors);
                failed_cases.push(String::from(file_name));
            }
        }
    }
    assert_eq!(failed_cases.len(), 0usize, "{:?}", failed_cases);
}

#[test]
fn bad_examples_failed() {
    let mut failed_cases: Vec<String> = vec![];
    for file in mini_files(&BAD_DIR) {
        let file_name = file.path().to_str().unwrap();
        if process_code(file_name, file.contents_utf8().unwrap()).is_ok() {
            failed_cases.push(String::from(file_name));
        }
    }
    assert_eq!(
        failed_cases.len(),
        0usize,
        "Following files were incorrectly accepted: {:?}",
        failed_cases
    );
}

#[rstest]
#[case("undeclared.mini", 1, false)]
#[case("redeclared.mini", 1, false)]
#[case("condition.mini", 1, false)]
#[case("while_condition.mini", 1, false)]
#[case("assignment.mini", 1, false)]
#[case("bitwise_double.mini", 1, false)]
#[case("many_errors.mini", 4, false)]
#[case("missing_semicolon.mini", 1, true)]
#[case("late_declaration.mini", 1, true)]
#[case("bool_conversion.mini", 1, true)]
#[case("overflow.mini", 1, true)]
#[case("long_hex.mini", 1, true)]
#[case("unterminated_string.mini", 1, true)]
fn bad_example_errors(#[case] name: &str, #[case] error_count: usize, #[case] fatal: bool) {
    let errors = process_bad_file(name);
    for error in errors.iter() {
        eprintln!("{}", error);
    }
    assert_eq!(errors.len(), error_count);
    assert!(errors.iter().all(|e| e.item.is_fatal() == fatal));
    assert!(errors.iter().all(|e| e.get_meta().file == name));
}

#[test]
fn errors_point_at_offending_lines() {
    let errors = process_bad_file("many_errors.mini");
    let lines: Vec<usize> = errors.iter().map(|e| e.get_meta().line).collect();
    assert_eq!(lines, vec![4, 5, 6, 6]);
}

#[test]
fn error_messages() {
    let errors = process_bad_file("undeclared.mini");
    assert_eq!(errors[0].to_string(), "Undeclared variable y at line: 3.");

    let errors = process_bad_file("assignment.mini");
    assert_eq!(
        errors[0].to_string(),
        "Wrong argument in assignment at line: 4. Expected int - got int and bool."
    );

    let errors = process_bad_file("redeclared.mini");
    assert_eq!(errors[0].to_string(), "Variable x is already declared at line: 3.");
}
