extern crate include_dir;
extern crate mini;
extern crate rstest;

use include_dir::{include_dir, Dir};
use rstest::rstest;

use mini::backend::compile;
use mini::frontend::process_code;

static GOOD_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/good");

#[derive(Debug, Clone)]
struct TestCase {
    input_file_name: String,
    input_content: String,
    expected_lines: Vec<String>,
}

impl From<&str> for TestCase {
    fn from(name: &str) -> Self {
        let input_file_name = format!("{}.mini", name);
        let input_file = GOOD_DIR.get_file(&input_file_name).unwrap();
        let expected_file = GOOD_DIR.get_file(format!("{}.expected", name)).unwrap();

        let input_content = String::from(input_file.contents_utf8().unwrap());
        let expected_lines = expected_file.contents_utf8().unwrap()
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Self { input_file_name, input_content, expected_lines }
    }
}

/// every line of the .expected file has to be a part of the generated code
#[rstest]
#[case("arithmetic")]
#[case("logic")]
#[case("control")]
#[case("io")]
#[case("conversions")]
#[case("comments")]
#[case("empty")]
fn program_compiles(#[case] name: &str) {
    let test_case = TestCase::from(name);

    match process_code(&test_case.input_file_name, &test_case.input_content) {
        Ok(checked_program) => {
            let compiled_code = compile(&checked_program);

            eprintln!(" --- BEGIN LLVM DUMP --- ");
            eprint!("{}", compiled_code);
            eprintln!(" --- END LLVM DUMP --- ");

            let missing: Vec<&String> = test_case.expected_lines.iter()
                .filter(|line| !compiled_code.contains(line.as_str()))
                .collect();
            assert!(missing.is_empty(), "missing in generated code: {:?}", missing);
        }
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            panic!("unexpected frontend errors")
        }
    }
}

#[test]
fn every_block_ends_with_a_terminator() {
    for file in GOOD_DIR.files().filter(|f| f.path().extension().map_or(false, |ext| ext == "mini")) {
        let file_name = file.path().to_str().unwrap();
        let program = process_code(file_name, file.contents_utf8().unwrap()).unwrap();
        let compiled_code = compile(&program);

        let body: Vec<&str> = compiled_code.lines()
            .skip_while(|line| !line.starts_with("define"))
            .skip(1)
            .collect();
        for (i, line) in body.iter().enumerate() {
            let next = body.get(i + 1).map(|l| l.trim_start());
            let starts_block = next.map_or(true, |l| l.ends_with(':') || l == "}");
            if starts_block && *line != "}" {
                let line = line.trim_start();
                assert!(
                    line.starts_with("br ") || line.starts_with("ret "),
                    "{}: block ends with {:?}", file_name, line
                );
            }
        }
    }
}

#[test]
fn compilation_is_independent() {
    let source_code = "program { bool a; write a || a; write \"x\"; }";
    let first = compile(&process_code("a.mini", source_code).unwrap());
    let second = compile(&process_code("a.mini", source_code).unwrap());
    assert_eq!(first, second);
    assert!(second.contains("%logic_1 = alloca i1"));
    assert!(second.contains("@.str.1 ="));
}
