// Integration tests: parse and run operation scripts end to end

use pretty_assertions::assert_eq;
use refcore::interpreter::config::ExecConfig;
use refcore::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use refcore::interpreter::engine::ExecState;
use refcore::interpreter::errors::RuntimeError;
use refcore::interpreter::report::ReportHandler;
use refcore::interpreter::statements::Interpreter;
use refcore::parser::data::DataScanner;
use refcore::parser::parse::Parser;

fn run_script(source: &str, data: &str, config: ExecConfig) -> (Interpreter, Result<(), RuntimeError>) {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let script = parser.parse_script().expect("Parsing failed");

    let data = DataScanner::new(data).expect("Data scanning failed");
    let state = ExecState::with_reporter(config, ReportHandler::buffer()).with_data(data);
    let mut interpreter = Interpreter::new(state);
    let result = interpreter.run(&script);
    (interpreter, result)
}

fn run(source: &str) -> (Interpreter, Result<(), RuntimeError>) {
    run_script(source, "", ExecConfig::default())
}

#[test]
fn test_call_by_reference() {
    let source = r#"
        ref x
        func bump p {
            set p 7
        }
        begin
            new x
            set x 1
            call bump x
            print x
        end
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["7".to_string()]);
    assert_eq!(interpreter.state().reporter().captured_lines(), vec!["gc:1", "gc:0"]);
    assert_eq!(interpreter.state().call_depth(), 0);
}

#[test]
fn test_swap_through_temporary() {
    let source = r#"
        ref a
        ref b
        func swap x y {
            int t
            copy t x
            copy x y
            copy y t
        }
        begin
            new a
            new b
            set a 1
            set b 2
            call swap a b
            print a
            print b
        end
    "#;

    // swap exchanges handles inside the callee only; the caller's cells keep theirs
    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["1".to_string(), "2".to_string()]);
}

#[test]
fn test_function_declared_after_use_is_registered_first() {
    let source = r#"
        int n
        begin
            call setn
            print n
        end
        func setn {
            set n 42
        }
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["42".to_string()]);
}

#[test]
fn test_block_scope_releases_refs() {
    let source = r#"
        begin
            ref keep
            new keep
            {
                ref tmp
                new tmp
                set tmp 9
                print tmp
            }
            set keep 3
            print keep
        end
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["9".to_string(), "3".to_string()]);
    assert_eq!(interpreter.state().reporter().captured(), &[1, 2, 1, 0]);
    assert_eq!(interpreter.state().heap().len(), 2);
}

#[test]
fn test_shadowing_in_nested_block() {
    let source = r#"
        begin
            int v
            set v 1
            {
                int v
                set v 2
                print v
            }
            print v
        end
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["2".to_string(), "1".to_string()]);
}

#[test]
fn test_input_reads_data_in_order() {
    let source = r#"
        int a
        begin
            input a
            print a
            input a
            print a
        end
    "#;

    let (interpreter, result) = run_script(source, "10\n-4\n", ExecConfig::default());

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["10".to_string(), "-4".to_string()]);
}

#[test]
fn test_input_past_end_of_data() {
    let source = r#"
        int a
        begin
            input a
            print a
            input a
            print a
        end
    "#;

    let (interpreter, result) = run_script(source, "5", ExecConfig::default());

    assert_eq!(result, Err(RuntimeError::DataExhausted));
    // Output produced before the failure is kept, and the frame is left in place
    assert_eq!(interpreter.output(), &["5".to_string()]);
    assert_eq!(interpreter.state().call_depth(), 1);
}

#[test]
fn test_callee_cannot_see_caller_local() {
    let source = r#"
        func peek {
            print secret
        }
        begin
            int secret
            call peek
        end
    "#;

    let (_, result) = run(source);

    assert_eq!(
        result,
        Err(RuntimeError::UndefinedVariable {
            name: "secret".to_string()
        })
    );
}

#[test]
fn test_undefined_function() {
    let (_, result) = run("begin\ncall nowhere\nend\n");

    assert_eq!(
        result,
        Err(RuntimeError::UndefinedFunction {
            name: "nowhere".to_string()
        })
    );
}

#[test]
fn test_new_on_int() {
    let (interpreter, result) = run("int i\nnew i\n");

    assert_eq!(
        result,
        Err(RuntimeError::NotARef {
            name: "i".to_string()
        })
    );
    assert!(interpreter.state().heap().is_empty());
}

#[test]
fn test_read_unbound_ref() {
    let (interpreter, result) = run("ref r\nbegin\nprint r\nend\n");

    assert_eq!(
        result,
        Err(RuntimeError::InvalidHeapRead {
            name: "r".to_string()
        })
    );
    assert!(interpreter.output().is_empty());
}

#[test]
fn test_block_outside_frame() {
    let (_, result) = run("{\nint z\n}\n");

    assert!(
        matches!(result, Err(RuntimeError::NoStackFrame { .. })),
        "Expected missing frame error, got {:?}",
        result
    );
}

#[test]
fn test_runaway_recursion_hits_depth_limit() {
    let source = r#"
        func forever {
            call forever
        }
        begin
            call forever
        end
    "#;

    let config = ExecConfig::default().with_max_call_depth(50);
    let (interpreter, result) = run_script(source, "", config);

    assert_eq!(result, Err(RuntimeError::CallDepthExceeded { limit: 50 }));
    assert_eq!(interpreter.state().call_depth(), 50);
}

#[test]
fn test_runaway_recursion_default_limit() {
    let source = r#"
        func forever {
            call forever
        }
        begin
            call forever
        end
    "#;

    // Same stack the binary gives its interpreter thread at the default limit
    let result = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(move || {
            let (interpreter, result) = run(source);
            (interpreter.state().call_depth(), result)
        })
        .expect("spawn failed")
        .join()
        .expect("interpreter thread panicked");

    assert_eq!(
        result,
        (
            DEFAULT_MAX_CALL_DEPTH,
            Err(RuntimeError::CallDepthExceeded {
                limit: DEFAULT_MAX_CALL_DEPTH
            })
        )
    );
}

#[test]
fn test_body_local_shadowing_formal() {
    let source = r#"
        ref x
        func f p {
            ref p
        }
        begin
            new x
            call f x
        end
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.state().reporter().captured(), &[1, 0]);
}

#[test]
fn test_argument_count_mismatch() {
    let source = r#"
        ref a
        func two x y {
        }
        begin
            call two a
        end
    "#;

    let (_, result) = run(source);

    assert_eq!(
        result,
        Err(RuntimeError::ArgumentCountMismatch {
            function: "two".to_string(),
            expected: 2,
            got: 1,
        })
    );
}

#[test]
fn test_repeated_calls_share_ref() {
    let source = r#"
        ref counter
        func tick c {
            print c
        }
        begin
            new counter
            set counter 3
            call tick counter
            set counter 2
            call tick counter
        end
    "#;

    let (interpreter, result) = run(source);

    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(interpreter.output(), &["3".to_string(), "2".to_string()]);
    // The first return clears the shared flag; later calls do not revive it
    assert_eq!(interpreter.state().reporter().captured(), &[1, 0]);
}
