use calc_interpreter::{Error, Number, RuntimeError, Session, execute, execute_file};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::io::Write;

    fn run(session: &mut Session, text: &str) -> Number {
        session.run(text).unwrap().unwrap()
    }

    #[test]
    fn test_precedence() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "3 + 4 * 2"), Number::Int(11));
        assert_eq!(run(&mut session, "(3 + 4) * 2"), Number::Int(14));
    }

    #[test]
    fn test_pushback_does_not_swallow_sum() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "3 * 4 + 5"), Number::Int(17));
        assert_eq!(run(&mut session, "3*4+5"), Number::Int(17));
    }

    #[test]
    fn test_true_division() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "4 / 2"), Number::Float(2.0));
        assert!(matches!(
            session.run("1 / 0"),
            Err(Error::Runtime(RuntimeError::DivisionByZero))
        ));
    }

    #[test]
    fn test_assignment_persists_across_statements() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "x = 5"), Number::Int(5));
        assert_eq!(run(&mut session, "x + 1"), Number::Int(6));
    }

    #[test]
    fn test_unknown_variable() {
        let mut session = Session::new();
        match session.run("y + 1") {
            Err(Error::Runtime(RuntimeError::UnknownVariable(name))) => assert_eq!(name, "y"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_assignment_target_must_be_symbol() {
        let mut session = Session::new();
        assert!(matches!(session.run("3 = 5"), Err(Error::Semantic(_))));
        assert!(matches!(session.run("(x) + 1 = 5"), Err(Error::Semantic(_))));
    }

    #[test]
    fn test_non_assignment_is_idempotent() {
        let mut session = Session::new();
        let before = session.variables().to_map();
        assert_eq!(run(&mut session, "2 * (3 + 4)"), Number::Int(14));
        assert_eq!(run(&mut session, "2 * (3 + 4)"), Number::Int(14));
        assert_eq!(session.variables().to_map(), before);
    }

    #[test]
    fn test_float_literal_promotes() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "12.5"), Number::Float(12.5));
        assert_eq!(run(&mut session, "1.5 + 1"), Number::Float(2.5));
        assert_eq!(run(&mut session, "2 * 3"), Number::Int(6));
    }

    #[test]
    fn test_incomplete_float_is_lex_error() {
        let mut session = Session::new();
        assert!(matches!(session.run("12. + 1"), Err(Error::Lex(_))));
        assert!(matches!(session.run("12.x"), Err(Error::Lex(_))));
    }

    #[test]
    fn test_parse_error_kinds() {
        let mut session = Session::new();
        assert!(matches!(session.run("(1 + 2"), Err(Error::Parse(_))));
        assert!(matches!(session.run("1 2"), Err(Error::Parse(_))));
        assert!(matches!(session.run("x = y = 3"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_builtin_constants() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "pi"), Number::Float(std::f64::consts::PI));
        assert_eq!(run(&mut session, "e"), Number::Float(std::f64::consts::E));
        assert_eq!(run(&mut session, "g * 2"), Number::Float(19.6));
    }

    #[test]
    fn test_constants_can_be_rebound() {
        let mut session = Session::new();
        run(&mut session, "g = 10");
        assert_eq!(run(&mut session, "g * 2"), Number::Int(20));
    }

    #[test]
    fn test_conditional() {
        let mut session = Session::new();
        run(&mut session, "x = 3");
        assert_eq!(
            run(&mut session, "if (x > 1) { y = 1 } else { y = 2 }"),
            Number::Int(1)
        );
        assert_eq!(session.variables().get("y"), Some(Number::Int(1)));
        assert_eq!(
            run(&mut session, "if (x == 1) { z = x } else { z = x * 2 }"),
            Number::Int(6)
        );
    }

    #[test]
    fn test_conditional_numeric_truthiness() {
        let mut session = Session::new();
        assert_eq!(run(&mut session, "if (2 - 2) { 10 } else { 20 }"), Number::Int(20));
        assert_eq!(run(&mut session, "if (0.5) { 10 } else { 20 }"), Number::Int(10));
    }

    #[test]
    fn test_conditional_branch_target_checked() {
        let mut session = Session::new();
        assert!(matches!(
            session.run("if (1) { 2 = 3 } else { 4 }"),
            Err(Error::Semantic(_))
        ));
    }

    #[test]
    fn test_environment_not_rolled_back() {
        let mut session = Session::new();
        assert!(session.run("x = 1 / 0").is_err());
        assert!(!session.variables().contains("x"));
        run(&mut session, "x = 4");
        assert!(session.run("if (x) { w = 1 } else { w = 2 } ").is_ok());
        assert!(session.run("w / 0").is_err());
        assert_eq!(session.variables().get("w"), Some(Number::Int(1)));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::new();
        let mut second = Session::new();
        run(&mut first, "x = 1");
        assert!(second.run("x").is_err());
    }

    #[test]
    fn test_execute_program() {
        let program = "a = 10\nb = 3\nsum = a + b\ndiff = a - b\nprod = a * b\nquot = a / b\n";
        let result = execute(program).unwrap();
        assert_eq!(result.get("sum"), Some(&Number::Int(13)));
        assert_eq!(result.get("diff"), Some(&Number::Int(7)));
        assert_eq!(result.get("prod"), Some(&Number::Int(30)));
        assert_eq!(result.get("quot"), Some(&Number::Float(10.0 / 3.0)));
    }

    #[test]
    fn test_complex_expression() {
        let result = execute("x = 7 + 3 * (10 / (12 / (3 + 1) - 1))").unwrap();
        assert_eq!(result.get("x"), Some(&Number::Float(22.0)));
    }

    #[test]
    fn test_mixed_operations() {
        let result = execute("x = 10 - 5 + 3 * 2 / 2").unwrap();
        assert_eq!(result.get("x"), Some(&Number::Float(8.0)));
    }

    #[test]
    fn test_chained_operations() {
        let result = execute("x = 1 + 2 + 3 + 4 + 5").unwrap();
        assert_eq!(result.get("x"), Some(&Number::Int(15)));
    }

    #[test]
    fn test_variable_reuse() {
        let result = execute("x = 5\nx = x + 1\nx = x * 2").unwrap();
        assert_eq!(result.get("x"), Some(&Number::Int(12)));
    }

    #[test]
    fn test_blank_lines_and_whitespace() {
        let result = execute("\n   x   =   5  \n\t\n y = x\n").unwrap();
        assert_eq!(result.get("x"), Some(&Number::Int(5)));
        assert_eq!(result.get("y"), Some(&Number::Int(5)));
    }

    #[test]
    fn test_long_identifiers() {
        let result = execute("very_long_variable_name = 100").unwrap();
        assert_eq!(result.get("very_long_variable_name"), Some(&Number::Int(100)));
    }

    #[test]
    fn test_error_names_line() {
        let err = execute("x = 1\ny = x + z").unwrap_err();
        assert!(matches!(err, Error::Line { line: 2, .. }));
        assert_eq!(err.to_string(), "line 2: runtime error: unknown variable `z`");
    }

    #[test]
    fn test_execute_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "r = 2").unwrap();
        writeln!(file, "area = pi * r * r").unwrap();
        let result = execute_file(file.path()).unwrap();
        assert_eq!(
            result.get("area"),
            Some(&Number::Float(std::f64::consts::PI * 2.0 * 2.0))
        );
    }

    #[test]
    fn test_execute_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute_file(dir.path().join("missing.calc")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
