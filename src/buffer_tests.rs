#[cfg(test)]
mod tests {
    use crate::args::Arg;
    use crate::buffer::{BuildError, Buffer};
    use crate::flavor::Flavor;
    use crate::value::{SqlDateTime, SqlValue};
    use crate::valuer::{SqlValuer, ValuerError};
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[derive(Debug, Clone)]
    struct Cents(i64);

    impl SqlValuer for Cents {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Ok(SqlValue::F64(self.0 as f64 / 100.0))
        }
    }

    #[derive(Debug, Clone)]
    struct Broken;

    impl SqlValuer for Broken {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Err(ValuerError("boom".to_string()))
        }
    }

    fn inline_literal(flavor: Flavor, arg: Arg) -> Result<String, BuildError> {
        let dialect = flavor.shared();
        let mut buf = Buffer::inline(dialect);
        buf.write_value(&arg)?;
        Ok(buf.finish().0)
    }

    #[test]
    fn placeholders_per_flavor() {
        let cases = vec![
            (Flavor::MySQL, "?,?,?"),
            (Flavor::SQLite, "?,?,?"),
            (Flavor::PostgreSQL, "$1,$2,$3"),
            (Flavor::SQLServer, "@p1,@p2,@p3"),
        ];

        for (flavor, expected) in cases {
            let mut buf = Buffer::new(flavor.shared());
            for (i, v) in [1, 2, 3].into_iter().enumerate() {
                if i > 0 {
                    buf.write_char(',');
                }
                buf.write_value(&Arg::from(v)).unwrap();
            }
            let (sql, args) = buf.finish();
            assert_eq!(sql, expected, "{flavor}");
            assert_eq!(args, vec![Arg::from(1), Arg::from(2), Arg::from(3)]);
        }
    }

    #[test]
    fn add_arguments_does_not_advance_ordinal() {
        let mut buf = Buffer::new(Flavor::PostgreSQL.shared());
        buf.write_str("a = $1");
        buf.add_arguments(&[Arg::from("x")]);
        assert_eq!(buf.arguments().len(), 1);
        assert_eq!(buf.as_str(), "a = $1");
    }

    #[test]
    fn dialect_inline_switch() {
        let dialect = Flavor::MySQL.dialect().with_inline_values(true);
        let buf = Buffer::new(&dialect);
        assert!(buf.is_inline());
        assert!(!Buffer::new(Flavor::MySQL.shared()).is_inline());
    }

    #[test]
    fn inline_scalars() {
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(())).unwrap(), "NULL");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(true)).unwrap(), "TRUE");
        assert_eq!(inline_literal(Flavor::PostgreSQL, Arg::from(false)).unwrap(), "FALSE");
        assert_eq!(inline_literal(Flavor::SQLite, Arg::from(true)).unwrap(), "1");
        assert_eq!(inline_literal(Flavor::SQLServer, Arg::from(false)).unwrap(), "0");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(-42)).unwrap(), "-42");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(u64::MAX)).unwrap(), "18446744073709551615");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(0.1_f32)).unwrap(), "0.1");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(2.5_f64)).unwrap(), "2.5");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from(None::<i64>)).unwrap(), "NULL");
    }

    #[test]
    fn inline_strings_use_quoter() {
        assert_eq!(inline_literal(Flavor::PostgreSQL, Arg::from("it's")).unwrap(), "'it''s'");
        assert_eq!(inline_literal(Flavor::MySQL, Arg::from("a\\b")).unwrap(), "'a\\\\b'");
        assert_eq!(inline_literal(Flavor::SQLite, Arg::from(b"abc".to_vec())).unwrap(), "'abc'");
    }

    #[test]
    fn inline_datetime() {
        let dt = datetime!(2024-01-02 3:04:05.123_456 UTC);
        assert_eq!(
            inline_literal(Flavor::PostgreSQL, Arg::from(dt)).unwrap(),
            "'2024-01-02 03:04:05.123456 +00:00'"
        );

        let with_abbr = SqlDateTime::new(datetime!(2024-06-30 23:59:59 +8)).with_tz_abbr("CST");
        assert_eq!(
            inline_literal(Flavor::MySQL, Arg::from(with_abbr)).unwrap(),
            "'2024-06-30 23:59:59.000000 CST'"
        );

        let offset = datetime!(2024-06-30 23:59:59 -5:30);
        assert_eq!(
            inline_literal(Flavor::MySQL, Arg::from(offset)).unwrap(),
            "'2024-06-30 23:59:59.000000 -05:30'"
        );
    }

    #[test]
    fn inline_rejects_non_finite_float() {
        let err = inline_literal(Flavor::MySQL, Arg::from(f64::NAN)).unwrap_err();
        assert!(matches!(err, BuildError::NonFiniteFloat(v) if v.is_nan()));

        let err = inline_literal(Flavor::MySQL, Arg::from(f32::INFINITY)).unwrap_err();
        assert!(matches!(err, BuildError::NonFiniteFloat(v) if v.is_infinite()));
    }

    #[test]
    fn inline_rejects_non_utf8_bytes() {
        let err = inline_literal(Flavor::PostgreSQL, Arg::from(vec![0xff_u8, 0x41])).unwrap_err();
        assert!(matches!(err, BuildError::NonUtf8Bytes(_)));

        // 绑定模式原样传参
        let mut buf = Buffer::new(Flavor::PostgreSQL.shared());
        buf.write_value(&Arg::from(vec![0xff_u8, 0x41])).unwrap();
        let (sql, args) = buf.finish();
        assert_eq!(sql, "$1");
        assert_eq!(args, vec![Arg::from(vec![0xff_u8, 0x41])]);
    }

    #[test]
    fn valuer_is_resolved_only_when_inline() {
        assert_eq!(
            inline_literal(Flavor::MySQL, Arg::Valuer(Box::new(Cents(250)))).unwrap(),
            "2.5"
        );

        let err = inline_literal(Flavor::MySQL, Arg::Valuer(Box::new(Broken))).unwrap_err();
        assert!(matches!(err, BuildError::Valuer(ValuerError(ref msg)) if msg == "boom"));

        // 绑定模式下不求值
        let mut buf = Buffer::new(Flavor::MySQL.shared());
        buf.write_value(&Arg::Valuer(Box::new(Broken))).unwrap();
        let (sql, args) = buf.finish();
        assert_eq!(sql, "?");
        assert_eq!(args.len(), 1);
        assert!(args[0].resolve().is_err());
    }

    #[test]
    fn escape_list() {
        let mut buf = Buffer::new(Flavor::SQLServer.shared());
        buf.write_escape_list(&["id".to_string(), "users.name".to_string()], ", ");
        assert_eq!(buf.as_str(), "[id], [users].[name]");
    }
}
