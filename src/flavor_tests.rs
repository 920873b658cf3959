#[cfg(test)]
mod tests {
    use crate::builder::Builder;
    use crate::dialect::Dialect;
    use crate::flavor::{Flavor, default_flavor, set_default_flavor_scoped};
    use crate::query::Query;
    use pretty_assertions::assert_eq;

    #[test]
    fn flavor_display() {
        let names: Vec<String> = Flavor::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["MySQL", "PostgreSQL", "SQLite", "SQLServer"]);
    }

    #[test]
    fn default_flavor_is_restored() {
        let before = {
            let _g = set_default_flavor_scoped(Flavor::MySQL);
            default_flavor()
        };
        assert_eq!(before, Flavor::MySQL);

        let _g = set_default_flavor_scoped(Flavor::SQLite);
        assert_eq!(default_flavor(), Flavor::SQLite);
        assert_eq!(Dialect::default().label(), "SQLite");
        let (sql, _) = Query::table("t").build().unwrap();
        assert_eq!(sql, "SELECT * FROM \"t\";");
    }

    #[test]
    fn shared_dialect_is_singleton() {
        assert!(std::ptr::eq(Flavor::MySQL.shared(), Flavor::MySQL.shared()));
        assert!(!std::ptr::eq(Flavor::MySQL.shared(), Flavor::PostgreSQL.shared()));
    }

    #[test]
    fn fresh_dialect_has_own_cache() {
        let d = Flavor::PostgreSQL.dialect();
        assert!(d.name().cache().is_empty());
        Query::table("users").build_with(&d).unwrap();
        assert_eq!(d.name().cache().len(), 1);

        // clone 共享缓存，换 quoter 则重新开始
        let cloned = d.clone();
        assert_eq!(cloned.name().cache().len(), 1);
        let requoted = d.with_quoter(Flavor::MySQL.quoter());
        assert!(requoted.name().cache().is_empty());
    }

    #[test]
    fn presets() {
        assert!(Flavor::MySQL.shared().on_conflict().is_some());
        assert!(Flavor::SQLServer.shared().on_conflict().is_none());
        assert_eq!(
            Flavor::SQLite.shared().on_conflict().map(|s| s.table_qualifier.as_ref()),
            Some("excluded")
        );
        for flavor in Flavor::ALL {
            assert_eq!(flavor.shared().label(), flavor.to_string());
            assert!(!flavor.shared().inline_values());
        }
    }
}
